use std::sync::Arc;

use movie_suggest::{
    models::{EntryKind, SurfaceId, TrendingKind},
    services::{HttpMovieApi, LocalCatalog, RemoteCatalog, TitleIndex},
    Config, EventLoop, InputEvent, RenderSink, Session, ViewUpdate,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Prints view updates to stdout, one block per update
struct StdoutSink;

impl RenderSink for StdoutSink {
    fn apply(&mut self, update: ViewUpdate) {
        match update {
            ViewUpdate::Dropdown { surface, entries } => {
                println!("[{}] dropdown", surface);
                for (i, entry) in entries.iter().enumerate() {
                    let marker = match entry.kind {
                        EntryKind::Suggestion | EntryKind::Popular => " ",
                        EntryKind::Overflow => "+",
                        EntryKind::NoResults => "!",
                    };
                    println!("  {:>2} {} {}", i, marker, entry.label);
                }
            }
            ViewUpdate::HideDropdown { surface } => println!("[{}] dropdown hidden", surface),
            ViewUpdate::SetInput { surface, value } => println!("[{}] = {:?}", surface, value),
            ViewUpdate::Overflow(view) => {
                println!("[browser] {} ({})", view.heading, view.total);
                for (i, title) in view.entries.iter().enumerate() {
                    println!("  {:>4} {}", i, title);
                }
            }
            ViewUpdate::CloseOverflow => println!("[browser] closed"),
            ViewUpdate::ScrollLocked(_) | ViewUpdate::Loading(_) => {}
            ViewUpdate::SearchResults { query, movies } => {
                println!("Found {} movies for {:?}", movies.len(), query);
                for movie in movies {
                    println!("  {}", movie.title);
                }
            }
            ViewUpdate::ClearSearchResults => println!("[results] cleared"),
            ViewUpdate::Recommendations { based_on, outcome } => {
                println!("Movies similar to {:?}: {:?}", based_on, outcome);
            }
            ViewUpdate::ClearRecommendations => println!("[recommendations] cleared"),
            ViewUpdate::Trending { kind, movies } => {
                println!("Trending ({}):", kind);
                for movie in movies {
                    println!("  {}", movie.title);
                }
            }
            ViewUpdate::Notice(message) => println!("! {}", message),
        }
    }
}

/// Line command given on stdin
#[derive(Debug)]
enum Line {
    Event(InputEvent),
    Quit,
}

fn parse_surface(word: &str) -> Option<SurfaceId> {
    match word {
        "search" | "s" => Some(SurfaceId::Search),
        "rec" | "r" => Some(SurfaceId::Recommendation),
        _ => None,
    }
}

/// Parses commands such as `type search inc`, `choose rec 2`, `outside`, `quit`
fn parse_line(line: &str) -> Option<Line> {
    let line = line.trim_end_matches('\r');
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    let (target, tail) = rest.split_once(' ').unwrap_or((rest, ""));

    let event = match command {
        "type" => InputEvent::Keystroke {
            surface: parse_surface(target)?,
            value: tail.to_string(),
        },
        "focus" => InputEvent::Focus {
            surface: parse_surface(target)?,
        },
        "click" => InputEvent::Click {
            surface: parse_surface(target)?,
        },
        "choose" => InputEvent::Choose {
            surface: parse_surface(target)?,
            index: tail.trim().parse().ok()?,
        },
        "submit" => InputEvent::Submit {
            surface: parse_surface(target)?,
        },
        "outside" => InputEvent::OutsideClick,
        "filter" => InputEvent::OverflowFilter {
            value: rest.to_string(),
        },
        "pick" => InputEvent::OverflowChoose {
            index: rest.trim().parse().ok()?,
        },
        "close" => InputEvent::OverflowClose,
        "clear" => InputEvent::ClearSearch,
        "trending" => InputEvent::Trending {
            kind: rest.trim().parse::<TrendingKind>().ok()?,
        },
        "quit" | "exit" => return Some(Line::Quit),
        _ => return None,
    };
    Some(Line::Event(event))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_suggest=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;

    let local = LocalCatalog::new(&config.catalog_path);
    let remote = RemoteCatalog::new(config.api_base_url.clone());
    let api = Arc::new(HttpMovieApi::new(config.api_base_url.clone()));

    let mut session = Session::new(config, StdoutSink);
    session.catalog_loaded(TitleIndex::load(&local, &remote).await);

    let (event_loop, events) = EventLoop::new(session, api);
    let running = tokio::spawn(event_loop.run());

    events
        .send(InputEvent::Trending {
            kind: TrendingKind::TopRated,
        })
        .map_err(|_| anyhow::anyhow!("Event loop stopped before start"))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Some(Line::Event(event)) => {
                if events.send(event).is_err() {
                    break;
                }
            }
            Some(Line::Quit) => break,
            None => tracing::warn!(line = %line, "Unrecognised command"),
        }
    }

    let _ = events.send(InputEvent::Shutdown);
    running.await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keystroke_keeps_spaces() {
        match parse_line("type search the dark") {
            Some(Line::Event(InputEvent::Keystroke { surface, value })) => {
                assert_eq!(surface, SurfaceId::Search);
                assert_eq!(value, "the dark");
            }
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_keystroke() {
        assert!(matches!(
            parse_line("type rec"),
            Some(Line::Event(InputEvent::Keystroke { value, .. })) if value.is_empty()
        ));
    }

    #[test]
    fn test_parse_choose_and_pick() {
        assert!(matches!(
            parse_line("choose r 3"),
            Some(Line::Event(InputEvent::Choose {
                surface: SurfaceId::Recommendation,
                index: 3
            }))
        ));
        assert!(matches!(
            parse_line("pick 0"),
            Some(Line::Event(InputEvent::OverflowChoose { index: 0 }))
        ));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(parse_line("dance").is_none());
        assert!(parse_line("focus sidebar").is_none());
        assert!(parse_line("choose search many").is_none());
        assert!(matches!(parse_line("quit"), Some(Line::Quit)));
    }
}
