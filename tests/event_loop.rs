use std::sync::{Arc, Mutex};
use std::time::Duration;

use movie_suggest::{
    models::{Movie, RecommendationOutcome, SurfaceId, TrendingKind},
    services::{MovieApi, TitleIndex},
    AppError, AppResult, Config, EventLoop, InputEvent, Session, ViewUpdate,
};

/// Records every call and answers trending requests with a fixed list
#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<String>>,
}

impl RecordingApi {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MovieApi for RecordingApi {
    async fn search(&self, query: &str, _limit: u32) -> AppResult<Vec<Movie>> {
        self.calls.lock().unwrap().push(format!("search:{}", query));
        Err(AppError::SearchExecution("offline".to_string()))
    }

    async fn recommend(&self, title: &str, _count: u32) -> AppResult<RecommendationOutcome> {
        self.calls.lock().unwrap().push(format!("recommend:{}", title));
        Ok(RecommendationOutcome::Found(Vec::new()))
    }

    async fn trending(&self, kind: TrendingKind, limit: u32) -> AppResult<Vec<Movie>> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("trending:{}:{}", kind, limit));
        Ok(vec![Movie {
            title: "Heat".to_string(),
            overview: None,
            rating: Some(8.3),
            poster_path: None,
        }])
    }
}

fn session() -> Session<Vec<ViewUpdate>> {
    let mut session = Session::new(Config::default(), Vec::new());
    session.catalog_loaded(Ok(TitleIndex::new(vec![
        "Inception".to_string(),
        "Incredibles 2".to_string(),
        "Heat".to_string(),
    ])));
    session
}

fn keystroke(surface: SurfaceId, value: &str) -> InputEvent {
    InputEvent::Keystroke {
        surface,
        value: value.to_string(),
    }
}

fn dropdowns(updates: &[ViewUpdate]) -> Vec<(SurfaceId, Vec<String>)> {
    updates
        .iter()
        .filter_map(|update| match update {
            ViewUpdate::Dropdown { surface, entries } => Some((
                *surface,
                entries.iter().map(|e| e.label.clone()).collect(),
            )),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_rapid_typing_evaluates_once() {
    let api = Arc::new(RecordingApi::default());
    let (event_loop, events) = EventLoop::new(session(), api.clone());
    let handle = tokio::spawn(event_loop.run());

    for value in ["i", "in", "inc"] {
        events.send(keystroke(SurfaceId::Search, value)).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    // Nothing renders before the window closes
    tokio::time::sleep(Duration::from_millis(150)).await;
    events.send(InputEvent::Shutdown).unwrap();
    let early = handle.await.unwrap();
    assert!(dropdowns(early.sink()).is_empty());

    let (event_loop, events) = EventLoop::new(session(), api.clone());
    let handle = tokio::spawn(event_loop.run());
    for value in ["i", "in", "inc"] {
        events.send(keystroke(SurfaceId::Search, value)).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    tokio::time::sleep(Duration::from_millis(400)).await;
    events.send(InputEvent::Shutdown).unwrap();

    let session = handle.await.unwrap();
    assert_eq!(
        dropdowns(session.sink()),
        vec![(
            SurfaceId::Search,
            vec!["Inception".to_string(), "Incredibles 2".to_string()]
        )]
    );
    assert!(api.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_surfaces_debounce_independently() {
    let api = Arc::new(RecordingApi::default());
    let (event_loop, events) = EventLoop::new(session(), api);
    let handle = tokio::spawn(event_loop.run());

    events.send(keystroke(SurfaceId::Search, "inc")).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    events
        .send(keystroke(SurfaceId::Recommendation, "hea"))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    events.send(InputEvent::Shutdown).unwrap();

    let session = handle.await.unwrap();
    let shown = dropdowns(session.sink());
    assert_eq!(shown.len(), 2);
    assert_eq!(shown[0].0, SurfaceId::Search);
    assert_eq!(shown[1], (SurfaceId::Recommendation, vec!["Heat".to_string()]));
    assert!(session.sink().contains(&ViewUpdate::HideDropdown {
        surface: SurfaceId::Search
    }));
    assert_eq!(session.dropdowns().active_surface(), Some(SurfaceId::Recommendation));
}

#[tokio::test(start_paused = true)]
async fn test_trending_and_failed_search_round_trip() {
    let api = Arc::new(RecordingApi::default());
    let (event_loop, events) = EventLoop::new(session(), api.clone());
    let handle = tokio::spawn(event_loop.run());

    events
        .send(InputEvent::Trending {
            kind: TrendingKind::TopRated,
        })
        .unwrap();
    events.send(keystroke(SurfaceId::Search, "heat")).unwrap();
    events
        .send(InputEvent::Submit {
            surface: SurfaceId::Search,
        })
        .unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    events.send(InputEvent::Shutdown).unwrap();

    let session = handle.await.unwrap();
    let mut calls = api.calls();
    calls.sort();
    assert_eq!(calls, vec!["search:heat", "trending:top-rated:12"]);

    let updates = session.sink();
    assert!(updates.iter().any(|update| matches!(
        update,
        ViewUpdate::Trending {
            kind: TrendingKind::TopRated,
            movies,
        } if movies.len() == 1
    )));
    assert!(updates.iter().any(|update| matches!(update, ViewUpdate::Notice(_))));
}
