//! Event-driven session that owns the suggestion components
//!
//! `Session::handle` is a synchronous state machine: it applies one input event, pushes
//! view updates to the render sink and returns the asynchronous work the event needs.
//! `EventLoop` runs that work (debounce timers, API calls) on the tokio runtime and
//! feeds the outcomes back in as further events, so every state change happens on the
//! loop task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    config::Config,
    error::AppResult,
    models::{
        DropdownEntry, DropdownState, EntryAction, Movie, RecommendationOutcome, SurfaceId,
        TrendingKind, MIN_SEARCH_CHARS,
    },
    services::{
        DropdownController, EvaluationToken, MovieApi, OverflowBrowser, OverflowView,
        PendingEvaluation, SuggestionEngine, TitleIndex,
    },
};

const CATALOG_FAILED: &str = "Failed to load movie database";
const SEARCH_TOO_SHORT: &str = "Please enter at least 2 characters to search";
const SEARCH_FAILED: &str = "Failed to search movies. Please try again.";
const RECOMMEND_MISSING: &str = "Please select a movie for recommendations";
const RECOMMEND_FAILED: &str = "Failed to get recommendations. Please try again.";
const TRENDING_FAILED: &str = "Failed to load trending movies";

/// Everything the host page can report to the session
#[derive(Debug)]
pub enum InputEvent {
    Keystroke { surface: SurfaceId, value: String },
    Focus { surface: SurfaceId },
    Click { surface: SurfaceId },
    /// A rendered dropdown row was chosen, by position
    Choose { surface: SurfaceId, index: usize },
    DebounceElapsed {
        surface: SurfaceId,
        token: EvaluationToken,
    },
    /// Click outside every search container
    OutsideClick,
    OverflowFilter { value: String },
    OverflowChoose { index: usize },
    /// Close button or overlay background
    OverflowClose,
    /// Enter key or the button next to an input
    Submit { surface: SurfaceId },
    ClearSearch,
    Trending { kind: TrendingKind },
    Api(ApiCompletion),
    Shutdown,
}

/// Outcome of a network call started by the session
#[derive(Debug)]
pub enum ApiCompletion {
    Search {
        query: String,
        result: AppResult<Vec<Movie>>,
    },
    Recommend {
        based_on: String,
        result: AppResult<RecommendationOutcome>,
    },
    Trending {
        kind: TrendingKind,
        result: AppResult<Vec<Movie>>,
    },
}

/// Instructions for the view layer
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate {
    Dropdown {
        surface: SurfaceId,
        entries: Vec<DropdownEntry>,
    },
    HideDropdown { surface: SurfaceId },
    SetInput { surface: SurfaceId, value: String },
    Overflow(OverflowView),
    CloseOverflow,
    ScrollLocked(bool),
    SearchResults { query: String, movies: Vec<Movie> },
    ClearSearchResults,
    Recommendations {
        based_on: String,
        outcome: RecommendationOutcome,
    },
    ClearRecommendations,
    Trending {
        kind: TrendingKind,
        movies: Vec<Movie>,
    },
    Loading(bool),
    Notice(String),
}

/// Receives view updates in the order they happen
pub trait RenderSink: Send {
    fn apply(&mut self, update: ViewUpdate);
}

impl RenderSink for Vec<ViewUpdate> {
    fn apply(&mut self, update: ViewUpdate) {
        self.push(update);
    }
}

/// Asynchronous work requested by an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Debounce(PendingEvaluation),
    Search { query: String, limit: u32 },
    Recommend { title: String, count: u32 },
    Trending { kind: TrendingKind, limit: u32 },
}

pub struct Session<S> {
    config: Config,
    engine: SuggestionEngine,
    dropdowns: DropdownController,
    overflow: OverflowBrowser,
    sink: S,
}

impl<S: RenderSink> Session<S> {
    pub fn new(config: Config, sink: S) -> Self {
        let engine = SuggestionEngine::new(config.popular_titles.clone());
        Self::with_engine(config, engine, sink)
    }

    pub fn with_engine(config: Config, engine: SuggestionEngine, sink: S) -> Self {
        Self {
            config,
            engine,
            dropdowns: DropdownController::new(),
            overflow: OverflowBrowser::new(),
            sink,
        }
    }

    /// Installs the catalog, or reports once that suggestions are unavailable
    pub fn catalog_loaded(&mut self, result: AppResult<TitleIndex>) {
        match result {
            Ok(index) => {
                tracing::info!(
                    titles = index.len(),
                    source = index.source(),
                    "Suggestions ready"
                );
                self.engine.attach_index(Arc::new(index));
            }
            Err(e) => {
                tracing::error!(error = %e, "Error loading movie titles");
                self.notice(CATALOG_FAILED);
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    pub fn dropdowns(&self) -> &DropdownController {
        &self.dropdowns
    }

    pub fn overflow(&self) -> &OverflowBrowser {
        &self.overflow
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Applies one event and returns the work it schedules
    pub fn handle(&mut self, event: InputEvent) -> Vec<Command> {
        match event {
            InputEvent::Keystroke { surface, value } => {
                if surface == SurfaceId::Recommendation && value.trim().is_empty() {
                    self.sink.apply(ViewUpdate::ClearRecommendations);
                }
                return vec![Command::Debounce(self.engine.keystroke(surface, &value))];
            }
            InputEvent::DebounceElapsed { surface, token } => {
                if let Some(state) = self.engine.debounce_elapsed(surface, token) {
                    self.show(surface, state);
                }
            }
            InputEvent::Focus { surface } => {
                if let Some(state) = self.engine.focus(surface) {
                    self.show(surface, state);
                }
            }
            InputEvent::Click { surface } => {
                if let Some(state) = self.engine.click(surface) {
                    self.show(surface, state);
                }
            }
            InputEvent::Choose { surface, index } => self.choose(surface, index),
            InputEvent::OutsideClick => self.close_all(),
            InputEvent::OverflowFilter { value } => {
                if let Some(view) = self.overflow.refilter(&value) {
                    self.sink.apply(ViewUpdate::Overflow(view));
                }
            }
            InputEvent::OverflowChoose { index } => {
                if let Some(title) = self.overflow.choose(index) {
                    for surface in SurfaceId::ALL {
                        self.fill(surface, &title);
                    }
                    self.overflow_closed();
                }
            }
            InputEvent::OverflowClose => {
                if self.overflow.close() {
                    self.overflow_closed();
                }
            }
            InputEvent::Submit { surface } => return self.submit(surface),
            InputEvent::ClearSearch => {
                self.fill(SurfaceId::Search, "");
                self.sink.apply(ViewUpdate::ClearSearchResults);
                self.close_all();
            }
            InputEvent::Trending { kind } => {
                self.sink.apply(ViewUpdate::Loading(true));
                return vec![Command::Trending {
                    kind,
                    limit: self.config.trending_limit,
                }];
            }
            InputEvent::Api(completion) => self.complete(completion),
            InputEvent::Shutdown => {}
        }
        Vec::new()
    }

    fn show(&mut self, surface: SurfaceId, state: DropdownState) {
        if !state.is_visible() {
            self.close(surface);
            return;
        }

        if let Some(previous) = self.dropdowns.open(surface, state) {
            self.sink.apply(ViewUpdate::HideDropdown { surface: previous });
        }
        let entries = self.dropdowns.entries(surface).to_vec();
        self.sink.apply(ViewUpdate::Dropdown { surface, entries });
    }

    fn close(&mut self, surface: SurfaceId) {
        if self.dropdowns.close(surface) {
            self.sink.apply(ViewUpdate::HideDropdown { surface });
        }
    }

    fn close_all(&mut self) {
        if let Some(surface) = self.dropdowns.close_all() {
            self.sink.apply(ViewUpdate::HideDropdown { surface });
        }
    }

    fn choose(&mut self, surface: SurfaceId, index: usize) {
        let Some(entry) = self.dropdowns.entry(surface, index) else {
            tracing::debug!(surface = %surface, index, "Choice outside open dropdown");
            return;
        };

        match entry.action.clone() {
            EntryAction::Fill(title) => {
                self.fill(surface, &title);
                self.close(surface);
            }
            EntryAction::Browse { filter } => {
                self.engine.cancel_pending(surface);
                self.close(surface);
                if let Some(index) = self.engine.index().cloned() {
                    let view = self.overflow.open(&index, filter.as_deref());
                    self.sink.apply(ViewUpdate::Overflow(view));
                    self.sink.apply(ViewUpdate::ScrollLocked(true));
                }
            }
            EntryAction::Nothing => {}
        }
    }

    fn fill(&mut self, surface: SurfaceId, title: &str) {
        self.engine.set_value(surface, title);
        self.sink.apply(ViewUpdate::SetInput {
            surface,
            value: title.to_string(),
        });
    }

    fn overflow_closed(&mut self) {
        self.sink.apply(ViewUpdate::CloseOverflow);
        self.sink.apply(ViewUpdate::ScrollLocked(false));
    }

    fn submit(&mut self, surface: SurfaceId) -> Vec<Command> {
        let value = self.engine.value(surface).trim().to_string();
        match surface {
            SurfaceId::Search => {
                if value.chars().count() < MIN_SEARCH_CHARS {
                    self.notice(SEARCH_TOO_SHORT);
                    return Vec::new();
                }
                self.sink.apply(ViewUpdate::Loading(true));
                vec![Command::Search {
                    query: value,
                    limit: self.config.search_limit,
                }]
            }
            SurfaceId::Recommendation => {
                if value.is_empty() {
                    self.notice(RECOMMEND_MISSING);
                    return Vec::new();
                }
                self.sink.apply(ViewUpdate::Loading(true));
                vec![Command::Recommend {
                    title: value,
                    count: self.config.recommendation_count,
                }]
            }
        }
    }

    fn complete(&mut self, completion: ApiCompletion) {
        self.sink.apply(ViewUpdate::Loading(false));
        match completion {
            ApiCompletion::Search { query, result } => match result {
                Ok(movies) => self.sink.apply(ViewUpdate::SearchResults { query, movies }),
                Err(e) => {
                    tracing::error!(error = %e, query = %query, "Error searching movies");
                    self.notice(SEARCH_FAILED);
                }
            },
            ApiCompletion::Recommend { based_on, result } => match result {
                Ok(outcome) => self
                    .sink
                    .apply(ViewUpdate::Recommendations { based_on, outcome }),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        title = %based_on,
                        "Error getting recommendations"
                    );
                    self.notice(RECOMMEND_FAILED);
                }
            },
            ApiCompletion::Trending { kind, result } => match result {
                Ok(movies) => self.sink.apply(ViewUpdate::Trending { kind, movies }),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        kind = %kind,
                        "Error loading trending movies"
                    );
                    self.notice(TRENDING_FAILED);
                }
            },
        }
    }

    fn notice(&mut self, message: &str) {
        self.sink.apply(ViewUpdate::Notice(message.to_string()));
    }
}

/// Drives a session from a channel of input events
pub struct EventLoop<S> {
    session: Session<S>,
    api: Arc<dyn MovieApi>,
    debounce: Duration,
    events: mpsc::UnboundedReceiver<InputEvent>,
    sender: mpsc::UnboundedSender<InputEvent>,
    timers: HashMap<SurfaceId, JoinHandle<()>>,
}

impl<S: RenderSink + 'static> EventLoop<S> {
    /// Creates the loop and the sender the host uses to post events
    pub fn new(
        session: Session<S>,
        api: Arc<dyn MovieApi>,
    ) -> (Self, mpsc::UnboundedSender<InputEvent>) {
        let (sender, events) = mpsc::unbounded_channel();
        let debounce = session.config().debounce();
        let event_loop = Self {
            session,
            api,
            debounce,
            events,
            sender: sender.clone(),
            timers: HashMap::new(),
        };
        (event_loop, sender)
    }

    /// Processes events until `Shutdown`, then hands the session back
    pub async fn run(mut self) -> Session<S> {
        tracing::info!(
            debounce_ms = self.debounce.as_millis() as u64,
            "Event loop started"
        );

        while let Some(event) = self.events.recv().await {
            if matches!(event, InputEvent::Shutdown) {
                break;
            }
            for command in self.session.handle(event) {
                self.dispatch(command);
            }
        }

        for (_, timer) in self.timers.drain() {
            timer.abort();
        }
        tracing::info!("Event loop stopped");

        self.session
    }

    fn dispatch(&mut self, command: Command) {
        let sender = self.sender.clone();
        match command {
            Command::Debounce(pending) => {
                let delay = self.debounce;
                let timer = tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = sender.send(InputEvent::DebounceElapsed {
                        surface: pending.surface,
                        token: pending.token,
                    });
                });
                if let Some(previous) = self.timers.insert(pending.surface, timer) {
                    previous.abort();
                }
            }
            Command::Search { query, limit } => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api.search(&query, limit).await;
                    let _ = sender.send(InputEvent::Api(ApiCompletion::Search {
                        query,
                        result,
                    }));
                });
            }
            Command::Recommend { title, count } => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api.recommend(&title, count).await;
                    let _ = sender.send(InputEvent::Api(ApiCompletion::Recommend {
                        based_on: title,
                        result,
                    }));
                });
            }
            Command::Trending { kind, limit } => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let result = api.trending(kind, limit).await;
                    let _ = sender.send(InputEvent::Api(ApiCompletion::Trending {
                        kind,
                        result,
                    }));
                });
            }
        }
    }
}
