//! Debounced incremental search.
//!
//! One [`SearchController`] runs per browser session as its own task. Input
//! events restart a debounce timer; when the timer fires the latest input is
//! either rejected locally (empty or too short) or sent to the provider.
//! Requests are fire-and-forget and carry a sequence number, so a response
//! is shown only while no newer request (or dismissal) has happened since.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant},
};

use crate::{
    config::Config,
    error::AppResult,
    models::{NavigationState, SearchResult, SearchView},
    services::{
        providers::MetadataProvider,
        render::{Presenter, HINT_MESSAGE, LOADING_MESSAGE, SEARCH_FAILED_MESSAGE},
    },
};

const EVENT_BUFFER: usize = 64;
const UPDATE_BUFFER: usize = 16;

/// Tuning for the search box
#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub min_chars: usize,
    pub debounce: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SearchSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            min_chars: config.search_min_chars,
            debounce: config.search_debounce(),
        }
    }
}

/// What to do with the input once the user pauses typing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPlan {
    /// Nothing typed: remove the dropdown
    Clear,
    /// Too short to be worth a request
    Hint,
    Search(String),
}

/// Characters are counted as Unicode scalar values after trimming.
pub fn plan_query(raw: &str, min_chars: usize) -> QueryPlan {
    let query = raw.trim();
    if query.is_empty() {
        QueryPlan::Clear
    } else if query.chars().count() < min_chars {
        QueryPlan::Hint
    } else {
        QueryPlan::Search(query.to_string())
    }
}

/// Gestures coming from the page
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Current value of the search box
    Input(String),
    /// Escape key or a click outside the results
    Dismiss,
    /// A result card was clicked
    Select(NavigationState),
}

/// Instructions for the page
#[derive(Debug, Clone, PartialEq)]
pub enum SearchUpdate {
    View(SearchView),
    Navigate(String),
}

/// Sequence numbers of initiated requests.
///
/// Only the most recent number is current; bumping it without starting a
/// request invalidates everything still in flight.
#[derive(Debug, Default)]
struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    fn invalidate(&mut self) {
        self.latest += 1;
    }

    fn is_current(&self, seq: u64) -> bool {
        seq == self.latest
    }
}

struct SearchReply {
    seq: u64,
    query: String,
    result: AppResult<Vec<SearchResult>>,
}

/// Channels of a running search session
pub struct SearchHandle {
    pub events: mpsc::Sender<SearchEvent>,
    pub updates: mpsc::Receiver<SearchUpdate>,
    pub task: JoinHandle<()>,
}

pub struct SearchController {
    provider: Arc<dyn MetadataProvider>,
    presenter: Presenter,
    settings: SearchSettings,
}

impl SearchController {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        presenter: Presenter,
        settings: SearchSettings,
    ) -> Self {
        Self {
            provider,
            presenter,
            settings,
        }
    }

    /// Start the session on its own task
    pub fn spawn(self) -> SearchHandle {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (update_tx, update_rx) = mpsc::channel(UPDATE_BUFFER);
        let task = tokio::spawn(self.run(event_rx, update_tx));

        SearchHandle {
            events: event_tx,
            updates: update_rx,
            task,
        }
    }

    /// Session loop. Returns once the event stream closes or the page stops
    /// listening for updates.
    pub async fn run(
        self,
        mut events: mpsc::Receiver<SearchEvent>,
        updates: mpsc::Sender<SearchUpdate>,
    ) {
        let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<SearchReply>();
        let mut sequence = RequestSequence::default();
        let mut pending: Option<String> = None;

        let debounce = time::sleep(self.settings.debounce);
        tokio::pin!(debounce);

        loop {
            let update = tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    match event {
                        SearchEvent::Input(value) => {
                            pending = Some(value);
                            debounce
                                .as_mut()
                                .reset(Instant::now() + self.settings.debounce);
                            continue;
                        }
                        SearchEvent::Dismiss => {
                            pending = None;
                            sequence.invalidate();
                            SearchUpdate::View(SearchView::Hidden)
                        }
                        SearchEvent::Select(target) => SearchUpdate::Navigate(target.watch_url()),
                    }
                }
                () = &mut debounce, if pending.is_some() => {
                    let Some(raw) = pending.take() else { continue };
                    SearchUpdate::View(self.submit(&raw, &mut sequence, &reply_tx))
                }
                Some(reply) = reply_rx.recv() => {
                    if !sequence.is_current(reply.seq) {
                        tracing::debug!(
                            seq = reply.seq,
                            query = %reply.query,
                            "Discarding stale search response"
                        );
                        continue;
                    }
                    SearchUpdate::View(self.present(reply))
                }
            };

            if updates.send(update).await.is_err() {
                tracing::debug!("Search page stopped listening");
                break;
            }
        }

        tracing::debug!(requests = sequence.latest, "Search session closed");
    }

    fn submit(
        &self,
        raw: &str,
        sequence: &mut RequestSequence,
        reply_tx: &mpsc::UnboundedSender<SearchReply>,
    ) -> SearchView {
        match plan_query(raw, self.settings.min_chars) {
            QueryPlan::Clear => {
                sequence.invalidate();
                SearchView::Hidden
            }
            QueryPlan::Hint => {
                sequence.invalidate();
                SearchView::hint(HINT_MESSAGE)
            }
            QueryPlan::Search(query) => {
                let seq = sequence.begin();
                let provider = Arc::clone(&self.provider);
                let reply_tx = reply_tx.clone();

                tracing::debug!(seq, query = %query, "Dispatching search request");
                tokio::spawn(async move {
                    let result = provider.search_multi(&query).await;
                    // The session may be gone already; its reply is simply dropped.
                    let _ = reply_tx.send(SearchReply { seq, query, result });
                });

                SearchView::loading(LOADING_MESSAGE)
            }
        }
    }

    fn present(&self, reply: SearchReply) -> SearchView {
        match reply.result {
            Ok(results) => self.presenter.search_view(&results),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    query = %reply.query,
                    provider = self.provider.name(),
                    "Search failed"
                );
                SearchView::message(SEARCH_FAILED_MESSAGE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        models::{ContentDetail, MediaType},
        services::render::EMPTY_MESSAGE,
    };
    use std::{collections::HashMap, sync::Mutex};
    use tokio::sync::mpsc::error::TryRecvError;

    /// Provider with per-query latency that records every call
    #[derive(Default)]
    struct ScriptedProvider {
        calls: Mutex<Vec<String>>,
        delays: HashMap<String, Duration>,
        fail: bool,
    }

    impl ScriptedProvider {
        fn with_delay(mut self, query: &str, delay: Duration) -> Self {
            self.delays.insert(query.to_string(), delay);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl MetadataProvider for ScriptedProvider {
        async fn search_multi(&self, query: &str) -> AppResult<Vec<SearchResult>> {
            self.calls.lock().unwrap().push(query.to_string());
            let delay = self
                .delays
                .get(query)
                .copied()
                .unwrap_or(Duration::from_millis(50));
            time::sleep(delay).await;

            if self.fail {
                return Err(AppError::ExternalApi {
                    status: 500,
                    message: "boom".to_string(),
                });
            }

            Ok(vec![
                SearchResult {
                    id: Some(603),
                    media_type: Some("movie".to_string()),
                    title: Some(query.to_string()),
                    ..SearchResult::default()
                },
                SearchResult {
                    id: Some(6384),
                    media_type: Some("person".to_string()),
                    name: Some("Keanu Reeves".to_string()),
                    ..SearchResult::default()
                },
            ])
        }

        async fn fetch_detail(&self, _: MediaType, _: &str) -> AppResult<ContentDetail> {
            unreachable!("search sessions never fetch details")
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn start(provider: Arc<ScriptedProvider>) -> SearchHandle {
        SearchController::new(
            provider,
            Presenter::new("https://img.example", "/placeholder.svg", "Cinescope"),
            SearchSettings::default(),
        )
        .spawn()
    }

    async fn next_view(handle: &mut SearchHandle) -> SearchView {
        match handle.updates.recv().await {
            Some(SearchUpdate::View(view)) => view,
            other => panic!("expected a view update, got {:?}", other),
        }
    }

    fn result_titles(view: &SearchView) -> Vec<String> {
        match view {
            SearchView::Results { cards } => cards.iter().map(|c| c.title.clone()).collect(),
            other => panic!("expected results, got {:?}", other),
        }
    }

    async fn input(handle: &SearchHandle, value: &str) {
        handle
            .events
            .send(SearchEvent::Input(value.to_string()))
            .await
            .unwrap();
    }

    #[test]
    fn test_plan_query() {
        assert_eq!(plan_query("   ", 3), QueryPlan::Clear);
        assert_eq!(plan_query(" ma ", 3), QueryPlan::Hint);
        assert_eq!(plan_query(" mat ", 3), QueryPlan::Search("mat".to_string()));
        assert_eq!(plan_query("été", 3), QueryPlan::Search("été".to_string()));
        assert_eq!(plan_query("日本", 3), QueryPlan::Hint);
    }

    #[test]
    fn test_request_sequence() {
        let mut sequence = RequestSequence::default();
        let first = sequence.begin();
        assert!(sequence.is_current(first));

        let second = sequence.begin();
        assert!(!sequence.is_current(first));
        assert!(sequence.is_current(second));

        sequence.invalidate();
        assert!(!sequence.is_current(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_input_shows_hint_without_request() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut handle = start(provider.clone());

        input(&handle, "ma").await;
        assert_eq!(next_view(&mut handle).await, SearchView::hint(HINT_MESSAGE));

        time::sleep(Duration::from_secs(2)).await;
        assert!(provider.calls().is_empty());
        assert!(matches!(handle.updates.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_hides_dropdown() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut handle = start(provider.clone());

        input(&handle, "   ").await;
        assert_eq!(next_view(&mut handle).await, SearchView::Hidden);
        assert!(provider.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_inside_debounce_window_cancels_pending_input() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut handle = start(provider.clone());

        input(&handle, "matrix").await;
        time::sleep(Duration::from_millis(100)).await;
        handle.events.send(SearchEvent::Dismiss).await.unwrap();
        assert_eq!(next_view(&mut handle).await, SearchView::Hidden);

        time::sleep(Duration::from_secs(1)).await;
        assert!(provider.calls().is_empty());
        assert!(matches!(handle.updates.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_default_settings_follow_config_defaults() {
        let config = Config::default();
        let settings = SearchSettings::default();
        assert_eq!(settings.min_chars, config.search_min_chars);
        assert_eq!(settings.debounce, config.search_debounce());
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_of_keystrokes_fires_one_request() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut handle = start(provider.clone());

        for value in ["m", "ma", "mat", "matr", "matri"] {
            input(&handle, value).await;
            time::sleep(Duration::from_millis(150)).await;
        }
        input(&handle, "matrix").await;

        assert_eq!(
            next_view(&mut handle).await,
            SearchView::loading(LOADING_MESSAGE)
        );
        let view = next_view(&mut handle).await;
        assert_eq!(result_titles(&view), vec!["matrix"]);
        assert_eq!(provider.calls(), vec!["matrix"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_request_per_debounce_window() {
        let provider = Arc::new(ScriptedProvider::default());
        let mut handle = start(provider.clone());

        input(&handle, "alien").await;
        assert_eq!(next_view(&mut handle).await, SearchView::loading(LOADING_MESSAGE));
        next_view(&mut handle).await;

        input(&handle, "aliens").await;
        assert_eq!(next_view(&mut handle).await, SearchView::loading(LOADING_MESSAGE));
        let view = next_view(&mut handle).await;

        assert_eq!(result_titles(&view), vec!["aliens"]);
        assert_eq!(provider.calls(), vec!["alien", "aliens"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .with_delay("matr", Duration::from_secs(2))
                .with_delay("matrix", Duration::from_millis(10)),
        );
        let mut handle = start(provider.clone());

        input(&handle, "matr").await;
        assert_eq!(next_view(&mut handle).await, SearchView::loading(LOADING_MESSAGE));

        input(&handle, "matrix").await;
        assert_eq!(next_view(&mut handle).await, SearchView::loading(LOADING_MESSAGE));
        let view = next_view(&mut handle).await;
        assert_eq!(result_titles(&view), vec!["matrix"]);

        // "matr" resolves long after "matrix" and must not overwrite it.
        time::sleep(Duration::from_secs(5)).await;
        assert!(matches!(handle.updates.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(provider.calls(), vec!["matr", "matrix"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_drops_in_flight_response() {
        let provider =
            Arc::new(ScriptedProvider::default().with_delay("matrix", Duration::from_secs(1)));
        let mut handle = start(provider.clone());

        input(&handle, "matrix").await;
        assert_eq!(next_view(&mut handle).await, SearchView::loading(LOADING_MESSAGE));

        handle.events.send(SearchEvent::Dismiss).await.unwrap();
        assert_eq!(next_view(&mut handle).await, SearchView::Hidden);

        time::sleep(Duration::from_secs(3)).await;
        assert!(matches!(handle.updates.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hint_supersedes_in_flight_request() {
        let provider =
            Arc::new(ScriptedProvider::default().with_delay("matrix", Duration::from_secs(1)));
        let mut handle = start(provider.clone());

        input(&handle, "matrix").await;
        assert_eq!(next_view(&mut handle).await, SearchView::loading(LOADING_MESSAGE));

        input(&handle, "ma").await;
        assert_eq!(next_view(&mut handle).await, SearchView::hint(HINT_MESSAGE));

        time::sleep(Duration::from_secs(3)).await;
        assert!(matches!(handle.updates.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_shows_error_message() {
        let provider = Arc::new(ScriptedProvider {
            fail: true,
            ..ScriptedProvider::default()
        });
        let mut handle = start(provider);

        input(&handle, "matrix").await;
        assert_eq!(next_view(&mut handle).await, SearchView::loading(LOADING_MESSAGE));
        assert_eq!(
            next_view(&mut handle).await,
            SearchView::message(SEARCH_FAILED_MESSAGE)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_unsupported_items_shows_empty_state() {
        struct PeopleOnly;

        #[async_trait::async_trait]
        impl MetadataProvider for PeopleOnly {
            async fn search_multi(&self, _: &str) -> AppResult<Vec<SearchResult>> {
                Ok(vec![SearchResult {
                    id: Some(6384),
                    media_type: Some("person".to_string()),
                    ..SearchResult::default()
                }])
            }

            async fn fetch_detail(&self, _: MediaType, _: &str) -> AppResult<ContentDetail> {
                unreachable!()
            }

            fn name(&self) -> &'static str {
                "people"
            }
        }

        let mut handle = SearchController::new(
            Arc::new(PeopleOnly),
            Presenter::new("https://img.example", "/placeholder.svg", "Cinescope"),
            SearchSettings::default(),
        )
        .spawn();

        input(&handle, "keanu").await;
        assert_eq!(next_view(&mut handle).await, SearchView::loading(LOADING_MESSAGE));
        assert_eq!(next_view(&mut handle).await, SearchView::message(EMPTY_MESSAGE));
    }

    #[tokio::test]
    async fn test_select_navigates_to_watch_page() {
        let mut handle = start(Arc::new(ScriptedProvider::default()));

        handle
            .events
            .send(SearchEvent::Select(NavigationState::new("603", MediaType::Movie)))
            .await
            .unwrap();

        assert_eq!(
            handle.updates.recv().await,
            Some(SearchUpdate::Navigate("/watch?id=603&type=movie".to_string()))
        );
    }

    #[tokio::test]
    async fn test_session_ends_when_events_close() {
        let SearchHandle {
            events,
            updates: _updates,
            task,
        } = start(Arc::new(ScriptedProvider::default()));

        drop(events);
        tokio_test::assert_ok!(task.await);
    }
}
