//! Debounced product search controller
//!
//! The controller owns the search state (query, results, loading, error) and
//! drives it through `Idle → Loading → Loaded | Errored`:
//! - `set_query` updates the query immediately and (re)schedules a debounced search
//! - when the debounce timer fires, one `ProductSource` call is issued
//! - the resolution replaces results (or sets the error) and is published to
//!   every `watch` subscriber
//!
//! Fetches that have already started are never cancelled. With
//! `StaleResults::Apply` every resolution is applied in completion order, so a
//! slow older fetch can overwrite newer results. `StaleResults::Discard` only
//! applies the most recent dispatch.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::debounce::Debouncer;
use crate::error::FETCH_FAILED_MESSAGE;
use crate::events::SearchEvent;
use crate::product::Product;
use crate::source::ProductSource;

/// Quiet period before a search is issued
pub const DEFAULT_DEBOUNCE_MS: u64 = 750;

/// Buffered events per subscriber before the slowest one starts lagging
const EVENT_CAPACITY: usize = 256;

/// What to do with a resolution that is no longer the latest dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaleResults {
    /// Apply every resolution as it arrives
    #[default]
    Apply,
    /// Drop resolutions superseded by a newer dispatch
    Discard,
}

/// Search state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored,
}

/// Snapshot of everything the search view renders
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: SearchPhase,
}

impl SearchState {
    /// Whether the view must be replaced by the error message
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Tunables for a controller instance
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub debounce: Duration,
    pub stale_results: StaleResults,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            stale_results: StaleResults::default(),
        }
    }
}

/// State shared between the controller and its fired searches
struct Shared {
    state: watch::Sender<SearchState>,
    events: broadcast::Sender<SearchEvent>,
    source: Arc<dyn ProductSource>,
    dispatched: AtomicU64,
    in_flight: AtomicUsize,
    stale_results: StaleResults,
}

impl Shared {
    fn emit(&self, event: SearchEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    /// Record a dispatch as soon as the timer fires, before the fetch is polled
    fn begin(&self, query: &str) -> u64 {
        let dispatch = self.dispatched.fetch_add(1, Ordering::SeqCst) + 1;
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.loading = true;
            state.phase = SearchPhase::Loading;
        });

        info!(query = %query, dispatch, "fetching products");
        self.emit(SearchEvent::FetchStarted {
            timestamp: Utc::now(),
            query: query.to_string(),
            dispatch,
        });
        dispatch
    }

    /// Await the source for one dispatch and apply the outcome
    async fn run(self: Arc<Self>, query: String, dispatch: u64) {
        let outcome = self.source.fetch_products(&query).await;

        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        let latest = self.dispatched.load(Ordering::SeqCst) == dispatch;
        let applied = latest || self.stale_results == StaleResults::Apply;

        match outcome {
            Ok(products) => {
                let count = products.len();
                self.state.send_modify(|state| {
                    if applied {
                        state.results = products;
                        state.error = None;
                    }
                    settle(state, remaining);
                });

                info!(query = %query, dispatch, results = count, applied, "fetch completed");
                self.emit(SearchEvent::FetchCompleted {
                    timestamp: Utc::now(),
                    query,
                    dispatch,
                    results: count,
                    applied,
                });
            }
            Err(err) => {
                warn!(query = %query, dispatch, error = %err, applied, "fetch failed");
                self.state.send_modify(|state| {
                    if applied {
                        state.error = Some(FETCH_FAILED_MESSAGE.to_string());
                    }
                    settle(state, remaining);
                });

                self.emit(SearchEvent::FetchFailed {
                    timestamp: Utc::now(),
                    query,
                    dispatch,
                    message: err.to_string(),
                    applied,
                });
            }
        }
    }
}

/// Recompute loading/phase after a resolution.
///
/// The error field reflects the last applied outcome: cleared on success, set
/// on failure.
fn settle(state: &mut SearchState, remaining: usize) {
    state.loading = remaining > 0;
    state.phase = if remaining > 0 {
        SearchPhase::Loading
    } else if state.error.is_some() {
        SearchPhase::Errored
    } else {
        SearchPhase::Loaded
    };
}

/// Owns the search state and the debounce timer for one search view.
///
/// Dropping the controller cancels a pending timer; fetches already in flight
/// still complete.
pub struct SearchController {
    shared: Arc<Shared>,
    debouncer: Debouncer<String>,
}

impl SearchController {
    /// Create a controller. Must be driven from within a tokio runtime.
    pub fn new(source: Arc<dyn ProductSource>, options: SearchOptions) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let shared = Arc::new(Shared {
            state,
            events,
            source,
            dispatched: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            stale_results: options.stale_results,
        });

        let worker = Arc::clone(&shared);
        let debouncer = Debouncer::new(options.debounce, move |query: String| {
            let dispatch = worker.begin(&query);
            Arc::clone(&worker).run(query, dispatch)
        });

        Self { shared, debouncer }
    }

    /// Schedule the initial search for the current (empty) query
    pub fn mount(&mut self) {
        self.submit_now();
    }

    /// Update the query text and schedule a debounced search for it
    pub fn set_query(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.shared.state.send_modify(|state| state.query = text.clone());
        self.shared.emit(SearchEvent::QueryChanged {
            timestamp: Utc::now(),
            query: text.clone(),
        });
        self.schedule(text);
    }

    /// Trigger the debounced search with the current query.
    ///
    /// Still coalesced with any trigger that follows within the delay.
    pub fn submit_now(&mut self) {
        let query = self.shared.state.borrow().query.clone();
        self.schedule(query);
    }

    fn schedule(&mut self, query: String) {
        let superseded = self.debouncer.trigger(query.clone());
        let delay_ms = self.debouncer.delay().as_millis() as u64;

        debug!(query = %query, delay_ms, superseded, "search scheduled");
        self.shared.emit(SearchEvent::TimerScheduled {
            timestamp: Utc::now(),
            query,
            delay_ms,
            superseded,
        });
    }

    /// Current state snapshot
    pub fn state(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    /// Receive every state change
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    /// Receive search events emitted from now on
    pub fn events(&self) -> broadcast::Receiver<SearchEvent> {
        self.shared.events.subscribe()
    }

    /// Wait until no search is scheduled or in flight and return the state.
    ///
    /// Returns immediately when nothing was ever scheduled.
    pub async fn settled(&self) -> SearchState {
        let mut rx = self.subscribe();
        loop {
            // Snapshot before checking the timer: a dispatch that begins
            // after this point bumps the version and wakes `changed()`
            let state = rx.borrow_and_update().clone();
            if !state.loading && !self.is_pending() {
                // The timer may have fired between the two reads
                if !rx.has_changed().unwrap_or(false) {
                    return state;
                }
                continue;
            }
            if rx.changed().await.is_err() {
                return self.state();
            }
        }
    }

    /// Number of source calls issued so far
    pub fn dispatched(&self) -> u64 {
        self.shared.dispatched.load(Ordering::SeqCst)
    }

    /// Whether a debounced search is waiting to fire
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
