//! Search and pagination controller.
//!
//! Owns the [`SearchState`] and decides when to issue a list fetch or a
//! suggestion lookup. Every change of page, name, or ingredients issues a
//! list fetch; name keystrokes additionally feed a debounced suggestion
//! lookup.
//!
//! # Ordering
//!
//! List fetches are tagged with tickets from a [`RequestSequencer`].
//! Issuing a fetch aborts the previous fetch task, and a fetch that
//! completes with a ticket other than the latest is discarded without
//! touching state, so the last *issued* request always wins.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::debounce::Debouncer;
use super::sequencer::RequestSequencer;
use crate::api::DishSource;
use crate::config::ExplorerConfig;
use crate::domain::{EventBus, FetchTrigger, Pagination, SearchState, ViewEvent, ViewSnapshot};

/// Tunables of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Page size used for offsets and page counts.
    pub pagination: Pagination,
    /// Quiet window of the suggestion debouncer.
    pub suggestion_debounce: Duration,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            pagination: Pagination::default(),
            suggestion_debounce: Duration::from_millis(300),
        }
    }
}

impl From<&ExplorerConfig> for ControllerSettings {
    fn from(config: &ExplorerConfig) -> Self {
        Self {
            pagination: Pagination::new(config.page_limit),
            suggestion_debounce: config.suggestion_debounce,
        }
    }
}

/// Shared part of the controller, reachable from spawned fetch tasks.
struct Inner<S> {
    source: Arc<S>,
    pagination: Pagination,
    state: RwLock<SearchState>,
    sequencer: RequestSequencer,
    list_task: Mutex<Option<JoinHandle<()>>>,
    event_bus: EventBus,
}

/// View controller for the dish listing.
///
/// All methods take `&self`; state sits behind one lock. Must be used
/// from within a tokio runtime since fetches run on spawned tasks.
/// Dropping the controller cancels the pending suggestion lookup and the
/// in-flight list fetch.
pub struct SearchController<S: DishSource> {
    inner: Arc<Inner<S>>,
    debouncer: Debouncer,
}

impl<S: DishSource> fmt::Debug for SearchController<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchController")
            .field("pagination", &self.inner.pagination)
            .field("latest_ticket", &self.inner.sequencer.latest())
            .field("debouncer", &self.debouncer)
            .finish_non_exhaustive()
    }
}

impl<S: DishSource> SearchController<S> {
    /// Creates a controller in its initial state: page 1, empty searches,
    /// `loading` set until the first fetch completes.
    #[must_use]
    pub fn new(source: Arc<S>, settings: ControllerSettings, event_bus: EventBus) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                pagination: settings.pagination,
                state: RwLock::new(SearchState::default()),
                sequencer: RequestSequencer::new(),
                list_task: Mutex::new(None),
                event_bus,
            }),
            debouncer: Debouncer::new(settings.suggestion_debounce),
        }
    }

    /// The bus view events are published on.
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.inner.event_bus
    }

    /// Returns an owned copy of the current view state.
    pub async fn snapshot(&self) -> ViewSnapshot {
        self.inner.state.read().await.snapshot(&self.inner.pagination)
    }

    /// Issues the initial list fetch.
    pub async fn mount(&self) {
        let mut state = self.inner.state.write().await;
        tracing::info!(page = state.page, "mounting dish listing");
        Inner::issue_list_fetch(&self.inner, &mut state, FetchTrigger::Mount);
    }

    /// Re-issues the list fetch for the current state.
    pub async fn refresh(&self) {
        let mut state = self.inner.state.write().await;
        Inner::issue_list_fetch(&self.inner, &mut state, FetchTrigger::Refresh);
    }

    /// Handles a keystroke in the name search field.
    ///
    /// Issues a list fetch if the text changed, then routes the text to
    /// the suggestion lookup: blank text clears and hides suggestions at
    /// once, anything else is debounced.
    pub async fn set_name_search(&self, text: &str) {
        {
            let mut state = self.inner.state.write().await;
            if state.set_name_search(text) {
                Inner::issue_list_fetch(&self.inner, &mut state, FetchTrigger::NameChanged);
            }
        }
        self.lookup_suggestions(text).await;
    }

    /// Handles a change of the ingredient search field.
    pub async fn set_ingredient_search(&self, text: &str) {
        let mut state = self.inner.state.write().await;
        if state.set_ingredient_search(text) {
            Inner::issue_list_fetch(&self.inner, &mut state, FetchTrigger::IngredientsChanged);
        }
    }

    /// Accepts a suggestion: sets it as the name search and closes the
    /// suggestion list. The name change issues a list fetch; no new
    /// suggestion lookup is made.
    pub async fn select_suggestion(&self, suggestion: &str) {
        self.debouncer.cancel();
        let mut state = self.inner.state.write().await;
        state.show_suggestions = false;
        self.inner.publish_suggestions(&state);
        if state.set_name_search(suggestion) {
            Inner::issue_list_fetch(&self.inner, &mut state, FetchTrigger::NameChanged);
        }
    }

    /// Steps to the next page. Returns `false`, without fetching, when
    /// already on the last page.
    pub async fn next_page(&self) -> bool {
        let mut state = self.inner.state.write().await;
        let moved = state.next_page(&self.inner.pagination);
        if moved {
            Inner::issue_list_fetch(&self.inner, &mut state, FetchTrigger::PageChanged);
        }
        moved
    }

    /// Steps to the previous page. Returns `false`, without fetching, when
    /// already on page 1.
    pub async fn previous_page(&self) -> bool {
        let mut state = self.inner.state.write().await;
        let moved = state.previous_page(&self.inner.pagination);
        if moved {
            Inner::issue_list_fetch(&self.inner, &mut state, FetchTrigger::PageChanged);
        }
        moved
    }

    /// Waits until no list fetch is in flight.
    pub async fn settle(&self) {
        loop {
            let handle = self.inner.list_slot().take();
            let Some(handle) = handle else {
                break;
            };
            if let Err(e) = handle.await
                && e.is_panic()
            {
                tracing::error!(error = %e, "list fetch task panicked");
            }
        }
    }

    /// Cancels the pending suggestion lookup and the in-flight list fetch.
    pub fn shutdown(&self) {
        self.debouncer.cancel();
        let task = self.inner.list_slot().take();
        if let Some(task) = task {
            task.abort();
        }
    }

    async fn lookup_suggestions(&self, text: &str) {
        let query = text.trim();
        if query.is_empty() {
            self.debouncer.cancel();
            let mut state = self.inner.state.write().await;
            state.clear_suggestions();
            self.inner.publish_suggestions(&state);
            return;
        }

        let inner = Arc::clone(&self.inner);
        let query = query.to_string();
        self.debouncer.call(async move {
            inner.run_suggestion_lookup(query).await;
        });
    }
}

impl<S: DishSource> Drop for SearchController<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<S: DishSource> Inner<S> {
    fn list_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.list_task.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Spawns a list fetch for the state as it will be when the task runs.
    ///
    /// Called with the state lock held so ticket order, `loading`, and the
    /// task slot always agree.
    fn issue_list_fetch(this: &Arc<Self>, state: &mut SearchState, trigger: FetchTrigger) {
        let ticket = this.sequencer.issue();
        state.loading = true;

        let inner = Arc::clone(this);
        let handle = tokio::spawn(async move {
            inner.run_list_fetch(ticket).await;
        });
        let previous = this.list_slot().replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }

        tracing::debug!(ticket, page = state.page, ?trigger, "list fetch issued");
        this.event_bus.publish(ViewEvent::ListRequested {
            ticket,
            page: state.page,
            trigger,
            timestamp: Utc::now(),
        });
    }

    async fn run_list_fetch(self: Arc<Self>, mut ticket: u64) {
        loop {
            let (skip, name, ingredients) = {
                let state = self.state.read().await;
                (
                    self.pagination.skip_for(state.page),
                    state.name_search.clone(),
                    state.ingredient_search.clone(),
                )
            };

            let outcome = self.source.fetch_list(skip, &name, &ingredients).await;

            let mut state = self.state.write().await;
            if !self.sequencer.is_latest(ticket) {
                tracing::debug!(ticket, "discarding superseded list response");
                return;
            }

            match outcome {
                Ok(results) => {
                    let returned = results.dishes.len();
                    if state.apply_results(results, &self.pagination) {
                        ticket = self.sequencer.issue();
                        tracing::debug!(ticket, page = state.page, "page clamped, refetching");
                        self.event_bus.publish(ViewEvent::ListRequested {
                            ticket,
                            page: state.page,
                            trigger: FetchTrigger::PageClamped,
                            timestamp: Utc::now(),
                        });
                        continue;
                    }

                    state.loading = false;
                    let total_count = state.results.total_count;
                    let total_pages = self.pagination.total_pages(total_count);
                    tracing::info!(
                        ticket,
                        page = state.page,
                        total_pages,
                        total_count,
                        "dishes loaded"
                    );
                    self.event_bus.publish(ViewEvent::ListLoaded {
                        ticket,
                        page: state.page,
                        total_pages,
                        total_count,
                        returned,
                        timestamp: Utc::now(),
                    });
                }
                Err(e) => {
                    state.loading = false;
                    state.last_error = Some(e.to_string());
                    tracing::error!(
                        ticket,
                        error = %e,
                        kind = e.kind(),
                        status = ?e.status_code(),
                        "error fetching dishes"
                    );
                    self.event_bus.publish(ViewEvent::ListFailed {
                        ticket,
                        message: e.to_string(),
                        timestamp: Utc::now(),
                    });
                }
            }
            return;
        }
    }

    async fn run_suggestion_lookup(&self, query: String) {
        match self.source.fetch_suggestions(&query).await {
            Ok(suggestions) => {
                let mut state = self.state.write().await;
                tracing::debug!(%query, count = suggestions.len(), "suggestions received");
                state.set_suggestions(suggestions);
                self.publish_suggestions(&state);
            }
            Err(e) => {
                tracing::warn!(
                    %query,
                    error = %e,
                    kind = e.kind(),
                    status = ?e.status_code(),
                    "error fetching suggestions"
                );
            }
        }
    }

    fn publish_suggestions(&self, state: &SearchState) {
        self.event_bus.publish(ViewEvent::SuggestionsChanged {
            suggestions: state.suggestions.clone(),
            visible: state.show_suggestions,
            timestamp: Utc::now(),
        });
    }
}
