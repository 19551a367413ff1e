//! The generic list controller.
//!
//! One [`ListController`] instance backs one table view. It owns the filter
//! state, debounces free-text search edits, issues one backend query per
//! accepted filter change, tags every query with a generation so a slow
//! stale response can never overwrite a fresh one, and degrades to the
//! resource's seed dataset when the backend fails.
//!
//! State is observable through a `watch` channel (or polled via
//! [`ListController::state`]); per-outcome notifications go out on a
//! `broadcast` channel so the embedding UI owns all presentation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tracing::{debug, warn};

use teller_core::Pagination;

use crate::config::Config;
use crate::debounce::Debouncer;
use crate::envelope::{self, Listing};
use crate::error::{Error, Result};
use crate::fallback;
use crate::filters::{FilterPatch, Filters};
use crate::resources::Resource;
use crate::source::Source;

/// Debounce map key for the search field.
const SEARCH_KEY: &str = "search";

/// Lifecycle phase of a list view.
///
/// `Success` and `Degraded` are the two terminal phases of one fetch
/// generation; every accepted filter change passes through `Loading` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Degraded,
}

/// Snapshot of one list view's state.
///
/// `items` and `pagination` stay populated in `Degraded`, so a view can
/// show rows and an error banner at the same time.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub phase: Phase,
    pub items: Vec<T>,
    pub loading: bool,
    /// Human-readable failure message; never a raw error object.
    pub error: Option<String>,
    pub pagination: Pagination,
}

impl<T> ListState<T> {
    fn idle(limit: u32) -> Self {
        Self {
            phase: Phase::Idle,
            items: Vec::new(),
            loading: false,
            error: None,
            pagination: Pagination::derive(0, 1, limit),
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Structured notification emitted once per fetch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Query controller for one table view of resource `R`.
///
/// Constructing the controller issues the initial fetch, mirroring a table
/// mount. Each instance exclusively owns its filter state; nothing is
/// shared between controllers except the read-only seed datasets.
pub struct ListController<R: Resource> {
    inner: Arc<Inner<R>>,
}

struct Inner<R: Resource> {
    source: Arc<dyn Source>,
    filters: Mutex<Filters<R::Facets>>,
    /// Monotonic request generation. A response is applied iff its
    /// generation still equals this counter at arrival time.
    generation: AtomicU64,
    closed: AtomicBool,
    /// Serializes generation checks against state application so a stale
    /// response can never slip in between a newer request's increment and
    /// its Loading transition.
    apply: Mutex<()>,
    debounce: Debouncer,
    search_delay: Duration,
    state: watch::Sender<ListState<R::Item>>,
    notices: broadcast::Sender<Notice>,
}

impl<R: Resource> ListController<R> {
    /// Create a controller with defaults from `config` and fetch the first
    /// page. Must be called within a tokio runtime.
    pub fn new(source: Arc<dyn Source>, config: &Config) -> Self {
        Self::with_filters(
            source,
            Filters::new(config.list.page_size),
            config.search_debounce(),
        )
    }

    /// Create a controller with explicit default filters and search
    /// debounce delay, and fetch the first page.
    pub fn with_filters(
        source: Arc<dyn Source>,
        defaults: Filters<R::Facets>,
        search_delay: Duration,
    ) -> Self {
        let (state, _) = watch::channel(ListState::idle(defaults.limit));
        let (notices, _) = broadcast::channel(32);

        let inner = Arc::new(Inner {
            source,
            filters: Mutex::new(defaults),
            generation: AtomicU64::new(0),
            closed: AtomicBool::new(false),
            apply: Mutex::new(()),
            debounce: Debouncer::new(),
            search_delay,
            state,
            notices,
        });

        inner.spawn_refresh();
        Self { inner }
    }

    /// Current state snapshot.
    pub fn state(&self) -> ListState<R::Item> {
        self.inner.state.borrow().clone()
    }

    /// Watch state changes. The receiver starts at the current snapshot.
    pub fn watch_state(&self) -> watch::Receiver<ListState<R::Item>> {
        self.inner.state.subscribe()
    }

    /// Subscribe to per-outcome notifications.
    pub fn subscribe_notices(&self) -> broadcast::Receiver<Notice> {
        self.inner.notices.subscribe()
    }

    /// Current filter snapshot.
    pub fn filters(&self) -> Filters<R::Facets> {
        self.inner.filters.lock().unwrap().clone()
    }

    /// Merge a filter patch and fetch immediately.
    ///
    /// Changing any key other than `page` resets `page` to 1 unless the
    /// patch sets `page` explicitly (see [`Filters::apply`]).
    pub fn set_filters(&self, patch: FilterPatch<R::Facets>) {
        self.inner.update(patch);
    }

    /// Replace the search string after the debounce delay.
    ///
    /// Rapid successive calls collapse into one fetch carrying the final
    /// text; the pending edit is discarded if the controller shuts down
    /// before the delay elapses.
    pub fn set_search(&self, text: impl Into<String>) {
        let text = text.into();
        let inner = Arc::downgrade(&self.inner);
        self.inner
            .debounce
            .schedule(SEARCH_KEY, self.inner.search_delay, move || {
                if let Some(inner) = inner.upgrade() {
                    inner.update(FilterPatch::search(text));
                }
            });
    }

    /// Re-issue the current filters unchanged under a new generation.
    /// Resolves once the outcome has been applied (or dropped as stale).
    pub async fn refetch(&self) {
        if let Some((generation, filters)) = self.inner.begin() {
            self.inner.run(generation, filters).await;
        }
    }

    /// Tear the controller down: cancel pending debounce timers and abandon
    /// every outstanding request generation. Idempotent.
    pub fn shutdown(&self) {
        let _guard = self.inner.apply.lock().unwrap();
        self.inner.closed.store(true, Ordering::SeqCst);
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        drop(_guard);
        self.inner.debounce.cancel_all();
    }
}

impl<R: Resource> Drop for ListController<R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<R: Resource> Inner<R> {
    fn update(self: &Arc<Self>, patch: FilterPatch<R::Facets>) {
        self.filters.lock().unwrap().apply(&patch);
        self.spawn_refresh();
    }

    fn spawn_refresh(self: &Arc<Self>) {
        if let Some((generation, filters)) = self.begin() {
            let inner = Arc::clone(self);
            tokio::spawn(async move {
                inner.run(generation, filters).await;
            });
        }
    }

    /// Open a new request generation and enter `Loading`.
    fn begin(&self) -> Option<(u64, Filters<R::Facets>)> {
        let _guard = self.apply.lock().unwrap();
        if self.closed.load(Ordering::SeqCst) {
            return None;
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let filters = self.filters.lock().unwrap().clone();

        self.state.send_modify(|s| {
            s.phase = Phase::Loading;
            s.loading = true;
            s.error = None;
        });

        Some((generation, filters))
    }

    /// Execute one generation: query, then apply the outcome unless a newer
    /// generation superseded it while the request was in flight.
    async fn run(&self, generation: u64, filters: Filters<R::Facets>) {
        let outcome = self.query(&filters).await;

        let _guard = self.apply.lock().unwrap();
        if self.generation.load(Ordering::SeqCst) != generation {
            // A newer request owns the view now; its outcome (not ours)
            // clears `loading`.
            debug!(
                resource = R::NAME,
                generation, "dropping stale response"
            );
            return;
        }

        match outcome {
            Ok(listing) => {
                let count = listing.items.len();
                self.state.send_modify(|s| {
                    s.phase = Phase::Success;
                    s.items = listing.items;
                    s.pagination = listing.pagination;
                    s.loading = false;
                    s.error = None;
                });
                let _ = self
                    .notices
                    .send(Notice::info(format!("loaded {count} {}", R::NAME)));
            }
            Err(err) => {
                let message = err.to_string();
                warn!(resource = R::NAME, %message, "query failed, degrading to seed data");

                let listing = fallback::degrade::<R>(&filters);
                self.state.send_modify(|s| {
                    s.phase = Phase::Degraded;
                    s.items = listing.items;
                    s.pagination = listing.pagination;
                    s.loading = false;
                    s.error = Some(message.clone());
                });
                let _ = self.notices.send(Notice::error(message));
            }
        }
    }

    async fn query(&self, filters: &Filters<R::Facets>) -> Result<Listing<R::Item>> {
        let pairs = filters.query_pairs();
        let raw = self.source.fetch(R::BASE_PATH, &pairs).await?;

        if let Some(message) = envelope::application_failure(&raw) {
            return Err(Error::Application(message));
        }
        envelope::normalize(&raw)
    }
}
