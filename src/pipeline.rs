//! Debounced, latest-wins search pipeline.
//!
//! Every call to [`SearchPipeline::submit_query`] bumps a submission token.
//! The debounce timer and the fetch both carry the token they were started
//! with, and a result is only published if its token is still the latest one
//! when it resolves. The check and the publish happen under the same lock, so
//! observers never see a state derived from an older query than the last one
//! submitted, whatever order the fetches complete in.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::CONFIG;
use crate::fetch_client::PhotoFetcher;
use crate::view_state::{InputFocusState, ViewState};

#[derive(Default)]
struct Session {
    token: u64,
    query: String,
    focused: bool,
    closed: bool,
}

struct Shared {
    session: Mutex<Session>,
    state_tx: watch::Sender<ViewState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_current(&self, token: u64) -> bool {
        self.lock().token == token
    }

    /// Publishes `next` only while `token` is still the latest submission
    /// and the pipeline is open.
    fn publish_if_current(&self, token: u64, next: ViewState) -> bool {
        let session = self.lock();
        if session.closed || session.token != token {
            return false;
        }
        self.state_tx.send_replace(next);
        true
    }
}

pub struct SearchPipeline<F: PhotoFetcher> {
    fetcher: Arc<F>,
    shared: Arc<Shared>,
    debounce: Duration,
    shutdown: CancellationToken,
}

impl<F: PhotoFetcher> SearchPipeline<F> {
    /// Pipeline using the configured debounce window.
    pub fn new(fetcher: F) -> Self {
        Self::with_debounce(fetcher, CONFIG.debounce())
    }

    pub fn with_debounce(fetcher: F, debounce: Duration) -> Self {
        let (state_tx, _) = watch::channel(ViewState::Idle);
        Self {
            fetcher: Arc::new(fetcher),
            shared: Arc::new(Shared {
                session: Mutex::new(Session::default()),
                state_tx,
            }),
            debounce,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Receiver that always holds the latest published state.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.shared.state_tx.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.shared.state_tx.borrow().clone()
    }

    pub fn query(&self) -> String {
        self.shared.lock().query.clone()
    }

    pub fn set_focused(&self, focused: bool) {
        self.shared.lock().focused = focused;
    }

    pub fn input_state(&self) -> InputFocusState {
        let session = self.shared.lock();
        InputFocusState::derive(&session.query, session.focused)
    }

    /// Record a new query.
    ///
    /// A non-empty query publishes `Loading` right away and fetches once the
    /// debounce window passes without another submission. An empty query
    /// publishes `Idle` and fetches nothing. Either way, any older pending or
    /// in-flight fetch can no longer affect the published state.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit_query(&self, query: impl Into<String>) {
        let query = query.into();

        let token = {
            let mut session = self.shared.lock();
            if session.closed {
                log::debug!("pipeline shut down, ignoring query {query:?}");
                return;
            }
            session.token += 1;
            session.query = query.clone();
            let next = if query.is_empty() {
                ViewState::Idle
            } else {
                ViewState::Loading
            };
            self.shared.state_tx.send_replace(next);
            session.token
        };

        if !query.is_empty() {
            self.schedule(token, query);
        }
    }

    pub fn clear(&self) {
        self.submit_query(String::new());
    }

    /// Stop all pending work. Nothing is published afterwards.
    pub fn shutdown(&self) {
        self.shared.lock().closed = true;
        self.shutdown.cancel();
    }

    fn schedule(&self, token: u64, query: String) {
        let fetcher = Arc::clone(&self.fetcher);
        let shared = Arc::clone(&self.shared);
        let shutdown = self.shutdown.clone();
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = tokio::time::sleep(debounce) => {}
            }
            if !shared.is_current(token) {
                log::debug!("query {query:?} superseded during debounce");
                return;
            }

            log::info!("searching for {query:?}");
            let outcome = tokio::select! {
                _ = shutdown.cancelled() => return,
                outcome = fetcher.fetch(&query) => outcome,
            };
            let next = ViewState::from_fetch(outcome);
            let kind = next.name();

            if shared.publish_if_current(token, next) {
                log::info!("query {query:?} resolved to {kind}");
            } else {
                log::debug!("dropping stale {kind} result for {query:?}");
            }
        });
    }
}

impl<F: PhotoFetcher> Drop for SearchPipeline<F> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
