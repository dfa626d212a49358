//! Session Store
//!
//! Owns the application state and applies every action to it as a single
//! step on a `tokio::sync::watch` channel. Views subscribe to snapshots
//! instead of touching shared memory.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;

use super::error::{StoreError, StoreResult};
use super::state::{AppState, Screen};
use crate::models::{ChatSession, Dashboard, HistoryEntry, Message, SessionId};

/// Default number of sessions kept before the oldest is evicted
pub const DEFAULT_MAX_SESSIONS: usize = 3;

/// Configuration for the session store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Sessions retained; creating one past this evicts the oldest
    pub max_sessions: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

/// What a finished request does to the session's dashboard
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DashboardUpdate {
    /// Replace the current dashboard with the reply's (possibly none)
    Replace(Option<Dashboard>),
    /// Leave the current dashboard as it is
    Keep,
}

/// Which session a conversation turn goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TurnTarget {
    /// This session, if it still exists
    Session(SessionId),
    /// The active session, or a new one titled after the message
    ActiveOrNew,
}

impl From<SessionId> for TurnTarget {
    fn from(id: SessionId) -> Self {
        TurnTarget::Session(id)
    }
}

/// Result of trying to start a conversation turn
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RequestStart {
    /// Turn started in this session; carries the history that preceded the
    /// new message
    Started(SessionId, Vec<HistoryEntry>),
    /// Another reply is pending
    Busy,
    /// No such session
    Missing,
}

/// Holds chat sessions, the active session pointer and UI flags.
///
/// Cloning is cheap; all clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<AppState>>,
    /// Last id handed out, so ids stay strictly increasing
    last_id: Arc<AtomicI64>,
    config: StoreConfig,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl SessionStore {
    /// Create an empty store showing the landing screen
    pub fn new(config: StoreConfig) -> Self {
        let (tx, _rx) = watch::channel(AppState::default());

        Self {
            tx: Arc::new(tx),
            last_id: Arc::new(AtomicI64::new(0)),
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AppState {
        self.tx.borrow().clone()
    }

    /// Receive a new snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.tx.subscribe()
    }

    /// Sessions, newest first
    pub fn sessions(&self) -> Vec<ChatSession> {
        self.tx.borrow().sessions.clone()
    }

    pub fn session(&self, id: SessionId) -> Option<ChatSession> {
        self.tx.borrow().session(id).cloned()
    }

    /// The session currently displayed, if any
    pub fn active_session(&self) -> Option<ChatSession> {
        self.tx.borrow().active_session().cloned()
    }

    pub fn active_id(&self) -> Option<SessionId> {
        self.tx.borrow().active
    }

    pub fn screen(&self) -> Screen {
        self.tx.borrow().screen()
    }

    pub fn is_awaiting_response(&self) -> bool {
        self.tx.borrow().awaiting_response()
    }

    pub fn input(&self) -> String {
        self.tx.borrow().input.clone()
    }

    /// Replace the input bar text
    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        self.tx.send_if_modified(|state| {
            if state.input == text {
                return false;
            }
            state.input = text;
            true
        });
    }

    /// Start a new session for `prompt`.
    ///
    /// An empty prompt creates nothing: it clears the active pointer and
    /// switches to the suggestion view. Otherwise the new session goes to the
    /// front of the list, the list is cut to the configured cap, and the new
    /// session becomes active.
    pub fn create_session(&self, prompt: &str) -> Option<SessionId> {
        if prompt.is_empty() {
            self.tx.send_modify(|state| {
                state.active = None;
                state.show_landing = false;
            });
            tracing::debug!("Cleared active session for suggestion view");
            return None;
        }

        let id = self.next_id();
        let session = ChatSession::new(id, prompt);
        let max_sessions = self.max_sessions();

        self.tx.send_modify(|state| insert_session(state, session, max_sessions));

        tracing::debug!(session_id = %id, "Created session");
        Some(id)
    }

    /// Make an existing session active
    pub fn select_session(&self, id: SessionId) -> StoreResult<()> {
        let mut result = Err(StoreError::SessionNotFound(id));

        self.tx.send_if_modified(|state| {
            if state.session(id).is_none() {
                return false;
            }
            result = Ok(());
            let changed = state.active != Some(id) || state.show_landing;
            state.active = Some(id);
            state.show_landing = false;
            changed
        });

        result
    }

    /// Remove a session. Deleting the active one returns to the landing screen.
    pub fn delete_session(&self, id: SessionId) -> Option<ChatSession> {
        let mut removed = None;

        self.tx.send_if_modified(|state| {
            let index = match state.sessions.iter().position(|s| s.id == id) {
                Some(index) => index,
                None => return false,
            };
            removed = Some(state.sessions.remove(index));
            if state.active == Some(id) {
                state.active = None;
                state.show_landing = true;
            }
            true
        });

        if removed.is_some() {
            tracing::debug!(session_id = %id, "Deleted session");
        }
        removed
    }

    /// Return to the landing screen without touching sessions
    pub fn show_landing(&self) {
        self.tx.send_modify(|state| {
            state.active = None;
            state.show_landing = true;
        });
    }

    /// Append the user's message and mark a request in flight.
    ///
    /// With `exclusive`, the turn is refused while another reply is pending.
    /// [`TurnTarget::ActiveOrNew`] starts a session when none is active and
    /// puts the message in the input bar. Nothing changes unless the turn
    /// starts.
    pub(crate) fn begin_request(
        &self,
        target: impl Into<TurnTarget>,
        message: Message,
        exclusive: bool,
    ) -> RequestStart {
        let target = target.into();
        let mut start = RequestStart::Missing;
        // Taken up front; an unused id only leaves a gap
        let fresh_id = match target {
            TurnTarget::ActiveOrNew => Some(self.next_id()),
            TurnTarget::Session(_) => None,
        };
        let max_sessions = self.max_sessions();

        self.tx.send_if_modified(|state| {
            if exclusive && state.awaiting_response() {
                start = RequestStart::Busy;
                return false;
            }

            let id = match (target, fresh_id) {
                (TurnTarget::Session(id), _) => id,
                (TurnTarget::ActiveOrNew, fresh) => {
                    let active = state.active_session().map(|session| session.id);
                    match (active, fresh) {
                        (Some(active), _) => active,
                        (None, Some(fresh)) => {
                            let session = ChatSession::new(fresh, &message.content);
                            insert_session(state, session, max_sessions);
                            tracing::debug!(session_id = %fresh, "Created session for input");
                            fresh
                        }
                        (None, None) => return false,
                    }
                }
            };
            if target == TurnTarget::ActiveOrNew {
                state.input = message.content.clone();
            }

            let session = match state.session_mut(id) {
                Some(session) => session,
                None => return false,
            };
            let history = session.history();
            session.messages.push(message);
            state.pending_requests += 1;
            start = RequestStart::Started(id, history);
            true
        });

        start
    }

    /// Land a reply: append it to the session, apply the dashboard update,
    /// clear the request mark and the input bar.
    ///
    /// Returns false if the session was deleted while the request was in
    /// flight; the reply is dropped in that case.
    pub(crate) fn finish_request(
        &self,
        id: SessionId,
        reply: Message,
        update: DashboardUpdate,
    ) -> bool {
        let mut applied = false;

        self.tx.send_modify(|state| {
            state.pending_requests = state.pending_requests.saturating_sub(1);
            state.input.clear();

            if let Some(session) = state.session_mut(id) {
                session.messages.push(reply);
                if let DashboardUpdate::Replace(dashboard) = update {
                    session.dashboard = dashboard;
                }
                applied = true;
            }
        });

        applied
    }

    fn max_sessions(&self) -> usize {
        self.config.max_sessions.max(1)
    }

    /// Next strictly increasing, time-derived id
    fn next_id(&self) -> SessionId {
        let now = Utc::now().timestamp_millis();
        let previous = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);

        SessionId(now.max(previous + 1))
    }
}

/// Put a session at the front, make it active and cut the list to the cap
fn insert_session(state: &mut AppState, session: ChatSession, max_sessions: usize) {
    let id = session.id;
    state.sessions.insert(0, session);
    if state.sessions.len() > max_sessions {
        for evicted in state.sessions.drain(max_sessions..) {
            tracing::debug!(session_id = %evicted.id, "Evicted oldest session");
        }
    }
    state.active = Some(id);
    state.show_landing = false;
}
