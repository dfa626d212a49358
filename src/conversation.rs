//! Conversation Controller
//!
//! Runs one conversation turn: record the user's message, make exactly one
//! call to the dashboard service, then land the assistant's reply (or a
//! canned error reply) in the same session.

use std::sync::Arc;

use crate::client::{ChatRequest, DashboardApi};
use crate::models::{Message, SessionId};
use crate::store::{DashboardUpdate, RequestStart, SessionStore, TurnTarget};

/// Assistant text shown when a turn fails for any reason
pub const ERROR_REPLY: &str =
    "Sorry, I encountered an error. Please make sure the backend is running.";

/// How a send ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing happened
    Ignored,
    /// A reply was already pending; nothing happened
    Busy,
    /// The assistant replied and its dashboard was applied
    Answered,
    /// The call failed and the error reply was appended
    Failed,
    /// The session was gone, so the turn was dropped
    Discarded,
}

/// Sends user messages to the dashboard service and merges replies
#[derive(Clone)]
pub struct ConversationController {
    store: SessionStore,
    api: Arc<dyn DashboardApi>,
}

impl ConversationController {
    pub fn new(store: SessionStore, api: Arc<dyn DashboardApi>) -> Self {
        Self { store, api }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Send `text` as the next user message of `session_id`.
    ///
    /// The user message is in the session log before the request goes out.
    /// Whatever the result, the pending mark and the input bar are cleared
    /// once the call returns.
    pub async fn send_message(&self, text: &str, session_id: SessionId) -> SendOutcome {
        self.run_turn(text, session_id.into(), false).await
    }

    /// Like [`send_message`](Self::send_message), but refused with
    /// [`SendOutcome::Busy`] while any reply is still pending.
    pub async fn submit(&self, text: &str, session_id: SessionId) -> SendOutcome {
        self.run_turn(text, session_id.into(), true).await
    }

    /// Send what the user typed in the input bar to the active session, or to
    /// a new session when none is active. Refused while a reply is pending.
    pub async fn submit_input(&self, text: &str) -> SendOutcome {
        self.run_turn(text, TurnTarget::ActiveOrNew, true).await
    }

    async fn run_turn(&self, text: &str, target: TurnTarget, exclusive: bool) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }

        let request_id = uuid::Uuid::new_v4();

        let (session_id, history) = match self
            .store
            .begin_request(target, Message::user(text), exclusive)
        {
            RequestStart::Started(session_id, history) => (session_id, history),
            RequestStart::Busy => {
                tracing::debug!(turn = ?target, "Reply pending, message not sent");
                return SendOutcome::Busy;
            }
            RequestStart::Missing => {
                tracing::debug!(
                    request_id = %request_id,
                    turn = ?target,
                    "Session missing, message not sent"
                );
                return SendOutcome::Discarded;
            }
        };

        tracing::info!(
            request_id = %request_id,
            session_id = %session_id,
            history_len = history.len(),
            "Requesting dashboard"
        );

        let request = ChatRequest {
            message: text.to_string(),
            history,
        };

        let (reply, update, outcome) = match self.api.chat(&request).await {
            Ok(reply) => {
                tracing::info!(
                    request_id = %request_id,
                    has_dashboard = reply.dashboard.is_some(),
                    "Dashboard service replied"
                );
                let message = Message::assistant(reply.response, reply.dashboard.clone());
                (
                    message,
                    DashboardUpdate::Replace(reply.dashboard),
                    SendOutcome::Answered,
                )
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    error = %e,
                    "Dashboard request failed"
                );
                (
                    Message::assistant(ERROR_REPLY, None),
                    DashboardUpdate::Keep,
                    SendOutcome::Failed,
                )
            }
        };

        if !self.store.finish_request(session_id, reply, update) {
            tracing::debug!(
                request_id = %request_id,
                session_id = %session_id,
                "Session deleted while waiting, reply dropped"
            );
            return SendOutcome::Discarded;
        }

        outcome
    }
}
