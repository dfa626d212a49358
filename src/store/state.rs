//! Application state snapshot
//!
//! Everything a view needs to draw itself, in one serializable value.

use serde::{Deserialize, Serialize};

use crate::models::{ChatSession, SessionId};

/// Snapshot of the whole client state
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    /// Sessions, newest first
    pub sessions: Vec<ChatSession>,
    /// Currently displayed session
    pub active: Option<SessionId>,
    /// Whether the landing screen is up
    pub show_landing: bool,
    /// Chat requests still waiting for a reply
    pub pending_requests: usize,
    /// Text in the input bar
    pub input: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            sessions: Vec::new(),
            active: None,
            show_landing: true,
            pending_requests: 0,
            input: String::new(),
        }
    }
}

/// Which screen the view should draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Hero page with suggestions and available data fields
    Landing,
    /// "What would you like to explore?" with the suggestion grid
    Suggestions,
    /// Dashboard and message log of the active session
    Conversation,
}

impl AppState {
    pub fn session(&self, id: SessionId) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub(crate) fn session_mut(&mut self, id: SessionId) -> Option<&mut ChatSession> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// The active session, if the active id resolves
    pub fn active_session(&self) -> Option<&ChatSession> {
        self.active.and_then(|id| self.session(id))
    }

    /// True while any chat request is in flight
    pub fn awaiting_response(&self) -> bool {
        self.pending_requests > 0
    }

    pub fn screen(&self) -> Screen {
        if self.show_landing {
            Screen::Landing
        } else if self.active_session().is_some() {
            Screen::Conversation
        } else {
            Screen::Suggestions
        }
    }
}
