//! Chat session types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dashboard::Dashboard;

/// Maximum number of prompt characters used as a session title
pub const TITLE_MAX_CHARS: usize = 30;

/// Title used when the prompt has no visible text
pub const DEFAULT_TITLE: &str = "New Dashboard";

/// Time-derived session identifier (milliseconds since the epoch).
///
/// Ids are strictly increasing in creation order within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub i64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in a session's message log
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Only set on assistant messages that introduced a dashboard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard: Option<Dashboard>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            dashboard: None,
        }
    }

    pub fn assistant(content: impl Into<String>, dashboard: Option<Dashboard>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            dashboard,
        }
    }

    /// The wire form sent as conversation history
    pub fn to_history(&self) -> HistoryEntry {
        HistoryEntry {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// A prior turn as sent to the assistant service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

/// One independent conversation thread
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
    pub messages: Vec<Message>,
    /// Current dashboard, replaced wholesale by each successful reply
    pub dashboard: Option<Dashboard>,
    pub created_at: DateTime<Utc>,
}

impl ChatSession {
    /// Create an empty session titled after its triggering prompt
    pub fn new(id: SessionId, prompt: &str) -> Self {
        Self {
            id,
            title: session_title(prompt),
            messages: Vec::new(),
            dashboard: None,
            created_at: Utc::now(),
        }
    }

    /// Conversation history in wire form
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.messages.iter().map(Message::to_history).collect()
    }
}

/// Derive a session title from a prompt: its first 30 characters, or the
/// default title when the prompt is blank.
pub fn session_title(prompt: &str) -> String {
    if prompt.trim().is_empty() {
        return DEFAULT_TITLE.to_string();
    }
    prompt.chars().take(TITLE_MAX_CHARS).collect()
}
