//! Session store error types

use thiserror::Error;

use crate::models::SessionId;

/// Errors returned by session store actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No session with this id is retained
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
