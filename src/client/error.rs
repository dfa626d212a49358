//! Dashboard service client errors

use thiserror::Error;

/// Errors that can occur when talking to the dashboard service
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Dashboard service unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,

    /// The body was not the JSON shape we expect
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl ClientError {
    pub(crate) fn from_send(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }
}
