//! Error taxonomy shared by every operation.
//!
//! # Design
//! - One flat enum; callers match on the class, not on message text.
//! - Transport failures and non-2xx statuses are distinct: `Transport` means
//!   the exchange never completed, `Http` means the server answered and
//!   declined.
//! - Exactly one error per failed call, mapped at the layer that saw it.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The API key does not carry a recognized environment prefix.
    #[error("invalid API key format: expected a 'live_' or 'test_' prefix")]
    InvalidApiKey,

    /// The parameters are rejected before any request is sent.
    #[error("invalid parameters: {0}")]
    Params(String),

    /// The request never completed: connection, TLS, timeout.
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP error: status {status} - message: {message}")]
    Http { status: u16, message: String },

    /// A 2xx body could not be decoded as the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A required document field is absent or null.
    #[error("missing required field '{0}' in document response")]
    MissingField(&'static str),

    /// A document field is present but carries the wrong type.
    #[error("field '{field}' in document response must be of type {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Transport(format!("request timed out: {err}"))
        } else if err.is_connect() {
            Error::Transport(format!("connection failed: {err}"))
        } else {
            Error::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
