//! # Lookup Errors
//!
//! Every failure a lookup can end in, plus the configuration errors raised
//! before a widget is ever built. The `Display` text of [`LookupError`] is
//! exactly what the display surface shows.

use thiserror::Error;

/// Terminal outcome of a lookup that did not produce an order document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The trimmed input was empty. No request was sent.
    #[error("Please enter an order_uid")]
    EmptyInput,

    /// The endpoint answered with a non-2xx status. The body was discarded.
    #[error("Order not found")]
    NotFound { status: u16 },

    /// The request could not be completed or its body was not valid JSON.
    #[error("Request failed: {0}")]
    Transport(String),
}

impl LookupError {
    /// Status code of a `NotFound` response, for logging only.
    pub fn status(&self) -> Option<u16> {
        match self {
            LookupError::NotFound { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        LookupError::Transport(e.to_string())
    }
}

/// Errors raised while building a [`LookupConfig`](crate::config::LookupConfig).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid endpoint {value:?}: {reason}")]
    InvalidEndpoint { value: String, reason: String },

    #[error("Invalid port {0:?}")]
    InvalidPort(String),

    #[error("Invalid timeout {0:?}: expected whole seconds")]
    InvalidTimeout(String),
}
