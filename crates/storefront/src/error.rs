//! Error taxonomy for the catalog service boundary.
//!
//! Guard violations (member-scoped mutation while signed out) are not errors:
//! they are handled locally by the membership layer and surfaced through the
//! notification boundary without any request being sent.

use thiserror::Error;

/// Errors produced by calls to the remote catalog service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP response. `message` carries the server's payload
    /// message verbatim when one was provided.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body did not match the expected wire shape.
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be constructed from the configured base.
    #[error("invalid endpoint: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Message suitable for transient user feedback.
    ///
    /// Server-provided messages pass through verbatim; transport and parse
    /// failures collapse to a retry prompt since their details help nobody
    /// at the checkout counter.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } if !message.is_empty() => message.clone(),
            Self::Network(_) => "Connection problem. Please try again.".to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}
