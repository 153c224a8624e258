//! Error types for chat requests

use std::time::Duration;

use thiserror::Error;

/// Errors raised while sending a chat message or reading its reply
#[derive(Debug, Error)]
pub enum ChatError {
    /// Backend answered with a non-success status
    #[error("backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Request could not be sent (connect, DNS, TLS, ...)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body broke off while streaming
    #[error("stream error: {0}")]
    Stream(String),

    /// No chunk arrived within the idle timeout
    #[error("no data received for {0:?}")]
    IdleTimeout(Duration),

    /// The driving task went away before the stream finished
    #[error("request aborted before completion")]
    Aborted,

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ChatError {
    /// Whether the failure happened before or while talking to the backend,
    /// as opposed to a local setup problem
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            ChatError::Status { .. }
                | ChatError::Http(_)
                | ChatError::Stream(_)
                | ChatError::IdleTimeout(_)
        )
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ChatError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "backend returned HTTP 500: boom");
        assert!(err.is_transport());
    }

    #[test]
    fn test_local_errors_are_not_transport() {
        assert!(!ChatError::Aborted.is_transport());
        assert!(!ChatError::Config("bad".into()).is_transport());
    }
}
