//! Error types for photobridge.

use thiserror::Error;

use crate::defaults::UPSTREAM_ERROR_BODY_LIMIT;

/// Result type alias using photobridge's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for photobridge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection settings are malformed (load time)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or connection failure before a response arrived
    #[error("Transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status
    #[error("{}", upstream_message(*status, body))]
    UpstreamStatus { status: u16, body: String },

    /// A successful response matched none of the known envelope shapes
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn upstream_message(status: u16, body: &str) -> String {
    if body.is_empty() {
        format!("immich request failed: {}", status)
    } else {
        format!("immich request failed: {} {}", status, body)
    }
}

impl Error {
    /// Build an upstream status error, truncating the body for diagnostics.
    pub fn upstream(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let mut end = trimmed.len().min(UPSTREAM_ERROR_BODY_LIMIT);
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        Error::UpstreamStatus {
            status,
            body: trimmed[..end].to_string(),
        }
    }

    /// True only for responses meaning "this deployment does not expose this
    /// path or verb" (404 Not Found, 405 Method Not Allowed).
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::UpstreamStatus { status: 404 | 405, .. })
    }

    /// Upstream HTTP status, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_only_for_404_and_405() {
        assert!(Error::upstream(404, "").is_retryable());
        assert!(Error::upstream(405, "").is_retryable());
        assert!(!Error::upstream(400, "").is_retryable());
        assert!(!Error::upstream(500, "").is_retryable());
        assert!(!Error::Transport("refused".to_string()).is_retryable());
        assert!(!Error::Decode("bad".to_string()).is_retryable());
    }

    #[test]
    fn test_upstream_body_is_trimmed_and_truncated() {
        let long = format!("  {}  ", "x".repeat(4000));
        match Error::upstream(500, &long) {
            Error::UpstreamStatus { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), UPSTREAM_ERROR_BODY_LIMIT);
                assert!(body.starts_with('x'));
            }
            other => panic!("Expected UpstreamStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_upstream_truncation_respects_char_boundaries() {
        let body = "é".repeat(UPSTREAM_ERROR_BODY_LIMIT);
        match Error::upstream(502, &body) {
            Error::UpstreamStatus { body, .. } => {
                assert!(body.len() <= UPSTREAM_ERROR_BODY_LIMIT);
                assert!(body.chars().all(|c| c == 'é'));
            }
            other => panic!("Expected UpstreamStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_upstream_display() {
        assert_eq!(
            Error::upstream(404, "").to_string(),
            "immich request failed: 404"
        );
        assert_eq!(
            Error::upstream(500, "boom").to_string(),
            "immich request failed: 500 boom"
        );
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(Error::upstream(405, "").status(), Some(405));
        assert_eq!(Error::Config("x".to_string()).status(), None);
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
