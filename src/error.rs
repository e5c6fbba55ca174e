//! Failure taxonomy for feed fetches.

use thiserror::Error;

/// Why a single fetch attempt failed. None of these are retried; the
/// pipeline only surfaces the display text to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Unauthorized: Please check your API permissions.")]
    Unauthorized,

    #[error("Not Found: The requested resource could not be found.")]
    NotFound,

    #[error("Unexpected error: HTTP status {0}")]
    Unexpected(u16),

    /// DNS, connect, timeout or reset while sending or reading the body.
    #[error("Network error: {0}")]
    Transport(String),

    /// A 200 response whose body did not decode as a feed.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            FetchError::Unauthorized.to_string(),
            "Unauthorized: Please check your API permissions."
        );
        assert_eq!(
            FetchError::Unexpected(503).to_string(),
            "Unexpected error: HTTP status 503"
        );
        assert_eq!(
            FetchError::Transport("connection reset".into()).to_string(),
            "Network error: connection reset"
        );
    }

    #[test]
    fn test_json_error_is_malformed() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::Malformed(_)));
    }
}
