//! Error types for Twitch requests.

use thiserror::Error;

/// Errors raised while executing a query.
#[derive(Debug, Error)]
pub enum TwitchError {
    /// The request could not be sent or the body not read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Twitch answered with a non-success status.
    #[error("HTTP error {0}: {1}")]
    Status(u16, String),

    /// The body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL and path did not form a valid URL.
    #[error("invalid URL {0}")]
    InvalidUrl(String),
}

/// Convenient Result alias for Twitch operations.
pub type TwitchResult<T> = Result<T, TwitchError>;

/// Trait for error types that provide machine-readable error codes.
pub trait ErrorCode {
    /// Returns a stable, snake_case error code.
    fn code(&self) -> &'static str;
}

impl ErrorCode for TwitchError {
    fn code(&self) -> &'static str {
        match self {
            Self::Http(_) => "http_request_failed",
            Self::Status(_, _) => "http_error_status",
            Self::Decode(_) => "twitch_decode_failed",
            Self::InvalidUrl(_) => "twitch_invalid_url",
        }
    }
}
