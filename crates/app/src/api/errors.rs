//! API errors.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors from backend API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, timeout, TLS).
    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a status the operation does not accept.
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// The response body did not decode as the expected shape.
    #[error("invalid response body")]
    Body(#[source] reqwest::Error),
}
