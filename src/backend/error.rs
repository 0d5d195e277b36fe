//! Error types for the agent backend client.

use thiserror::Error;

/// Errors that can occur when calling the agent backend.
///
/// The variants cover the common failure scenarios:
/// - [`RateLimited`](BackendError::RateLimited) — the server returned HTTP 429
/// - [`ApiError`](BackendError::ApiError) — any other HTTP error (4xx/5xx)
/// - [`NetworkError`](BackendError::NetworkError) — failure in the network layer
#[derive(Debug, Error)]
pub enum BackendError {
    /// The server returned HTTP 429. `retry_after_ms` says how long to wait
    /// before retrying.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Error returned by the backend (e.g. 401 bad token, 500 internal).
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Underlying network failure (DNS, connection refused, timeout).
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
