use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by session stores.
///
/// Stores are single-attempt: no backend retries, no degraded fallbacks. The
/// caller decides whether a failure degrades to an empty session or fails the
/// request.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The cache backend could not be reached or rejected the operation.
    #[error("session cache unavailable: {0}")]
    Unavailable(String),

    /// A cache operation did not complete within its deadline.
    #[error("session cache operation timed out after {0:?}")]
    Timeout(Duration),

    /// A stored payload could not be encoded or decoded.
    #[error("session payload could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(feature = "redis")]
pub(crate) fn redis_error(err: redis::RedisError) -> SessionError {
    SessionError::Unavailable(err.to_string())
}
