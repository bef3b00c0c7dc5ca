//! Error types for the backend collaborator boundary
//!
//! The cache itself cannot fail; the only fallible surface is the external
//! data service. Accessors catch these errors, log them, and degrade to a
//! safe default rather than propagating them to callers.

use thiserror::Error;

// == Backend Error Enum ==
/// Failure modes of the external backend data service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The service could not be reached or returned a transient failure
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// A uniqueness constraint was violated on write.
    ///
    /// This is an expected condition, not a fault: callers map it to a
    /// normal "already exists" result and cache the fact positively.
    #[error("duplicate record: {0}")]
    Duplicate(String),

    /// Credentials were rejected or the session is no longer valid
    #[error("unauthorized")]
    Unauthorized,

    /// The service rejected the request as malformed
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

// == Result Type Alias ==
/// Convenience Result type for backend calls.
pub type BackendResult<T> = std::result::Result<T, BackendError>;
