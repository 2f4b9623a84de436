//! Error taxonomy shared by every backend port.

use thiserror::Error;

/// Failure reported by the backend platform (auth service or data API).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// No session, or the session is invalid/expired.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport or server failure.
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the input.
    #[error("validation failed: {0}")]
    Validation(String),
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}
