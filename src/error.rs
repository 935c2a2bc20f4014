// ============================================================================
// ERRORS - Client error taxonomy
// ============================================================================
// Every failure is recovered at the viewmodel boundary and surfaced as a
// toast (plus a forced navigation where relevant). Nothing here reaches the
// presentation layer as a fault.
// ============================================================================

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Request rejected by the transport, or a body that is not JSON
    #[error("Network error: {0}")]
    NetworkFailure(String),

    /// Non-2xx response; `message` is the server's own message when it sent one
    #[error("{message}")]
    HttpError { status: u16, message: String },

    #[error("Authentication required")]
    AuthRequired,

    #[error("Login response is missing user data")]
    IncompleteAuthData,

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("Stored session is corrupt: {0}")]
    CorruptSession(String),

    #[error("Storage unavailable: {0}")]
    Storage(String),

    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        ClientError::HttpError {
            status,
            message: message.into(),
        }
    }

    /// 401/403 from a protected endpoint: the session is no longer usable
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self,
            ClientError::HttpError { status: 401 | 403, .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
