//! Application error categories.
//!
//! Three categories are distinguished at the composer boundary: request
//! validation failures, typed errors carrying an intended status code, and
//! everything else. Dispatch to the matching handler happens in the
//! composer's exception table.

/// Application-level error, classified for exception-handler dispatch.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request validation failed; maps to a structured client error.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Explicitly raised error carrying an intended status code.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Any other unhandled error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Creates a typed HTTP error with the given status code.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    /// Creates an internal error from any displayable value.
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }

    /// Status code this error intends to produce.
    pub fn status(&self) -> u16 {
        match self {
            AppError::Validation(_) => 422,
            AppError::Http { status, .. } => *status,
            AppError::Internal(_) => 500,
        }
    }
}
