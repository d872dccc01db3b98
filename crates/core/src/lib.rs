//! Shared primitives for all Rust crates in Leadline.

#![forbid(unsafe_code)]

/// Caller credential primitives shared across services.
pub mod auth;

use thiserror::Error;

pub use auth::CallerToken;

/// Result type used across Leadline crates.
pub type AppResult<T> = Result<T, AppError>;

/// Error kinds surfaced to callers of Leadline operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// No caller identity was presented, or it could not be verified.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Missing or invalid input fields.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Caller is authenticated but lacks the required role or permission.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Downstream store failure or unexpected orchestration error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable wire code for this error kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "unauthenticated",
            Self::InvalidArgument(_) => "invalid-argument",
            Self::PermissionDenied(_) => "permission-denied",
            Self::NotFound(_) => "not-found",
            Self::Internal(_) => "internal",
        }
    }

    /// Returns the human-readable message without the kind prefix.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthenticated(message)
            | Self::InvalidArgument(message)
            | Self::PermissionDenied(message)
            | Self::NotFound(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}
