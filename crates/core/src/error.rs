// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
///
/// Inside a check any of these becomes a FAIL result carrying the message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Backend error: {0}")]
    Backend(#[from] crate::port::BackendError),

    #[error("Wiring error: {0}")]
    Wiring(String),

    #[error("No run context: {0}")]
    MissingContext(String),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
