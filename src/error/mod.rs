//! Error handling module for AutoMeta

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for AutoMeta library operations
#[derive(Error, Debug)]
pub enum AutoMetaError {
    /// Input container not accepted
    #[error("Unsupported container '{extension}' for {path}. Accepted: mp4, mov, mkv")]
    UnsupportedContainer { path: String, extension: String },

    /// Logging could not be set up
    #[error("Failed to initialize logging: {message}")]
    LoggingInit { message: String },

    /// Domain layer error
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result type alias for AutoMeta operations
pub type AutoMetaResult<T> = std::result::Result<T, AutoMetaError>;

impl From<AutoMetaError> for DomainError {
    fn from(err: AutoMetaError) -> Self {
        match err {
            AutoMetaError::Domain(inner) => inner,
            AutoMetaError::UnsupportedContainer { path, extension } => {
                DomainError::UnsupportedContainer(format!("{} ({})", path, extension))
            }
            other => DomainError::InternalError(other.to_string()),
        }
    }
}
