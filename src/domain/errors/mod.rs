// Domain errors - Error types for the domain layer

use std::fmt;

/// Domain-specific error types
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid arguments provided
    BadArgs(String),
    /// File not found
    FileNotFound(String),
    /// Container extension not accepted
    UnsupportedContainer(String),
    /// File system operation failed
    FsFail(String),
    /// A required external tool is absent from the environment
    MissingDependency(String),
    /// Every collision-avoidance candidate matched the old value
    GenerationExhausted { key: String, attempts: u32 },
    /// Validation failed
    ValidationFailed(String),
    /// Processing error
    ProcessingError(String),
    /// Internal error
    InternalError(String),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::BadArgs(msg) => write!(f, "Bad arguments: {}", msg),
            DomainError::FileNotFound(msg) => write!(f, "File not found: {}", msg),
            DomainError::UnsupportedContainer(msg) => write!(f, "Unsupported container: {}", msg),
            DomainError::FsFail(msg) => write!(f, "File system error: {}", msg),
            DomainError::MissingDependency(tool) => write!(
                f,
                "Required tool '{}' was not found. Install it or point the config at its location",
                tool
            ),
            DomainError::GenerationExhausted { key, attempts } => write!(
                f,
                "Could not generate a fresh value for '{}' after {} attempts",
                key, attempts
            ),
            DomainError::ValidationFailed(msg) => write!(f, "Validation failed: {}", msg),
            DomainError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            DomainError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
