// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for reading container-level tags
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Read the format-level tags of a media file.
    ///
    /// Never fails: any problem is reported as [`ProbeOutcome::Failed`].
    async fn read_tags(&self, file_path: &Path) -> ProbeOutcome;
}

/// Port for the metadata rewrite tool
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Run one strip-and-apply invocation and report how the process ended.
    ///
    /// `Err` means the process could not be run at all.
    async fn rewrite(&self, request: &RewriteRequest) -> Result<ProcessOutcome, DomainError>;
}

/// Port for detecting external tools before they are needed
#[async_trait]
pub trait DependencyPort: Send + Sync {
    /// Returns the first line of the tool's version banner
    async fn check_tool(&self, tool: &str) -> Result<String, DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Check if directory exists
    async fn directory_exists(&self, dir_path: &Path) -> Result<bool, DomainError>;

    /// Get file size
    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError>;

    /// Delete file, succeeding if it is already gone
    async fn delete_file(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Move file, copying across file systems when a rename is not possible
    async fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError>;
}

/// Port for the append-only metadata log
#[async_trait]
pub trait MetadataLogPort: Send + Sync {
    /// Append one record as a single line
    async fn append(&self, record: &MetadataLogRecord) -> Result<(), DomainError>;

    /// Location of the log
    fn location(&self) -> PathBuf;
}

/// Port for configuration management
#[async_trait]
pub trait ConfigPort: Send + Sync {
    /// Get configuration value
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Set configuration value
    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Load configuration from file
    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError>;

    /// Validate configuration
    async fn validate_config(&self) -> Result<(), DomainError>;
}

/// Port for logging and observability
#[async_trait]
pub trait LogPort: Send + Sync {
    /// Log info message
    async fn info(&self, message: &str);

    /// Log warning message
    async fn warn(&self, message: &str);

    /// Log error message
    async fn error(&self, message: &str);

    /// Log debug message
    async fn debug(&self, message: &str);
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse log level from string
    pub fn parse(level_str: &str) -> Result<Self, DomainError> {
        match level_str.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log level: {}. Valid levels: trace, debug, info, warn, error",
                level_str
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
