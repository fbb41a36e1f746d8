//! Append-only metadata log
//!
//! Despite the conventional `.json` name the file is line-delimited: one
//! `{"old": .., "new": ..}` object per line. Each record is written with a
//! single `write_all` on a freshly opened append handle, so concurrent
//! writers may interleave lines but never split one.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Default log file name, relative to the working directory
pub const DEFAULT_METADATA_LOG: &str = "metadata_log.json";

/// JSON-lines metadata log adapter
pub struct JsonlLogAdapter {
    path: PathBuf,
}

impl JsonlLogAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Serialize one record as a newline-terminated line
    pub fn encode_line(record: &MetadataLogRecord) -> Result<String, DomainError> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| DomainError::InternalError(format!("JSON serialization failed: {}", e)))?;
        line.push('\n');
        Ok(line)
    }
}

#[async_trait]
impl MetadataLogPort for JsonlLogAdapter {
    async fn append(&self, record: &MetadataLogRecord) -> Result<(), DomainError> {
        let line = Self::encode_line(record)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to open {}: {}", self.path.display(), e)))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to append to {}: {}", self.path.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to flush {}: {}", self.path.display(), e)))?;

        debug!("Appended metadata record to {}", self.path.display());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }
}
