//! Input container validation
//!
//! Only the containers the rewrite path is known to handle with a plain
//! stream copy are accepted as inputs.

use std::path::Path;

use tracing::debug;

use crate::error::{AutoMetaError, AutoMetaResult};

/// Extensions accepted as rewrite inputs
pub const ACCEPTED_EXTENSIONS: &[&str] = &["mp4", "mov", "mkv"];

/// Container format validator
pub struct ContainerValidator {
    accepted: Vec<String>,
}

impl ContainerValidator {
    /// Validator accepting [`ACCEPTED_EXTENSIONS`]
    pub fn new() -> Self {
        Self {
            accepted: ACCEPTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    /// Check whether an extension (without the dot) is accepted, ignoring case
    pub fn is_accepted(&self, extension: &str) -> bool {
        let lower = extension.to_lowercase();
        self.accepted.iter().any(|e| *e == lower)
    }

    /// Validate an input path by extension and return the normalized extension
    pub fn validate_input(&self, path: &Path) -> AutoMetaResult<String> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if !self.is_accepted(&extension) {
            return Err(AutoMetaError::UnsupportedContainer {
                path: path.display().to_string(),
                extension: if extension.is_empty() {
                    "<none>".to_string()
                } else {
                    extension
                },
            });
        }

        debug!("Accepted {} container for {}", extension, path.display());
        Ok(extension)
    }
}

impl Default for ContainerValidator {
    fn default() -> Self {
        Self::new()
    }
}
