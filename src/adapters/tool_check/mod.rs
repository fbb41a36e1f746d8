//! External tool detection
//!
//! Both ffmpeg and ffprobe answer `-version` quickly, which makes it a cheap
//! presence check before any real work starts.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::ports::*;

/// Checks that external tools can be spawned
pub struct ToolCheckAdapter;

impl ToolCheckAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ToolCheckAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DependencyPort for ToolCheckAdapter {
    async fn check_tool(&self, tool: &str) -> Result<String, DomainError> {
        let output = Command::new(tool)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(output) => {
                let banner = String::from_utf8_lossy(&output.stdout)
                    .lines()
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();
                debug!("Found dependency {}: {}", tool, banner);
                Ok(banner)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Dependency '{}' not found", tool);
                Err(DomainError::MissingDependency(tool.to_string()))
            }
            Err(e) => Err(DomainError::ProcessingError(format!(
                "Failed to start dependency check for '{}': {}",
                tool, e
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_tool_is_missing_dependency() {
        let err = ToolCheckAdapter::new()
            .check_tool("autometa-test-no-such-tool")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingDependency("autometa-test-no-such-tool".to_string())
        );
    }
}
