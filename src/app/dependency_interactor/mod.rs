// Dependency interactor - Fail-fast detection of external tools

use std::sync::Arc;

use serde::Serialize;

use crate::domain::errors::*;
use crate::ports::*;

/// Availability of one external tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolStatus {
    pub tool: String,
    pub version: Option<String>,
    pub error: Option<String>,
}

impl ToolStatus {
    pub fn available(&self) -> bool {
        self.error.is_none()
    }
}

/// Interactor checking that the probe and rewrite tools can be run
pub struct DependencyInteractor {
    dependency_port: Arc<dyn DependencyPort>,
    log_port: Arc<dyn LogPort>,
}

impl DependencyInteractor {
    pub fn new(dependency_port: Arc<dyn DependencyPort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            dependency_port,
            log_port,
        }
    }

    /// Stop at the first tool that cannot be run
    pub async fn require(&self, tools: &[&str]) -> Result<(), DomainError> {
        for tool in tools {
            let version = self.dependency_port.check_tool(tool).await?;
            self.log_port.debug(&format!("{}: {}", tool, version)).await;
        }
        Ok(())
    }

    /// Status of every tool, without failing
    pub async fn report(&self, tools: &[&str]) -> Vec<ToolStatus> {
        let mut statuses = Vec::with_capacity(tools.len());
        for tool in tools {
            let status = match self.dependency_port.check_tool(tool).await {
                Ok(version) => ToolStatus {
                    tool: tool.to_string(),
                    version: Some(version),
                    error: None,
                },
                Err(e) => {
                    self.log_port.warn(&e.to_string()).await;
                    ToolStatus {
                        tool: tool.to_string(),
                        version: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            statuses.push(status);
        }
        statuses
    }
}
