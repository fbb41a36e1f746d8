// Inspect interactor - Orchestrates the tag inspection use case

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Interactor for reading the tags of one media file
pub struct InspectInteractor {
    probe_port: Arc<dyn ProbePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl InspectInteractor {
    /// Create new inspect interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>, fs_port: Arc<dyn FsPort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            probe_port,
            fs_port,
            log_port,
        }
    }

    /// Execute tag inspection
    ///
    /// Only a missing input is an error; probe problems come back inside the
    /// response as [`ProbeOutcome::Failed`].
    pub async fn execute(&self, request: InspectRequest) -> Result<InspectResponse, DomainError> {
        self.log_port
            .info(&format!("Inspecting tags of {}", request.input_path.display()))
            .await;

        if !self.fs_port.file_exists(&request.input_path).await? {
            return Err(DomainError::FileNotFound(request.input_path.display().to_string()));
        }

        let outcome = self.probe_port.read_tags(&request.input_path).await;
        match &outcome {
            ProbeOutcome::Tags(tags) if tags.is_empty() => {
                self.log_port.warn("No existing metadata found").await;
            }
            ProbeOutcome::Tags(tags) => {
                self.log_port.info(&format!("Found {} tags", tags.len())).await;
            }
            ProbeOutcome::Failed(message) => {
                self.log_port.warn(&format!("Probe failed: {}", message)).await;
            }
        }

        Ok(InspectResponse {
            input_path: request.input_path,
            outcome,
        })
    }
}

/// Request for tag inspection
#[derive(Debug, Clone)]
pub struct InspectRequest {
    pub input_path: PathBuf,
}

impl InspectRequest {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
        }
    }
}

/// Response from tag inspection
#[derive(Debug, Clone)]
pub struct InspectResponse {
    pub input_path: PathBuf,
    pub outcome: ProbeOutcome,
}
