// Generate interactor - Reads old tags, generates new ones and logs both

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::MetadataGenerator;
use crate::ports::*;
use crate::utils::container_validator::ContainerValidator;

/// What happened to the metadata log record of one cycle
#[derive(Debug, Clone, PartialEq)]
pub enum LogStatus {
    Written(PathBuf),
    Disabled,
    /// Append failed; the cycle carried on
    Failed(String),
}

/// Interactor for the read-then-generate cycle
pub struct GenerateInteractor {
    probe_port: Arc<dyn ProbePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
    metadata_log: Option<Arc<dyn MetadataLogPort>>,
    generator: MetadataGenerator,
    validator: ContainerValidator,
}

impl GenerateInteractor {
    /// Create new generate interactor; `metadata_log = None` disables the log
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        metadata_log: Option<Arc<dyn MetadataLogPort>>,
        generator: MetadataGenerator,
    ) -> Self {
        Self {
            probe_port,
            fs_port,
            log_port,
            metadata_log,
            generator,
            validator: ContainerValidator::new(),
        }
    }

    /// Execute one generate cycle: validate, probe, generate, log
    pub async fn execute(&self, request: GenerateRequest) -> Result<GenerateResponse, DomainError> {
        let input = &request.input_path;

        if !self.fs_port.file_exists(input).await? {
            return Err(DomainError::FileNotFound(input.display().to_string()));
        }
        self.validator.validate_input(input)?;

        let old = self.probe_port.read_tags(input).await;
        if let Some(message) = old.error_message() {
            self.log_port
                .warn(&format!("Could not read existing metadata, continuing without it: {}", message))
                .await;
        }

        // A sentinel mapping has no managed keys, so it behaves like an empty one
        let new = self.generator.generate(&old.to_tag_set())?;
        self.log_port
            .info(&format!("Generated metadata: title={}, artist={}", new.title, new.artist))
            .await;

        let log_status = self.append_log(&old, &new).await;

        Ok(GenerateResponse {
            input_path: request.input_path,
            old,
            new,
            log_status,
        })
    }

    async fn append_log(&self, old: &ProbeOutcome, new: &GeneratedTags) -> LogStatus {
        let Some(metadata_log) = &self.metadata_log else {
            return LogStatus::Disabled;
        };

        match metadata_log.append(&MetadataLogRecord::new(old, new)).await {
            Ok(()) => LogStatus::Written(metadata_log.location()),
            Err(e) => {
                self.log_port
                    .warn(&format!("Metadata log not written: {}", e))
                    .await;
                LogStatus::Failed(e.to_string())
            }
        }
    }
}

/// Request for one generate cycle
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub input_path: PathBuf,
}

impl GenerateRequest {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
        }
    }
}

/// Response from one generate cycle
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub input_path: PathBuf,
    pub old: ProbeOutcome,
    pub new: GeneratedTags,
    pub log_status: LogStatus,
}
