// Replace interactor - Generate, rewrite, re-probe and deliver

use std::path::{Path, PathBuf};
use std::sync::Arc;

use uuid::Uuid;

use crate::app::generate_interactor::{GenerateInteractor, GenerateRequest, GenerateResponse};
use crate::app::verify_interactor::{VerifyInteractor, VerifyRequest};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;
use crate::utils::path::PathUtils;
use crate::utils::Utils;

/// Where rewrite outputs are written
#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub file_name: String,
    /// Append a per-invocation id to the file name
    pub unique_names: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file_name: LEGACY_OUTPUT_FILE_NAME.to_string(),
            unique_names: true,
        }
    }
}

/// Interactor for the full strip-and-replace workflow
pub struct ReplaceInteractor {
    generate: Arc<GenerateInteractor>,
    verify: Arc<VerifyInteractor>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
    output: OutputSettings,
}

impl ReplaceInteractor {
    /// Create new replace interactor with injected ports
    pub fn new(
        generate: Arc<GenerateInteractor>,
        verify: Arc<VerifyInteractor>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        log_port: Arc<dyn LogPort>,
        output: OutputSettings,
    ) -> Self {
        Self {
            generate,
            verify,
            execute_port,
            fs_port,
            log_port,
            output,
        }
    }

    /// Execute the workflow for one input file
    pub async fn execute(&self, request: ReplaceRequest) -> Result<ReplaceResponse, DomainError> {
        let generation = self
            .generate
            .execute(GenerateRequest::new(request.input_path.clone()))
            .await?;

        let output_path = PathUtils::rewrite_output_path(
            &request.input_path,
            &self.output.file_name,
            self.output.unique_names,
            Uuid::new_v4(),
        );
        let outcome = self.rewrite(&request.input_path, &generation.new, output_path).await?;

        let Some(produced) = outcome.output_path().map(Path::to_path_buf) else {
            return Ok(ReplaceResponse {
                generation,
                outcome,
                verification: None,
                delivered_to: None,
                delivery_error: None,
            });
        };

        let verification = if request.verify {
            Some(
                self.verify
                    .execute(VerifyRequest {
                        output_path: produced.clone(),
                        expected: generation.new.clone(),
                        strict: request.strict,
                    })
                    .await?,
            )
        } else {
            None
        };

        let verified = verification.as_ref().map_or(true, VerificationReport::passed);
        let (delivered_to, delivery_error) = match &request.destination {
            Some(destination) if verified => match self.deliver(&produced, destination).await {
                Ok(target) => (Some(target), None),
                Err(e) => {
                    self.log_port
                        .error(&format!("Delivery failed, output left at {}: {}", produced.display(), e))
                        .await;
                    (None, Some(e.to_string()))
                }
            },
            Some(_) => {
                self.log_port
                    .warn("Verification failed, output was not delivered")
                    .await;
                (None, None)
            }
            None => (None, None),
        };

        Ok(ReplaceResponse {
            generation,
            outcome,
            verification,
            delivered_to,
            delivery_error,
        })
    }

    /// Run one rewrite invocation through its state machine.
    ///
    /// Succeeds only when the tool exits with status 0 and the output exists.
    /// A failed run leaves no output file behind.
    pub async fn rewrite(
        &self,
        input_path: &Path,
        tags: &GeneratedTags,
        output_path: PathBuf,
    ) -> Result<RewriteOutcome, DomainError> {
        let rewrite_request = RewriteRequest::new(input_path.to_path_buf(), output_path, tags.clone())?;

        let state = RewriteState::Idle.start()?;
        self.log_port
            .info(&format!(
                "Rewriting metadata: {} -> {}",
                rewrite_request.input_path.display(),
                rewrite_request.output_path.display()
            ))
            .await;

        let process = match self.execute_port.rewrite(&rewrite_request).await {
            Ok(process) => process,
            Err(e) => ProcessOutcome {
                exit_code: None,
                stderr: e.to_string(),
            },
        };
        let output_exists = self.fs_port.file_exists(&rewrite_request.output_path).await?;

        match state.finish(&process, output_exists)? {
            RewriteState::Succeeded => {
                let size = self.fs_port.get_file_size(&rewrite_request.output_path).await?;
                self.log_port
                    .info(&format!("Metadata replaced successfully ({})", Utils::format_file_size(size)))
                    .await;
                Ok(RewriteOutcome::Succeeded {
                    output_path: rewrite_request.output_path,
                    process,
                })
            }
            _ => {
                let reason = match process.exit_code {
                    Some(0) => "rewrite tool exited successfully but produced no output file".to_string(),
                    Some(code) => format!("rewrite tool exited with code {}", code),
                    None if process.stderr.is_empty() => "rewrite tool was terminated".to_string(),
                    None => format!("rewrite tool did not complete: {}", process.stderr.trim()),
                };
                self.log_port.error(&format!("Failed to replace metadata: {}", reason)).await;

                if output_exists {
                    self.fs_port.delete_file(&rewrite_request.output_path).await?;
                }
                Ok(RewriteOutcome::Failed { reason, process })
            }
        }
    }

    /// Move the produced file to its delivery location
    async fn deliver(&self, produced: &Path, destination: &Path) -> Result<PathBuf, DomainError> {
        let is_dir = self.fs_port.directory_exists(destination).await?;
        let target = PathUtils::delivery_target(destination, is_dir);
        self.fs_port.move_file(produced, &target).await?;
        self.log_port
            .info(&format!("Delivered {} as {}", target.display(), DELIVERY_MIME_TYPE))
            .await;
        Ok(target)
    }
}

/// Request for the replace workflow
#[derive(Debug, Clone)]
pub struct ReplaceRequest {
    pub input_path: PathBuf,
    /// File or directory to deliver the result to
    pub destination: Option<PathBuf>,
    /// Re-probe the output and compare tags
    pub verify: bool,
    pub strict: bool,
}

impl ReplaceRequest {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            destination: None,
            verify: true,
            strict: false,
        }
    }
}

/// Response from the replace workflow
#[derive(Debug, Clone)]
pub struct ReplaceResponse {
    pub generation: GenerateResponse,
    pub outcome: RewriteOutcome,
    pub verification: Option<VerificationReport>,
    pub delivered_to: Option<PathBuf>,
    pub delivery_error: Option<String>,
}

impl ReplaceResponse {
    /// Rewrite succeeded, verification passed when it ran, and delivery did not fail
    pub fn succeeded(&self) -> bool {
        self.outcome.is_success()
            && self.verification.as_ref().map_or(true, VerificationReport::passed)
            && self.delivery_error.is_none()
    }

    /// Path of the finished file, only for an accepted result
    pub fn final_path(&self) -> Option<&Path> {
        if !self.succeeded() {
            return None;
        }
        self.delivered_to
            .as_deref()
            .or_else(|| self.outcome.output_path())
    }

    /// File the rewrite produced but that failed verification or delivery
    pub fn undelivered_output(&self) -> Option<&Path> {
        if self.succeeded() {
            return None;
        }
        self.outcome.output_path()
    }
}
