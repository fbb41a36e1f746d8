// Verify interactor - Re-probes a rewritten file and checks its tags

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::TagComparator;
use crate::ports::*;

/// Interactor for output verification use case
pub struct VerifyInteractor {
    probe_port: Arc<dyn ProbePort>,
    fs_port: Arc<dyn FsPort>,
    log_port: Arc<dyn LogPort>,
}

impl VerifyInteractor {
    /// Create new verify interactor with injected ports
    pub fn new(probe_port: Arc<dyn ProbePort>, fs_port: Arc<dyn FsPort>, log_port: Arc<dyn LogPort>) -> Self {
        Self {
            probe_port,
            fs_port,
            log_port,
        }
    }

    /// Execute output verification
    pub async fn execute(&self, request: VerifyRequest) -> Result<VerificationReport, DomainError> {
        self.log_port
            .info(&format!("Verifying tags of {}", request.output_path.display()))
            .await;

        if !self.fs_port.file_exists(&request.output_path).await? {
            return Err(DomainError::FileNotFound(request.output_path.display().to_string()));
        }

        let report = match self.probe_port.read_tags(&request.output_path).await {
            ProbeOutcome::Tags(actual) => TagComparator::compare(&request.expected, &actual, request.strict),
            ProbeOutcome::Failed(message) => VerificationReport::probe_failed(message),
        };

        if report.passed() {
            self.log_port.info("Output verification passed").await;
        } else {
            self.log_port
                .warn(&format!(
                    "Output verification failed: {} mismatched, {} missing, {} leftover",
                    report.mismatched.len(),
                    report.missing.len(),
                    report.leftover.len()
                ))
                .await;
        }

        Ok(report)
    }
}

/// Request for output verification
#[derive(Debug, Clone)]
pub struct VerifyRequest {
    pub output_path: PathBuf,
    pub expected: GeneratedTags,
    /// Count muxer-written tags as leftovers too
    pub strict: bool,
}
