//! FFmpeg execution adapter
//!
//! Strips all input metadata, applies the generated tags and stream copies
//! every stream into the output container.

use std::ffi::OsString;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFmpeg-based execution adapter
pub struct FFmpegAdapter {
    program: String,
}

impl FFmpegAdapter {
    /// Create new FFmpeg adapter invoking `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Build the argument list for one rewrite
    pub fn rewrite_args(request: &RewriteRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into()];
        args.push(request.input_path.as_os_str().to_os_string());
        args.push("-map_metadata".into());
        args.push("-1".into());
        for (key, value) in request.tags.entries() {
            args.push("-metadata".into());
            args.push(format!("{}={}", key, value).into());
        }
        args.push("-codec".into());
        args.push("copy".into());
        args.push(request.output_path.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl ExecutePort for FFmpegAdapter {
    async fn rewrite(&self, request: &RewriteRequest) -> Result<ProcessOutcome, DomainError> {
        let args = Self::rewrite_args(request);
        debug!(program = %self.program, ?args, "running rewrite");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| DomainError::ProcessingError(format!("Failed to run {}: {}", self.program, e)))?;

        let outcome = ProcessOutcome {
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        info!("{} finished with {}", self.program, output.status);
        Ok(outcome)
    }
}
