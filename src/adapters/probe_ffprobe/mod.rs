//! FFprobe adapter for reading container-level tags
//!
//! Runs `ffprobe -v quiet -print_format json -show_format` and extracts the
//! `format.tags` object. Every failure is folded into
//! [`ProbeOutcome::Failed`] so callers can render it like any other tag set.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::model::*;
use crate::ports::*;

/// Subset of the ffprobe JSON document we care about
#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    tags: Option<BTreeMap<String, serde_json::Value>>,
}

/// FFprobe-based probe adapter
pub struct FFprobeAdapter {
    program: String,
}

impl FFprobeAdapter {
    /// Create new FFprobe adapter invoking `program`
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Arguments for a quiet, JSON, format-only probe of `file_path`
    pub fn probe_args(file_path: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-v", "quiet", "-print_format", "json", "-show_format"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(file_path.as_os_str().to_os_string());
        args
    }

    /// Extract `format.tags` from ffprobe's JSON output.
    ///
    /// A missing `format` section or a missing `tags` object yields an empty
    /// tag set. Non-string values keep their JSON text.
    pub fn parse_probe_output(stdout: &str) -> Result<TagSet, String> {
        let parsed: FfprobeOutput = serde_json::from_str(stdout)
            .map_err(|e| format!("Failed to parse ffprobe output: {}", e))?;

        let tags = parsed
            .format
            .and_then(|format| format.tags)
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect();

        Ok(tags)
    }
}

#[async_trait]
impl ProbePort for FFprobeAdapter {
    async fn read_tags(&self, file_path: &Path) -> ProbeOutcome {
        debug!(program = %self.program, path = %file_path.display(), "probing tags");

        let output = match Command::new(&self.program)
            .args(Self::probe_args(file_path))
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                warn!("Failed to run {}: {}", self.program, e);
                return ProbeOutcome::Failed(format!("Failed to run {}: {}", self.program, e));
            }
        };

        if !output.status.success() {
            warn!(
                "{} exited with {} for {}",
                self.program,
                output.status,
                file_path.display()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        match Self::parse_probe_output(&stdout) {
            Ok(tags) => {
                debug!("Probe found {} tags", tags.len());
                ProbeOutcome::Tags(tags)
            }
            Err(message) => ProbeOutcome::Failed(message),
        }
    }
}
