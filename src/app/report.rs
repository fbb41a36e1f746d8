// Report rendering - Text, JSON and YAML views of interactor responses

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::app::dependency_interactor::ToolStatus;
use crate::app::generate_interactor::{GenerateResponse, LogStatus};
use crate::app::inspect_interactor::InspectResponse;
use crate::app::replace_interactor::ReplaceResponse;
use crate::domain::errors::DomainError;
use crate::domain::model::*;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn parse(format: &str) -> Result<Self, DomainError> {
        match format.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid output format: {}. Valid formats: text, json, yaml",
                format
            ))),
        }
    }
}

#[derive(Serialize)]
struct InspectView<'a> {
    file: &'a PathBuf,
    tags: TagSet,
}

#[derive(Serialize)]
struct GenerateView<'a> {
    file: &'a PathBuf,
    old: TagSet,
    new: &'a GeneratedTags,
    metadata_log: String,
}

#[derive(Serialize)]
struct ReplaceView<'a> {
    #[serde(flatten)]
    generation: GenerateView<'a>,
    success: bool,
    output: Option<PathBuf>,
    mime_type: Option<&'static str>,
    exit_code: Option<i32>,
    failure: Option<&'a str>,
    stderr: Option<&'a str>,
    verification: Option<&'a VerificationReport>,
    delivery_error: Option<&'a str>,
    /// Produced but rejected; never offered for download
    undelivered_output: Option<&'a Path>,
}

fn generate_view(response: &GenerateResponse) -> GenerateView<'_> {
    GenerateView {
        file: &response.input_path,
        old: response.old.to_tag_set(),
        new: &response.new,
        metadata_log: describe_log(&response.log_status),
    }
}

fn describe_log(status: &LogStatus) -> String {
    match status {
        LogStatus::Written(path) => format!("appended to {}", path.display()),
        LogStatus::Disabled => "disabled".to_string(),
        LogStatus::Failed(message) => format!("not written: {}", message),
    }
}

fn serialize<T: Serialize>(value: &T, format: OutputFormat) -> Result<String, DomainError> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| DomainError::InternalError(format!("YAML serialization failed: {}", e))),
        _ => serde_json::to_string_pretty(value)
            .map_err(|e| DomainError::InternalError(format!("JSON serialization failed: {}", e))),
    }
}

fn push_tags(out: &mut String, tags: &TagSet) {
    for (key, value) in tags {
        let _ = writeln!(out, "  {}: {}", key, value);
    }
}

fn push_old_tags(out: &mut String, old: &ProbeOutcome) {
    out.push_str("Original Metadata\n");
    match old {
        ProbeOutcome::Tags(tags) if tags.is_empty() => out.push_str("  (no existing metadata found)\n"),
        ProbeOutcome::Tags(tags) => push_tags(out, tags),
        ProbeOutcome::Failed(message) => {
            let _ = writeln!(out, "  {}: {}", SENTINEL_ERROR_KEY, message);
        }
    }
}

fn push_generation(out: &mut String, response: &GenerateResponse) {
    let _ = writeln!(out, "File: {}\n", response.input_path.display());
    push_old_tags(out, &response.old);
    out.push_str("\nGenerated Metadata\n");
    for (key, value) in response.new.entries() {
        let _ = writeln!(out, "  {}: {}", key, value);
    }
    let _ = writeln!(out, "\nMetadata log: {}", describe_log(&response.log_status));
}

/// Render an inspect response
pub fn render_inspect(response: &InspectResponse, format: OutputFormat) -> Result<String, DomainError> {
    if format != OutputFormat::Text {
        return serialize(
            &InspectView {
                file: &response.input_path,
                tags: response.outcome.to_tag_set(),
            },
            format,
        );
    }

    let mut out = String::new();
    let _ = writeln!(out, "File: {}\n", response.input_path.display());
    push_old_tags(&mut out, &response.outcome);
    Ok(out)
}

/// Render a generate response
pub fn render_generate(response: &GenerateResponse, format: OutputFormat) -> Result<String, DomainError> {
    if format != OutputFormat::Text {
        return serialize(&generate_view(response), format);
    }

    let mut out = String::new();
    push_generation(&mut out, response);
    Ok(out)
}

/// Render a replace response
pub fn render_replace(response: &ReplaceResponse, format: OutputFormat) -> Result<String, DomainError> {
    let failure = match &response.outcome {
        RewriteOutcome::Failed { reason, .. } => Some(reason.as_str()),
        RewriteOutcome::Succeeded { .. } => None,
    };
    let process = response.outcome.process();

    if format != OutputFormat::Text {
        let final_path = response.final_path().map(|p| p.to_path_buf());
        return serialize(
            &ReplaceView {
                generation: generate_view(&response.generation),
                success: response.succeeded(),
                mime_type: final_path.as_ref().map(|_| DELIVERY_MIME_TYPE),
                output: final_path,
                exit_code: process.exit_code,
                failure,
                stderr: failure.map(|_| process.stderr.as_str()),
                verification: response.verification.as_ref(),
                delivery_error: response.delivery_error.as_deref(),
                undelivered_output: response.undelivered_output(),
            },
            format,
        );
    }

    let mut out = String::new();
    push_generation(&mut out, &response.generation);
    out.push('\n');

    if let Some(reason) = failure {
        let _ = writeln!(out, "Failed to replace metadata: {}", reason);
        if !process.stderr.trim().is_empty() {
            out.push_str("\n--- rewrite tool output ---\n");
            out.push_str(process.stderr.trim_end());
            out.push('\n');
        }
        return Ok(out);
    }

    if response.succeeded() {
        out.push_str("Metadata replaced successfully\n");
    } else {
        out.push_str("Metadata rewritten, but the result was not accepted\n");
    }
    if let Some(report) = &response.verification {
        push_verification(&mut out, report);
    }
    if let Some(error) = &response.delivery_error {
        let _ = writeln!(out, "\nDelivery failed: {}", error);
    }
    if let Some(path) = response.undelivered_output() {
        let _ = writeln!(out, "\nUndelivered output left at: {}", path.display());
    }
    match (&response.delivered_to, response.final_path()) {
        (Some(target), _) => {
            let _ = writeln!(out, "\nDelivered: {} ({})", target.display(), DELIVERY_MIME_TYPE);
        }
        (None, Some(path)) => {
            let _ = writeln!(out, "\nOutput: {}", path.display());
        }
        (None, None) => {}
    }
    Ok(out)
}

fn push_verification(out: &mut String, report: &VerificationReport) {
    out.push_str("\nNew Metadata Result\n");
    if let Some(message) = &report.probe_error {
        let _ = writeln!(out, "  re-probe failed: {}", message);
        return;
    }
    for key in &report.matched {
        let _ = writeln!(out, "  ✓ {}", key);
    }
    for mismatch in &report.mismatched {
        let _ = writeln!(
            out,
            "  ✗ {}: expected '{}', found '{}'",
            mismatch.key, mismatch.expected, mismatch.actual
        );
    }
    for key in &report.missing {
        let _ = writeln!(out, "  ✗ {}: missing", key);
    }
    for key in &report.leftover {
        let _ = writeln!(out, "  ✗ {}: should have been removed", key);
    }
    let _ = writeln!(out, "  Verification: {}", if report.passed() { "passed" } else { "failed" });
}

/// Render the dependency report
pub fn render_tools(statuses: &[ToolStatus], format: OutputFormat) -> Result<String, DomainError> {
    if format != OutputFormat::Text {
        return serialize(&statuses, format);
    }

    let mut out = String::new();
    for status in statuses {
        match (&status.version, &status.error) {
            (_, Some(error)) => {
                let _ = writeln!(out, "✗ {}: {}", status.tool, error);
            }
            (Some(version), None) => {
                let _ = writeln!(out, "✓ {}: {}", status.tool, version);
            }
            (None, None) => {
                let _ = writeln!(out, "✓ {}", status.tool);
            }
        }
    }
    Ok(out)
}
