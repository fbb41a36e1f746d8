// Domain models - Core types and data structures

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

#[cfg(test)]
mod tests;

/// Key used for the display form of a failed probe
pub const SENTINEL_ERROR_KEY: &str = "error";

/// Legacy fixed name of the rewritten file, also the delivery file name
pub const LEGACY_OUTPUT_FILE_NAME: &str = "video_with_new_random_metadata.mp4";

/// MIME type reported for delivered files
pub const DELIVERY_MIME_TYPE: &str = "video/mp4";

/// Open, sparse set of container-level tags
///
/// Keys are whatever the source file carries. Ordering is lexical so that
/// rendered output and log records are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet {
    tags: BTreeMap<String, String>,
}

impl TagSet {
    /// Create an empty tag set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Value for `key`, with a missing key read as the empty string
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.tags.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.tags.iter()
    }
}

impl From<BTreeMap<String, String>> for TagSet {
    fn from(tags: BTreeMap<String, String>) -> Self {
        Self { tags }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            tags: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// Result of probing a media file for its tags
///
/// A probe never fails the caller: failures travel as data so that they can
/// be shown to the user and logged like any other tag set.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// The probe ran and produced a (possibly empty) tag set
    Tags(TagSet),
    /// The probe could not run or its output could not be parsed
    Failed(String),
}

impl ProbeOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, ProbeOutcome::Failed(_))
    }

    pub fn tags(&self) -> Option<&TagSet> {
        match self {
            ProbeOutcome::Tags(tags) => Some(tags),
            ProbeOutcome::Failed(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ProbeOutcome::Tags(_) => None,
            ProbeOutcome::Failed(message) => Some(message),
        }
    }

    /// Display form: the tag set itself, or `{"error": message}` on failure
    pub fn to_tag_set(&self) -> TagSet {
        match self {
            ProbeOutcome::Tags(tags) => tags.clone(),
            ProbeOutcome::Failed(message) => {
                let mut sentinel = TagSet::new();
                sentinel.insert(SENTINEL_ERROR_KEY, message.clone());
                sentinel
            }
        }
    }
}

/// The four tags managed by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedTag {
    Title,
    Artist,
    Comment,
    Copyright,
}

impl ManagedTag {
    pub const ALL: [ManagedTag; 4] = [
        ManagedTag::Title,
        ManagedTag::Artist,
        ManagedTag::Comment,
        ManagedTag::Copyright,
    ];

    /// Container tag key
    pub fn key(&self) -> &'static str {
        match self {
            ManagedTag::Title => "title",
            ManagedTag::Artist => "artist",
            ManagedTag::Comment => "comment",
            ManagedTag::Copyright => "copyright",
        }
    }
}

impl fmt::Display for ManagedTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Freshly generated replacement metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTags {
    pub title: String,
    pub artist: String,
    pub comment: String,
    pub copyright: String,
}

impl GeneratedTags {
    pub fn get(&self, tag: ManagedTag) -> &str {
        match tag {
            ManagedTag::Title => &self.title,
            ManagedTag::Artist => &self.artist,
            ManagedTag::Comment => &self.comment,
            ManagedTag::Copyright => &self.copyright,
        }
    }

    /// `(key, value)` pairs in title, artist, comment, copyright order
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        ManagedTag::ALL.into_iter().map(move |tag| (tag.key(), self.get(tag)))
    }

    pub fn to_tag_set(&self) -> TagSet {
        self.entries().collect()
    }
}

/// Exit status and diagnostics of one external process run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stderr: String,
}

impl ProcessOutcome {
    pub fn exited_cleanly(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Everything the rewrite tool needs for one invocation
#[derive(Debug, Clone)]
pub struct RewriteRequest {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub tags: GeneratedTags,
}

impl RewriteRequest {
    pub fn new(input_path: PathBuf, output_path: PathBuf, tags: GeneratedTags) -> Result<Self, DomainError> {
        if input_path == output_path {
            return Err(DomainError::BadArgs(format!(
                "Output path must differ from input path: {}",
                input_path.display()
            )));
        }
        Ok(Self {
            input_path,
            output_path,
            tags,
        })
    }
}

/// Per-invocation state of the rewrite step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteState {
    Idle,
    Running,
    Succeeded,
    Failed,
}

impl RewriteState {
    /// Idle -> Running
    pub fn start(self) -> Result<Self, DomainError> {
        match self {
            RewriteState::Idle => Ok(RewriteState::Running),
            other => Err(DomainError::InternalError(format!(
                "Rewrite cannot start from state {:?}",
                other
            ))),
        }
    }

    /// Running -> Succeeded iff exit code 0 and the output exists
    pub fn finish(self, process: &ProcessOutcome, output_exists: bool) -> Result<Self, DomainError> {
        match self {
            RewriteState::Running if process.exited_cleanly() && output_exists => {
                Ok(RewriteState::Succeeded)
            }
            RewriteState::Running => Ok(RewriteState::Failed),
            other => Err(DomainError::InternalError(format!(
                "Rewrite cannot finish from state {:?}",
                other
            ))),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RewriteState::Succeeded | RewriteState::Failed)
    }
}

/// Final result of one rewrite invocation
#[derive(Debug, Clone, PartialEq)]
pub enum RewriteOutcome {
    Succeeded {
        output_path: PathBuf,
        process: ProcessOutcome,
    },
    Failed {
        reason: String,
        process: ProcessOutcome,
    },
}

impl RewriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RewriteOutcome::Succeeded { .. })
    }

    /// Output file, only present on success
    pub fn output_path(&self) -> Option<&Path> {
        match self {
            RewriteOutcome::Succeeded { output_path, .. } => Some(output_path),
            RewriteOutcome::Failed { .. } => None,
        }
    }

    pub fn process(&self) -> &ProcessOutcome {
        match self {
            RewriteOutcome::Succeeded { process, .. } | RewriteOutcome::Failed { process, .. } => process,
        }
    }
}

/// One line of the metadata log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataLogRecord {
    pub old: TagSet,
    pub new: GeneratedTags,
}

impl MetadataLogRecord {
    pub fn new(old: &ProbeOutcome, new: &GeneratedTags) -> Self {
        Self {
            old: old.to_tag_set(),
            new: new.clone(),
        }
    }
}

/// A generated tag that came back with a different value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagMismatch {
    pub key: String,
    pub expected: String,
    pub actual: String,
}

/// Comparison of re-probed tags against the generated ones
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VerificationReport {
    pub matched: Vec<String>,
    pub mismatched: Vec<TagMismatch>,
    pub missing: Vec<String>,
    /// Keys that should have been stripped
    pub leftover: Vec<String>,
    pub probe_error: Option<String>,
}

impl VerificationReport {
    pub fn probe_failed(message: impl Into<String>) -> Self {
        Self {
            probe_error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn passed(&self) -> bool {
        self.probe_error.is_none()
            && self.mismatched.is_empty()
            && self.missing.is_empty()
            && self.leftover.is_empty()
    }
}
