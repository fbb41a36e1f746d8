//! AutoMeta Library
//!
//! Reads the container metadata of a video through `ffprobe`, generates fresh
//! title, artist, comment and copyright tags, and writes them into a stream-copied
//! file through `ffmpeg` with every original tag stripped.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{GeneratedTags, ProbeOutcome, RewriteOutcome, TagSet, VerificationReport};
pub use domain::rules::{GenerationPolicy, MetadataGenerator, TagComparator};
pub use error::{AutoMetaError, AutoMetaResult};
