//! CLI module for AutoMeta
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

pub use args::{DoctorArgs, GenerateArgs, InspectArgs, ReplaceArgs};

/// AutoMeta video metadata rewriter
///
/// Shows the container tags of a video, strips them, and writes freshly
/// generated title, artist, comment and copyright tags without re-encoding.
#[derive(Parser, Debug)]
#[command(name = "autometa")]
#[command(about = "AutoMeta - Video metadata cleaner and random rewriter")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Configuration file (default: ./autometa.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Probe tool to run
    #[arg(long, global = true)]
    pub ffprobe: Option<String>,

    /// Rewrite tool to run
    #[arg(long, global = true)]
    pub ffmpeg: Option<String>,

    /// Metadata log file
    #[arg(long, global = true)]
    pub metadata_log: Option<PathBuf>,

    /// Do not append to the metadata log
    #[arg(long, global = true)]
    pub no_metadata_log: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the existing metadata tags of a video
    Inspect(InspectArgs),
    /// Preview freshly generated metadata without touching the video
    Generate(GenerateArgs),
    /// Strip all metadata and write generated tags into a new file
    Replace(ReplaceArgs),
    /// Check that the probe and rewrite tools are available
    Doctor(DoctorArgs),
}
