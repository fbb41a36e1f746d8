//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Input video file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Input video file path (mp4, mov or mkv)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// Arguments for the replace command
#[derive(Args, Debug)]
pub struct ReplaceArgs {
    /// Input video file path (mp4, mov or mkv)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Deliver the result to this file or directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip re-reading the tags of the result
    #[arg(long)]
    pub no_verify: bool,

    /// Treat tags written by the muxer itself as leftovers
    #[arg(long)]
    pub strict: bool,

    /// Write to the fixed output name, overwriting any previous result
    #[arg(long)]
    pub fixed_name: bool,

    /// Output format (text, json, yaml)
    #[arg(long, default_value = "text")]
    pub format: String,
}

/// Arguments for the doctor command
#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output format (text, json, yaml)
    #[arg(long, default_value = "text")]
    pub format: String,
}
