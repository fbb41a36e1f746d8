// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_local;
pub mod jsonl_log;
pub mod probe_ffprobe;
pub mod tool_check;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::FFmpegAdapter;
pub use fs_local::FsLocalAdapter;
pub use jsonl_log::JsonlLogAdapter;
pub use probe_ffprobe::FFprobeAdapter;
pub use tool_check::ToolCheckAdapter;
pub use toml_config::TomlConfigAdapter;
pub use tracing_log::TracingLogAdapter;
