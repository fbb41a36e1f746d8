//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::app::replace_interactor::OutputSettings;
use crate::cli::{Cli, Commands};
use crate::domain::errors::DomainError;
use crate::domain::rules::GenerationPolicy;
use crate::ports::{ConfigPort, LogLevel};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "autometa.toml";

/// Environment variables and the config keys they override
pub const ENV_MAPPINGS: &[(&str, &str)] = &[
    ("AUTOMETA_FFPROBE", "ffprobe_path"),
    ("AUTOMETA_FFMPEG", "ffmpeg_path"),
    ("AUTOMETA_LOG_LEVEL", "log_level"),
    ("AUTOMETA_METADATA_LOG", "log_path"),
    ("AUTOMETA_METADATA_LOG_ENABLED", "log_enabled"),
    ("AUTOMETA_UNIQUE_NAMES", "unique_names"),
    ("AUTOMETA_OUTPUT_FILE_NAME", "output_file_name"),
    ("AUTOMETA_MAX_ATTEMPTS", "max_attempts"),
];

/// Where the effective configuration came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSummary {
    pub source: Option<PathBuf>,
    pub env_overrides: usize,
    pub cli_overrides: usize,
}

/// Typed view of the effective configuration
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub ffprobe_path: String,
    pub ffmpeg_path: String,
    pub policy: GenerationPolicy,
    pub output: OutputSettings,
    pub log_enabled: bool,
    pub log_path: PathBuf,
    pub log_level: LogLevel,
}

async fn required(config: &dyn ConfigPort, key: &str) -> Result<String, DomainError> {
    config
        .get_config(key)
        .await?
        .ok_or_else(|| DomainError::BadArgs(format!("Missing configuration value: {}", key)))
}

async fn parsed<T>(config: &dyn ConfigPort, key: &str) -> Result<T, DomainError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = required(config, key).await?;
    value
        .parse()
        .map_err(|e| DomainError::BadArgs(format!("Invalid value for {}: {} ({})", key, value, e)))
}

impl AppSettings {
    /// Build settings from a validated configuration
    pub async fn from_config(config: &dyn ConfigPort) -> Result<Self, DomainError> {
        config.validate_config().await?;

        let policy = GenerationPolicy {
            title_stem: required(config, "title_stem").await?,
            artist_stem: required(config, "artist_stem").await?,
            copyright_owner: required(config, "copyright_owner").await?,
            suffix_min: parsed(config, "suffix_min").await?,
            suffix_max: parsed(config, "suffix_max").await?,
            max_attempts: parsed(config, "max_attempts").await?,
        };
        policy.validate()?;

        Ok(Self {
            ffprobe_path: required(config, "ffprobe_path").await?,
            ffmpeg_path: required(config, "ffmpeg_path").await?,
            policy,
            output: OutputSettings {
                file_name: required(config, "output_file_name").await?,
                unique_names: parsed(config, "unique_names").await?,
            },
            log_enabled: parsed(config, "log_enabled").await?,
            log_path: PathBuf::from(required(config, "log_path").await?),
            log_level: LogLevel::parse(&required(config, "log_level").await?)?,
        })
    }
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub async fn initialize_configuration_hierarchy(config: &dyn ConfigPort, cli: &Cli) -> Result<ConfigSummary> {
    // Defaults are loaded by the adapter constructor
    let source = load_config_file(config, cli.config.as_deref()).await?;
    let env_overrides = apply_environment(config, |var| std::env::var(var).ok()).await?;
    let cli_overrides = apply_cli_configuration_overrides(config, cli).await?;

    config
        .validate_config()
        .await
        .context("Invalid configuration")?;

    Ok(ConfigSummary {
        source,
        env_overrides,
        cli_overrides,
    })
}

/// Load the explicit config file, or the default one when present
async fn load_config_file(config: &dyn ConfigPort, explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        config
            .load_config(path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        return Ok(Some(path.to_path_buf()));
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        config
            .load_config(default_path)
            .await
            .with_context(|| format!("Failed to load configuration from {}", DEFAULT_CONFIG_FILE))?;
        return Ok(Some(default_path.to_path_buf()));
    }

    Ok(None)
}

/// Apply `AUTOMETA_*` overrides found through `lookup`
pub async fn apply_environment<F>(config: &dyn ConfigPort, lookup: F) -> Result<usize, DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_overrides = 0;
    for &(env_var, config_key) in ENV_MAPPINGS {
        if let Some(value) = lookup(env_var) {
            config.set_config(config_key, &value).await?;
            env_overrides += 1;
        }
    }
    Ok(env_overrides)
}

/// Apply CLI argument overrides to configuration
pub async fn apply_cli_configuration_overrides(config: &dyn ConfigPort, cli: &Cli) -> Result<usize, DomainError> {
    let mut overrides: Vec<(&str, String)> = Vec::new();

    if let Some(level) = &cli.log_level {
        overrides.push(("log_level", level.clone()));
    }
    if let Some(ffprobe) = &cli.ffprobe {
        overrides.push(("ffprobe_path", ffprobe.clone()));
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        overrides.push(("ffmpeg_path", ffmpeg.clone()));
    }
    if let Some(path) = &cli.metadata_log {
        overrides.push(("log_path", path.display().to_string()));
    }
    if cli.no_metadata_log {
        overrides.push(("log_enabled", "false".to_string()));
    }
    if let Commands::Replace(args) = &cli.command {
        if args.fixed_name {
            overrides.push(("unique_names", "false".to_string()));
        }
    }

    for (key, value) in &overrides {
        config.set_config(key, value).await?;
    }
    Ok(overrides.len())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::adapters::TomlConfigAdapter;

    #[tokio::test]
    async fn test_default_settings_match_legacy_behavior() {
        let config = TomlConfigAdapter::new();
        let settings = AppSettings::from_config(&config).await.unwrap();

        assert_eq!(settings.ffprobe_path, "ffprobe");
        assert_eq!(settings.ffmpeg_path, "ffmpeg");
        assert_eq!(settings.policy, GenerationPolicy::default());
        assert_eq!(settings.output.file_name, "video_with_new_random_metadata.mp4");
        assert!(settings.output.unique_names);
        assert!(settings.log_enabled);
        assert_eq!(settings.log_path, PathBuf::from("metadata_log.json"));
        assert_eq!(settings.log_level, LogLevel::Info);
    }

    #[tokio::test]
    async fn test_environment_overrides_file_values() {
        let config = TomlConfigAdapter::new();
        let applied = apply_environment(&config, |var| match var {
            "AUTOMETA_FFMPEG" => Some("/usr/local/bin/ffmpeg".to_string()),
            "AUTOMETA_MAX_ATTEMPTS" => Some("4".to_string()),
            _ => None,
        })
        .await
        .unwrap();

        assert_eq!(applied, 2);
        let settings = AppSettings::from_config(&config).await.unwrap();
        assert_eq!(settings.ffmpeg_path, "/usr/local/bin/ffmpeg");
        assert_eq!(settings.policy.max_attempts, 4);
    }

    #[tokio::test]
    async fn test_cli_overrides_win() {
        let cli = Cli::parse_from([
            "autometa",
            "--ffprobe",
            "/opt/ffprobe",
            "--no-metadata-log",
            "replace",
            "--input",
            "clip.mp4",
            "--fixed-name",
        ]);
        let config = TomlConfigAdapter::new();
        config.set_config("ffprobe_path", "/from/env/ffprobe").await.unwrap();

        let applied = apply_cli_configuration_overrides(&config, &cli).await.unwrap();
        assert_eq!(applied, 3);

        let settings = AppSettings::from_config(&config).await.unwrap();
        assert_eq!(settings.ffprobe_path, "/opt/ffprobe");
        assert!(!settings.log_enabled);
        assert!(!settings.output.unique_names);
    }

    #[tokio::test]
    async fn test_inverted_suffix_range_is_rejected() {
        let config = TomlConfigAdapter::new();
        config.set_config("suffix_min", "9000").await.unwrap();
        config.set_config("suffix_max", "100").await.unwrap();
        assert!(AppSettings::from_config(&config).await.is_err());
    }
}
