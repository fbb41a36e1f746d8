// TOML config adapter - Configuration management using TOML files

use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Section holding all settings in a config file
pub const CONFIG_SECTION: &str = "autometa";

/// Default configuration values
pub const DEFAULT_CONFIG: &[(&str, &str)] = &[
    ("ffprobe_path", "ffprobe"),
    ("ffmpeg_path", "ffmpeg"),
    ("title_stem", "AutoTitle"),
    ("artist_stem", "AutoArtist"),
    ("copyright_owner", "AutoMetaSystem"),
    ("suffix_min", "1000"),
    ("suffix_max", "9999"),
    ("max_attempts", "2"),
    ("output_file_name", "video_with_new_random_metadata.mp4"),
    ("unique_names", "true"),
    ("log_enabled", "true"),
    ("log_path", "metadata_log.json"),
    ("log_level", "info"),
];

const NUMERIC_KEYS: &[&str] = &["suffix_min", "suffix_max", "max_attempts"];
const BOOLEAN_KEYS: &[&str] = &["unique_names", "log_enabled"];

fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::InternalError("configuration lock poisoned".to_string())
}

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: RwLock<HashMap<String, String>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter populated with defaults
    pub fn new() -> Self {
        Self {
            config: RwLock::new(Self::defaults()),
        }
    }

    fn defaults() -> HashMap<String, String> {
        DEFAULT_CONFIG
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Deserialize config from TOML string
    ///
    /// Values may be strings, integers or booleans; they are stored as text.
    fn deserialize_config(&self, toml_content: &str) -> Result<(), DomainError> {
        let parsed: toml::Value = toml::from_str(toml_content)
            .map_err(|e| DomainError::BadArgs(format!("Failed to parse TOML config: {}", e)))?;

        let Some(table) = parsed.get(CONFIG_SECTION).and_then(|section| section.as_table()) else {
            return Ok(());
        };

        let mut config = self.config.write().map_err(poisoned)?;
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(DomainError::BadArgs(format!(
                        "Unsupported value for {}: {}",
                        key, other
                    )))
                }
            };
            config.insert(key.clone(), text);
        }

        Ok(())
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        let config = self.config.read().map_err(poisoned)?;
        Ok(config.get(key).cloned())
    }

    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut config = self.config.write().map_err(poisoned)?;
        config.insert(key.to_string(), value.to_string());
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn load_config(&self, file_path: &Path) -> Result<(), DomainError> {
        if !file_path.exists() {
            return Err(DomainError::FsFail(format!(
                "Config file does not exist: {}",
                file_path.display()
            )));
        }

        let content = std::fs::read_to_string(file_path)
            .map_err(|e| DomainError::FsFail(format!("Failed to read config file: {}", e)))?;

        self.deserialize_config(&content)?;
        tracing::debug!("Loaded configuration from {}", file_path.display());
        Ok(())
    }

    async fn validate_config(&self) -> Result<(), DomainError> {
        let config = self.config.read().map_err(poisoned)?;

        // Validate log level
        if let Some(log_level) = config.get("log_level") {
            LogLevel::parse(log_level)?;
        }

        for key in NUMERIC_KEYS {
            if let Some(value) = config.get(*key) {
                value.parse::<u32>().map_err(|e| {
                    DomainError::BadArgs(format!("Invalid number for {}: {} ({})", key, value, e))
                })?;
            }
        }

        for key in BOOLEAN_KEYS {
            if let Some(value) = config.get(*key) {
                value.parse::<bool>().map_err(|e| {
                    DomainError::BadArgs(format!("Invalid boolean value for {}: {}", key, e))
                })?;
            }
        }

        for key in ["ffprobe_path", "ffmpeg_path", "output_file_name", "log_path"] {
            if config.get(key).is_some_and(|v| v.trim().is_empty()) {
                return Err(DomainError::BadArgs(format!("{} cannot be empty", key)));
            }
        }

        Ok(())
    }
}
