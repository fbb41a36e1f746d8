//! AutoMeta CLI
//!
//! Strips the metadata of a video container and replaces it with generated values.
//!
//! # Usage
//!
//! ```bash
//! autometa inspect --input clip.mp4
//! autometa generate --input clip.mp4 --format json
//! autometa replace --input clip.mp4 --output ./out/
//! autometa doctor
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use autometa::adapters::TomlConfigAdapter;
use autometa::app::container::DefaultAppContainer;
use autometa::cli::{commands, Cli, Commands};
use autometa::config_initialization::{initialize_configuration_hierarchy, AppSettings};
use autometa::utils::logging::{init_logging, LoggingConfig};

/// Main entry point for the AutoMeta CLI application
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = TomlConfigAdapter::new();
    let summary = initialize_configuration_hierarchy(&config, &cli).await?;
    let settings = AppSettings::from_config(&config).await?;

    init_logging(&LoggingConfig {
        level: settings.log_level,
        json: cli.log_json,
    })?;

    info!("Starting AutoMeta");
    match &summary.source {
        Some(path) => debug!("Configuration loaded from {}", path.display()),
        None => debug!("No configuration file, using defaults"),
    }
    debug!(
        "Applied {} environment and {} command-line overrides",
        summary.env_overrides, summary.cli_overrides
    );

    let container = DefaultAppContainer::new(&settings)?;

    match cli.command {
        Commands::Inspect(args) => {
            info!("Executing inspect command");
            commands::inspect(&container, &settings, args).await?;
        }
        Commands::Generate(args) => {
            info!("Executing generate command");
            commands::generate(&container, &settings, args).await?;
        }
        Commands::Replace(args) => {
            info!("Executing replace command");
            commands::replace(&container, &settings, args).await?;
        }
        Commands::Doctor(args) => {
            info!("Executing doctor command");
            commands::doctor(&container, &settings, args).await?;
        }
    }

    info!("AutoMeta completed successfully");
    Ok(())
}
