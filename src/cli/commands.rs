//! Command implementations

use anyhow::{bail, Context, Result};
use tracing::{error, info};

use crate::app::container::AppContainer;
use crate::app::generate_interactor::GenerateRequest;
use crate::app::inspect_interactor::InspectRequest;
use crate::app::replace_interactor::ReplaceRequest;
use crate::app::report::{self, OutputFormat};
use crate::cli::args::{DoctorArgs, GenerateArgs, InspectArgs, ReplaceArgs};
use crate::config_initialization::AppSettings;

fn output_format(format: &str) -> Result<OutputFormat> {
    OutputFormat::parse(format).map_err(|e| anyhow::anyhow!("{}", e))
}

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, settings: &AppSettings, args: InspectArgs) -> Result<()> {
    let format = output_format(&args.format)?;
    container
        .dependency_interactor()
        .require(&[settings.ffprobe_path.as_str()])
        .await?;

    let response = container
        .inspect_interactor()
        .execute(InspectRequest::new(args.input))
        .await
        .context("Failed to inspect input file")?;

    println!("{}", report::render_inspect(&response, format)?);
    Ok(())
}

/// Execute the generate command
pub async fn generate(container: &dyn AppContainer, settings: &AppSettings, args: GenerateArgs) -> Result<()> {
    let format = output_format(&args.format)?;
    container
        .dependency_interactor()
        .require(&[settings.ffprobe_path.as_str()])
        .await?;

    let response = container
        .generate_interactor()
        .execute(GenerateRequest::new(args.input))
        .await
        .context("Failed to generate metadata")?;

    println!("{}", report::render_generate(&response, format)?);
    Ok(())
}

/// Execute the replace command
pub async fn replace(container: &dyn AppContainer, settings: &AppSettings, args: ReplaceArgs) -> Result<()> {
    let format = output_format(&args.format)?;
    container
        .dependency_interactor()
        .require(&[settings.ffprobe_path.as_str(), settings.ffmpeg_path.as_str()])
        .await?;

    info!("Replacing metadata of {}", args.input.display());
    let request = ReplaceRequest {
        input_path: args.input,
        destination: args.output,
        verify: !args.no_verify,
        strict: args.strict,
    };

    let response = container
        .replace_interactor()
        .execute(request)
        .await
        .context("Failed to replace metadata")?;

    println!("{}", report::render_replace(&response, format)?);

    if !response.outcome.is_success() {
        error!("Metadata rewrite failed");
        bail!("Metadata rewrite failed");
    }
    if response.delivery_error.is_some() {
        bail!("Failed to deliver output");
    }
    if !response.succeeded() {
        bail!("Output verification failed");
    }
    Ok(())
}

/// Execute the doctor command
pub async fn doctor(container: &dyn AppContainer, settings: &AppSettings, args: DoctorArgs) -> Result<()> {
    let format = output_format(&args.format)?;
    let statuses = container
        .dependency_interactor()
        .report(&[settings.ffprobe_path.as_str(), settings.ffmpeg_path.as_str()])
        .await;

    println!("{}", report::render_tools(&statuses, format)?);

    if statuses.iter().all(|status| status.available()) {
        Ok(())
    } else {
        bail!("Required tools are missing")
    }
}
