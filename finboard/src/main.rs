use anyhow::{Context, Result};

use finboard::{config::Settings, log_buffer::LogBuffer, logging, App};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().context("Failed to load settings")?;
    settings.validate()?;

    let log_buffer = LogBuffer::default();
    let logging = logging::init_logging_with_buffer(log_buffer.clone())?;
    tracing::info!("Writing logs to {}", logging.log_path.display());

    App::new(settings, log_buffer).run().await?;

    Ok(())
}
