use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

mod backend;
mod config;

use config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let config = AppConfig::from_env();
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let batch = config.batch_config(&cwd);

    tracing::info!("Scanning MAPAS JPEGs under: {}", batch.root.display());

    let source = backend::select(&config)?;
    let summary = fbds_batch::run(batch, source)
        .await
        .context("MAPAS OCR batch failed")?;

    if summary.failed > 0 {
        tracing::warn!("{} of {} images could not be extracted", summary.failed, summary.total);
    }
    Ok(())
}
