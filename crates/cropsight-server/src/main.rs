//! cropsight-server binary entry point

use anyhow::Context;
use clap::Parser;
use cropsight_clients::{
    HttpArtifactUploader, HttpBoundaryDirectory, HttpChangeComparator, OAuthTokenProvider,
    ProcessApiImageFetcher,
};
use cropsight_core::{ChangePipeline, PipelineConfig};
use cropsight_server::config::AppConfig;
use cropsight_server::routes;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Satellite NDVI change-report service
#[derive(Debug, Parser)]
#[command(name = "cropsight-server", version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "cropsight.toml")]
    config: PathBuf,

    /// Listen address override
    #[arg(long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let listen = cli.listen.unwrap_or(config.listen);

    let pipeline = build_pipeline(&config).context("wiring pipeline")?;

    tracing::info!(%listen, "cropsight-server listening");
    warp::serve(routes::routes(pipeline)).run(listen).await;

    Ok(())
}

fn build_pipeline(config: &AppConfig) -> anyhow::Result<ChangePipeline> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeouts.call_secs))
        .build()
        .context("building HTTP client")?;

    let mut pipeline_config =
        PipelineConfig::new().with_windows(config.windows.before, config.windows.after);
    if let Some(run_secs) = config.timeouts.run_secs {
        pipeline_config = pipeline_config.with_run_timeout(Duration::from_secs(run_secs));
    }

    Ok(ChangePipeline::new(
        pipeline_config,
        Arc::new(HttpBoundaryDirectory::new(
            client.clone(),
            &config.services.directory_url,
        )),
        Arc::new(OAuthTokenProvider::new(
            client.clone(),
            &config.services.auth_url,
            config.credentials.clone(),
        )),
        Arc::new(ProcessApiImageFetcher::new(
            client.clone(),
            &config.services.imagery_url,
        )),
        Arc::new(HttpChangeComparator::new(
            client.clone(),
            &config.services.comparator_url,
        )),
        Arc::new(HttpArtifactUploader::new(
            client,
            &config.services.uploader_url,
        )),
    ))
}
