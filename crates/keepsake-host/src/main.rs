//! Keepsake host entry point.

use std::error::Error;

use keepsake_core::rng::SystemRng;
use keepsake_host::app;
use keepsake_host::config::{HostConfig, LogFormat};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = HostConfig::from_env()?;

    // Logs go to stderr; stdout carries the rendered scenes.
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.pretty().init(),
    }

    tracing::info!(
        ambient = %config.assets.ambient.display(),
        video = %config.assets.video.display(),
        width = config.render_width,
        "Starting Keepsake host"
    );

    let summary = app::run(
        &config,
        Box::new(SystemRng::from_entropy()),
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    )
    .await?;

    tracing::info!(
        final_scene = %summary.final_scene,
        inputs = summary.inputs_handled,
        "Keepsake host stopped"
    );
    Ok(())
}
