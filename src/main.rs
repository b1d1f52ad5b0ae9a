use anyhow::Result;
use tracing::{info, warn};
use wizzers_rust::{config, server};

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.server.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let filter = tracing_subscriber::EnvFilter::try_new(&log_level)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    info!("Starting Wizzers gateway with log level: {}", log_level);
    info!(
        "Remote services: tryon={} chatbot={} occasion={} text_to_cloth={}",
        config.services.tryon_url,
        config.services.chatbot_url,
        config.services.occasion_url,
        config.services.text_to_cloth_url
    );

    let default_cloth = config
        .server
        .public_dir
        .join(&config.server.default_cloth_image);
    if !tokio::fs::try_exists(&default_cloth).await.unwrap_or(false) {
        warn!(
            "Default cloth image {} not found; /upload will fail until it is added",
            default_cloth.display()
        );
    }

    server::run(config).await?;

    Ok(())
}
