mod error;
pub mod handlers;
pub mod types;

pub use error::ApiError;
pub use handlers::AppState;

use crate::{Result, advisor::Advisor, config::Config, orchestrator::Orchestrator};
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            orchestrator: Arc::new(Orchestrator::from_config(config)?),
            advisor: Arc::new(Advisor::from_config(config.advisor.as_ref())),
        })
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/upload", post(handlers::upload))
        .route("/uploadocassion", post(handlers::upload_occasion))
        .route("/handleprompt", post(handlers::handle_prompt))
        .route("/handleocassion", post(handlers::handle_occasion))
        .route("/advice", post(handlers::advice))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    tokio::fs::create_dir_all(&config.server.uploads_dir).await?;
    tokio::fs::create_dir_all(&config.server.public_dir).await?;
    tokio::fs::create_dir_all(&config.services.cache_dir).await?;

    let app_state = AppState::from_config(&config)?;
    let app = router(app_state, config.server.max_upload_bytes);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);
    info!(
        "Serving results into {}",
        config.server.public_dir.display()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
