pub mod handlers;
mod types;

pub use types::*;

use crate::{config::Config, registry::ModelRegistry, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, path::Path, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

/// Builds the application router over a loaded registry. Shared with the
/// integration tests.
pub fn app(state: handlers::AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/models", get(handlers::list_models))
        .route("/predict", post(handlers::predict))
        .route("/predict-all", post(handlers::predict_all))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Load all artifacts before binding; a failed load aborts startup.
    let models_dir = std::env::var("MODELS_DIR").unwrap_or_else(|_| config.models.dir.clone());
    let registry = match ModelRegistry::load(Path::new(&models_dir)) {
        Ok(registry) => registry,
        Err(e) => {
            error!("Error loading models: {}", e);
            return Err(e);
        }
    };

    let app_state = handlers::AppState {
        registry: Arc::new(registry),
    };

    let app = app(app_state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
