//! API Server - HTTP server for the classification API

use axum::{
    routing::{get, post},
    Router,
};
use classifier_rs::SpamClassifier;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::HistoryConfig;
use crate::history::HistoryStore;

/// Build the router for `state`
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/model", get(api::model_summary))
        .route("/predict", post(api::predict))
        .route("/classify", post(api::classify))
        .route("/history", get(api::history));

    Router::new()
        .route("/health", get(api::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// API Server
pub struct ApiServer {
    state: Arc<AppState>,
    addr: String,
}

impl ApiServer {
    /// Create a new API server around a trained classifier
    pub fn new(
        classifier: Arc<SpamClassifier>,
        history: HistoryStore,
        history_limits: HistoryConfig,
        addr: String,
    ) -> Self {
        let state = Arc::new(AppState {
            classifier,
            history,
            history_limits,
        });

        Self { state, addr }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Start the API server
    pub async fn run(&self) -> std::io::Result<()> {
        let router = self.router();

        info!("Starting API server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}
