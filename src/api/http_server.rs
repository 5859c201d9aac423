use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::classifier::LabelClassifier;
use crate::llm::{JsonExtractor, TogetherClient};

use super::classify::classify_handler;
use super::suggest_build::suggest_build_handler;

/// Shared request-handler state
///
/// Everything here is read-only after startup: the classifier (when its
/// model files were found), the outbound chat-completion client, and the
/// compiled JSON extractor.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Option<Arc<LabelClassifier>>,
    pub llm: Arc<TogetherClient>,
    pub extractor: JsonExtractor,
}

/// Build the service router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Image classification endpoint
        .route("/classify", post(classify_handler))
        // Build suggestion proxy endpoint
        .route("/suggest-build", post(suggest_build_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the process exits
pub async fn start_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> axum::response::Json<serde_json::Value> {
    axum::response::Json(json!({
        "status": "ok",
        "classifierLoaded": state.classifier.is_some(),
    }))
}
