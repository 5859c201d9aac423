// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use keebsmith_node::{
    api::{start_server, AppState},
    classifier::LabelClassifier,
    config::ServiceConfig,
    llm::{JsonExtractor, TogetherClient},
    vision::ClipModel,
};
use std::{env, sync::Arc};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    // Load .env before reading configuration
    let _ = dotenv::dotenv();

    let config = ServiceConfig::from_env();

    let api_key = match &config.together_api_key {
        Some(key) => key.clone(),
        None => {
            tracing::warn!(
                "⚠️  TOGETHER_API_KEY is not set; /suggest-build requests will fail upstream"
            );
            String::new()
        }
    };

    let llm = Arc::new(TogetherClient::new(&config.together_api_url, &api_key)?);

    // Load the CLIP model once; a missing model disables /classify (503)
    // but leaves the suggestion proxy functional
    tracing::info!(
        "🧠 Loading CLIP model from {}",
        config.clip_model_dir.display()
    );
    let classifier = match ClipModel::from_dir(&config.clip_model_dir) {
        Ok(model) => match LabelClassifier::new(model) {
            Ok(classifier) => {
                tracing::info!("✅ Classifier ready ({} labels)", classifier.labels().len());
                Some(Arc::new(classifier))
            }
            Err(e) => {
                tracing::warn!("⚠️  Failed to encode label set: {}", e);
                None
            }
        },
        Err(e) => {
            tracing::warn!(
                "⚠️  Failed to load CLIP model from {}: {}",
                config.clip_model_dir.display(),
                e
            );
            None
        }
    };

    let state = AppState {
        classifier,
        llm,
        extractor: JsonExtractor::new(),
    };

    start_server(state, config.port)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
