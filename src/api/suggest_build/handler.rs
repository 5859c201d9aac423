// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Suggest-build endpoint handler

use axum::{extract::State, Json};
use serde_json::Value;

use super::request::SuggestBuildRequest;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::llm::{build_suggestion_prompt, SYSTEM_PROMPT};

/// POST /suggest-build - Proxy a build request to the completion API
///
/// Formats the build parameters into an instruction, forwards it to the
/// hosted model, and extracts the JSON object from the reply. Extraction
/// and parse failures are soft: they answer 200 with an `error` payload
/// carrying the raw model output. Only transport/API failures surface as
/// HTTP errors.
pub async fn suggest_build_handler(
    State(state): State<AppState>,
    Json(request): Json<SuggestBuildRequest>,
) -> Result<Json<Value>, ApiError> {
    let prompt = build_suggestion_prompt(
        request.layout.as_deref(),
        request.switch_type.as_deref(),
        request.sound_profile.as_deref(),
        request.budget.as_deref(),
    );

    let raw = state
        .llm
        .chat_completion(SYSTEM_PROMPT, &prompt)
        .await
        .map_err(|e| ApiError::UpstreamError(e.to_string()))?;

    tracing::debug!("Model reply ({} bytes)", raw.len());

    Ok(Json(state.extractor.extract_to_response(&raw)))
}
