// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Classify endpoint handler

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde_json::Value;

use super::response::scores_to_json;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::vision::decode_image_bytes;

/// POST /classify - Score an uploaded image against the fixed label set
///
/// Accepts a multipart form with a `file` field containing image bytes.
/// Returns a JSON object mapping each label to its softmax score.
pub async fn classify_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    // Locate the file field before touching the model so a missing part
    // is a 400 even when no model is loaded
    let mut file_bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("Malformed multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::InvalidRequest(format!("Failed to read file: {}", e)))?;
            file_bytes = Some(bytes);
            break;
        }
    }

    let bytes = file_bytes.ok_or_else(|| ApiError::InvalidRequest("No file provided".to_string()))?;

    let classifier = state
        .classifier
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("Classifier model not loaded".to_string()))?;

    let (image, info) = decode_image_bytes(&bytes)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    tracing::debug!(
        "Classifying {}x{} {:?} upload ({} bytes)",
        info.width,
        info.height,
        info.format,
        info.size_bytes
    );

    let scores = classifier
        .classify(&image)
        .map_err(|e| ApiError::InternalError(format!("Classification failed: {}", e)))?;

    Ok(Json(scores_to_json(scores)))
}
