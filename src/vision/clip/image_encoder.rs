// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! CLIP vision tower
//!
//! Wraps the ONNX export of the ViT-B/32 image encoder. Produces one
//! 512-dimensional embedding per image from preprocessed pixel values.

use anyhow::{Context, Result};
use ndarray::{Array4, IxDyn};
use ort::execution_providers::{CPUExecutionProvider, CUDAExecutionProvider};
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use super::preprocessing::CLIP_INPUT_SIZE;
use super::CLIP_EMBED_DIM;

/// CLIP image encoder model
///
/// # Thread Safety
/// The session is wrapped in Arc<Mutex> for cheap cloning and thread-safe
/// shared access; inference serializes on the lock.
#[derive(Clone)]
pub struct ClipImageEncoder {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// Model input name (usually "pixel_values")
    input_name: String,
}

impl std::fmt::Debug for ClipImageEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipImageEncoder")
            .field("input_name", &self.input_name)
            .finish_non_exhaustive()
    }
}

impl ClipImageEncoder {
    /// Load the CLIP vision tower from an ONNX file
    ///
    /// # Errors
    /// Returns error if:
    /// - Model file not found
    /// - ONNX Runtime initialization fails
    pub fn new<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("CLIP vision model not found: {}", model_path.display());
        }

        let session = build_session(model_path)?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .unwrap_or_else(|| "pixel_values".to_string());

        info!(
            "✅ CLIP vision tower loaded from {} (input: {})",
            model_path.display(),
            input_name
        );

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            input_name,
        })
    }

    /// Encode a preprocessed image into a 512-dimensional embedding
    ///
    /// # Arguments
    /// - `input`: Pixel tensor of shape [1, 3, 224, 224] (NCHW format)
    pub fn encode(&self, input: &Array4<f32>) -> Result<Vec<f32>> {
        let shape = input.shape();
        if shape.len() != 4 || shape[0] != 1 || shape[1] != 3 {
            anyhow::bail!("Invalid input shape: {:?}, expected [1, 3, H, W]", shape);
        }
        if shape[2] != CLIP_INPUT_SIZE as usize || shape[3] != CLIP_INPUT_SIZE as usize {
            anyhow::bail!(
                "Input size {}x{} differs from expected {}x{}",
                shape[2],
                shape[3],
                CLIP_INPUT_SIZE,
                CLIP_INPUT_SIZE
            );
        }

        let mut session = self.session.lock().unwrap();

        let input_value =
            Value::from_array(input.to_owned()).context("Failed to create input tensor")?;

        let outputs = session
            .run(ort::inputs![&self.input_name => input_value])
            .context("Vision tower inference failed")?;

        // Use index [0] instead of name since exports differ in output naming
        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let output_shape = output_tensor.shape();
        if output_shape.len() != 2 || output_shape[1] != CLIP_EMBED_DIM {
            anyhow::bail!(
                "Vision tower output has unexpected shape: {:?} (expected [1, {}])",
                output_shape,
                CLIP_EMBED_DIM
            );
        }

        let mut embedding = Vec::with_capacity(CLIP_EMBED_DIM);
        for i in 0..CLIP_EMBED_DIM {
            embedding.push(output_tensor[IxDyn(&[0, i])]);
        }

        Ok(embedding)
    }
}

/// Build an ONNX session with CUDA first and CPU fallback
pub(crate) fn build_session(model_path: &Path) -> Result<Session> {
    let cuda_result = Session::builder()
        .context("Failed to create session builder")?
        .with_execution_providers([CUDAExecutionProvider::default().build()])
        .context("Failed to set CUDA execution provider")?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .context("Failed to set optimization level")?
        .with_intra_threads(4)
        .context("Failed to set intra threads")?
        .commit_from_file(model_path);

    match cuda_result {
        Ok(s) => {
            info!("✅ CUDA execution provider initialized for {}", model_path.display());
            Ok(s)
        }
        Err(e) => {
            warn!("⚠️  CUDA execution provider failed: {}", e);
            warn!("   Falling back to CPU execution provider");
            Session::builder()
                .context("Failed to create session builder")?
                .with_execution_providers([CPUExecutionProvider::default().build()])
                .context("Failed to set CPU execution provider")?
                .with_optimization_level(GraphOptimizationLevel::Level3)
                .context("Failed to set optimization level")?
                .with_intra_threads(4)
                .context("Failed to set intra threads")?
                .commit_from_file(model_path)
                .context(format!(
                    "Failed to load ONNX model from {}",
                    model_path.display()
                ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_not_found_error() {
        let result = ClipImageEncoder::new("/nonexistent/path/visual.onnx");
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("not found"), "unexpected error: {}", msg);
    }
}
