// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! CLIP text tower
//!
//! Wraps the ONNX export of the ViT-B/32 text encoder together with the
//! CLIP BPE tokenizer. Produces one 512-dimensional embedding per input
//! string.

use anyhow::{Context, Result};
use ndarray::{Array2, IxDyn};
use ort::session::Session;
use ort::value::Value;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokenizers::Tokenizer;
use tracing::info;

use super::image_encoder::build_session;
use super::CLIP_EMBED_DIM;

/// CLIP text context length (fixed by the positional embedding table)
pub const CLIP_CONTEXT_LENGTH: usize = 77;

/// CLIP text encoder model
#[derive(Clone)]
pub struct ClipTextEncoder {
    /// ONNX Runtime session (thread-safe)
    session: Arc<Mutex<Session>>,
    /// CLIP BPE tokenizer
    tokenizer: Arc<Tokenizer>,
    /// Whether the model declares an attention_mask input
    wants_attention_mask: bool,
}

impl std::fmt::Debug for ClipTextEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipTextEncoder")
            .field("wants_attention_mask", &self.wants_attention_mask)
            .finish_non_exhaustive()
    }
}

impl ClipTextEncoder {
    /// Load the CLIP text tower and tokenizer from disk
    ///
    /// # Arguments
    /// - `model_path`: Path to the ONNX model file (textual.onnx)
    /// - `tokenizer_path`: Path to the tokenizer JSON file (tokenizer.json)
    ///
    /// # Errors
    /// Returns error if:
    /// - Model or tokenizer file not found or invalid
    /// - ONNX Runtime initialization fails
    /// - The model does not output 512-dimensional embeddings
    pub fn new<P: AsRef<Path>>(model_path: P, tokenizer_path: P) -> Result<Self> {
        let model_path = model_path.as_ref();
        let tokenizer_path = tokenizer_path.as_ref();

        if !model_path.exists() {
            anyhow::bail!("CLIP text model not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Tokenizer file not found: {}", tokenizer_path.display());
        }

        let session = build_session(model_path)?;

        let wants_attention_mask = session
            .inputs
            .iter()
            .any(|input| input.name == "attention_mask");

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        let encoder = Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            wants_attention_mask,
        };

        // Validate the output width with a test inference
        let probe = encoder.encode_batch(&["validation test".to_string()])?;
        if probe.len() != 1 || probe[0].len() != CLIP_EMBED_DIM {
            anyhow::bail!(
                "Text tower outputs unexpected width: {} (expected {})",
                probe.first().map(|e| e.len()).unwrap_or(0),
                CLIP_EMBED_DIM
            );
        }

        info!("✅ CLIP text tower loaded from {}", model_path.display());

        Ok(encoder)
    }

    /// Encode a batch of texts into 512-dimensional embeddings
    ///
    /// Sequences are tokenized with the CLIP BPE tokenizer and
    /// truncated/padded to the fixed context length of 77 tokens.
    pub fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let encodings: Vec<_> = texts
            .iter()
            .map(|text| {
                self.tokenizer
                    .encode(text.as_str(), true)
                    .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
            })
            .collect::<Result<Vec<_>>>()?;

        // Pad every sequence to the fixed context length
        let mut input_ids_batch = Vec::with_capacity(texts.len() * CLIP_CONTEXT_LENGTH);
        let mut attention_mask_batch = Vec::with_capacity(texts.len() * CLIP_CONTEXT_LENGTH);

        for encoding in &encodings {
            let ids = encoding.get_ids();
            let take = ids.len().min(CLIP_CONTEXT_LENGTH);

            input_ids_batch.extend(ids[..take].iter().map(|&id| id as i64));
            attention_mask_batch.extend(std::iter::repeat(1i64).take(take));

            let padding_needed = CLIP_CONTEXT_LENGTH - take;
            input_ids_batch.extend(std::iter::repeat(0i64).take(padding_needed));
            attention_mask_batch.extend(std::iter::repeat(0i64).take(padding_needed));
        }

        let input_ids_array =
            Array2::from_shape_vec((texts.len(), CLIP_CONTEXT_LENGTH), input_ids_batch)
                .context("Failed to create input_ids array")?;
        let attention_mask_array =
            Array2::from_shape_vec((texts.len(), CLIP_CONTEXT_LENGTH), attention_mask_batch)
                .context("Failed to create attention_mask array")?;

        let mut session = self.session.lock().unwrap();
        let outputs = if self.wants_attention_mask {
            session
                .run(ort::inputs![
                    "input_ids" => Value::from_array(input_ids_array)?,
                    "attention_mask" => Value::from_array(attention_mask_array)?
                ])
                .context("Text tower inference failed")?
        } else {
            session
                .run(ort::inputs![
                    "input_ids" => Value::from_array(input_ids_array)?
                ])
                .context("Text tower inference failed")?
        };

        // Use index [0] instead of name since exports differ in output naming
        let output_tensor = outputs[0]
            .try_extract_array::<f32>()
            .context("Failed to extract output tensor")?;

        let output_shape = output_tensor.shape();
        if output_shape.len() != 2 || output_shape[0] != texts.len() {
            anyhow::bail!(
                "Text tower output has unexpected shape: {:?} (expected [{}, {}])",
                output_shape,
                texts.len(),
                CLIP_EMBED_DIM
            );
        }

        let width = output_shape[1];
        let mut embeddings = Vec::with_capacity(texts.len());
        for row in 0..texts.len() {
            let mut embedding = Vec::with_capacity(width);
            for col in 0..width {
                embedding.push(output_tensor[IxDyn(&[row, col])]);
            }
            embeddings.push(embedding);
        }

        Ok(embeddings)
    }
}
