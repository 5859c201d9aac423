// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Paired CLIP model (vision + text towers)

use anyhow::Result;
use image::DynamicImage;
use std::path::Path;

use super::image_encoder::ClipImageEncoder;
use super::preprocessing::preprocess_for_clip;
use super::text_encoder::ClipTextEncoder;

/// File names expected inside the CLIP model directory
const VISUAL_FILE: &str = "visual.onnx";
const TEXTUAL_FILE: &str = "textual.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";

/// Joint image/text embedding model (CLIP ViT-B/32, ONNX export)
///
/// Both towers map into the same 512-dimensional space; semantically
/// related image/text pairs have a high dot product.
#[derive(Debug, Clone)]
pub struct ClipModel {
    image_encoder: ClipImageEncoder,
    text_encoder: ClipTextEncoder,
}

impl ClipModel {
    /// Load both towers from a model directory
    ///
    /// The directory must contain `visual.onnx`, `textual.onnx`, and
    /// `tokenizer.json`.
    pub fn from_dir<P: AsRef<Path>>(model_dir: P) -> Result<Self> {
        let dir = model_dir.as_ref();

        let image_encoder = ClipImageEncoder::new(dir.join(VISUAL_FILE))?;
        let text_encoder =
            ClipTextEncoder::new(dir.join(TEXTUAL_FILE), dir.join(TOKENIZER_FILE))?;

        Ok(Self {
            image_encoder,
            text_encoder,
        })
    }

    /// Encode an image into a 512-dimensional embedding
    ///
    /// Runs the full pipeline: center-crop resize to 224x224, CLIP
    /// normalization, vision tower inference.
    pub fn encode_image(&self, image: &DynamicImage) -> Result<Vec<f32>> {
        let tensor = preprocess_for_clip(image);
        self.image_encoder.encode(&tensor)
    }

    /// Encode a batch of texts into 512-dimensional embeddings
    pub fn encode_texts(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.text_encoder.encode_batch(texts)
    }
}
