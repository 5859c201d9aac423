// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! CLIP ViT-B/32 inference (ONNX Runtime)

pub mod image_encoder;
pub mod model;
pub mod preprocessing;
pub mod text_encoder;

/// Embedding width of the ViT-B/32 towers
pub const CLIP_EMBED_DIM: usize = 512;

pub use image_encoder::ClipImageEncoder;
pub use model::ClipModel;
pub use preprocessing::{preprocess_for_clip, CLIP_INPUT_SIZE};
pub use text_encoder::{ClipTextEncoder, CLIP_CONTEXT_LENGTH};
