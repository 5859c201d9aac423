// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Zero-shot label scoring over CLIP embeddings
//!
//! Scores an image against the fixed keyboard-part label set by dot
//! product in the shared embedding space, normalized with softmax into a
//! probability distribution.

use anyhow::Result;
use image::DynamicImage;

use crate::vision::ClipModel;

/// Fixed classification labels, in response order
pub const LABELS: [&str; 6] = [
    "keyboard",
    "mechanical switch",
    "PCB",
    "tools",
    "keycaps",
    "mechanical keyboard stabilizer",
];

/// Zero-shot image classifier over the fixed label set
///
/// The label embedding matrix is computed once at construction; labels
/// are immutable for the lifetime of the process.
pub struct LabelClassifier {
    model: ClipModel,
    labels: Vec<String>,
    label_embeddings: Vec<Vec<f32>>,
}

impl std::fmt::Debug for LabelClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelClassifier")
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

impl LabelClassifier {
    /// Build a classifier from a loaded CLIP model
    ///
    /// Encodes the label set through the text tower once and caches the
    /// resulting embedding matrix.
    pub fn new(model: ClipModel) -> Result<Self> {
        let labels: Vec<String> = LABELS.iter().map(|l| l.to_string()).collect();
        let label_embeddings = model.encode_texts(&labels)?;

        if label_embeddings.len() != labels.len() {
            anyhow::bail!(
                "Expected {} label embeddings, got {}",
                labels.len(),
                label_embeddings.len()
            );
        }

        Ok(Self {
            model,
            labels,
            label_embeddings,
        })
    }

    /// The label set, in response order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Score an image against the label set
    ///
    /// Returns `(label, score)` pairs in label order. Scores are a
    /// softmax over the image/label dot products, so they lie in [0, 1]
    /// and sum to ~1.0.
    pub fn classify(&self, image: &DynamicImage) -> Result<Vec<(String, f32)>> {
        let image_embedding = self.model.encode_image(image)?;

        let similarities: Vec<f32> = self
            .label_embeddings
            .iter()
            .map(|label_embedding| dot(&image_embedding, label_embedding))
            .collect();

        let probs = softmax(&similarities);

        Ok(self
            .labels
            .iter()
            .cloned()
            .zip(probs)
            .collect())
    }
}

/// Dot-product similarity between two vectors
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Numerically stable softmax
///
/// Subtracts the max before exponentiating so large similarity values
/// cannot overflow.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    if scores.is_empty() {
        return vec![];
    }

    let max = scores.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();

    exps.iter().map(|e| e / sum).collect()
}
