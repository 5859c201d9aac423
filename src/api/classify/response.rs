// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response shaping for POST /classify
//!
//! The endpoint answers with a flat JSON object mapping each label to
//! its score, preserving label order.

use serde_json::{Map, Number, Value};

/// Convert scored labels into the response object
///
/// Keys appear in label order. Non-finite scores (which softmax cannot
/// produce from finite similarities) serialize as 0.
pub fn scores_to_json(scores: Vec<(String, f32)>) -> Value {
    let mut map = Map::with_capacity(scores.len());

    for (label, score) in scores {
        let number = Number::from_f64(f64::from(score))
            .unwrap_or_else(|| Number::from(0));
        map.insert(label, Value::Number(number));
    }

    Value::Object(map)
}
