// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod classifier;
pub mod config;
pub mod llm;
pub mod vision;

pub use api::{build_router, start_server, ApiError, AppState};
pub use classifier::{LabelClassifier, LABELS};
pub use config::ServiceConfig;
pub use llm::{JsonExtractor, TogetherClient};
pub use vision::ClipModel;
