// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod classify;
pub mod errors;
pub mod http_server;
pub mod suggest_build;

pub use classify::{classify_handler, scores_to_json};
pub use errors::ApiError;
pub use http_server::{build_router, start_server, AppState};
pub use suggest_build::{suggest_build_handler, SuggestBuildRequest};
