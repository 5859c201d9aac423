// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! POST /suggest-build endpoint

pub mod handler;
pub mod request;

pub use handler::suggest_build_handler;
pub use request::SuggestBuildRequest;
