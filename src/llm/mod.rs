// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Build-suggestion proxy: prompt construction, the hosted
//! chat-completion client, and JSON extraction from free-text replies

pub mod json_extract;
pub mod prompt;
pub mod together_client;

pub use json_extract::{Extraction, JsonExtractor};
pub use prompt::{build_suggestion_prompt, SYSTEM_PROMPT};
pub use together_client::TogetherClient;
