// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Together AI chat-completion client (OpenAI-compatible API)

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Model used for build suggestions (good mix of speed and quality)
pub const SUGGESTION_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

/// Sampling temperature for suggestions
pub const SUGGESTION_TEMPERATURE: f32 = 0.7;

/// Output length bound
pub const SUGGESTION_MAX_TOKENS: u32 = 512;

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(serde::Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponseMessage {
    content: String,
}

/// Client for the hosted chat-completion endpoint
pub struct TogetherClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl TogetherClient {
    /// Create a new client
    ///
    /// `endpoint` is the API base URL (no path); trailing slashes are
    /// trimmed. `api_key` is sent as a bearer token on every request.
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("Chat-completion client configured: endpoint={}", endpoint);

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    /// Request a completion and return the assistant's raw text reply
    ///
    /// Sends a two-message conversation (system priming + user prompt)
    /// with the fixed suggestion model, temperature, and token bound.
    /// No retries; the client default timeout applies.
    pub async fn chat_completion(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: SUGGESTION_MODEL.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: SUGGESTION_TEMPERATURE,
            max_tokens: SUGGESTION_MAX_TOKENS,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("Chat-completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Upstream returned {}: {}", status, body);
            anyhow::bail!("Chat-completion API returned {}", status);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse chat-completion response")?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| anyhow::anyhow!("Chat-completion response contained no choices"))
    }
}
