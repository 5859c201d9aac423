// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Environment-driven service configuration

use std::env;
use std::path::PathBuf;

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Default chat-completion API base URL
pub const DEFAULT_TOGETHER_API_URL: &str = "https://api.together.xyz";

/// Default CLIP model directory
pub const DEFAULT_CLIP_MODEL_DIR: &str = "./models/clip-vit-b-32-onnx";

/// Service configuration, assembled from the environment once at startup
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Listening port (PORT)
    pub port: u16,
    /// Bearer token for the completion API (TOGETHER_API_KEY)
    pub together_api_key: Option<String>,
    /// Completion API base URL (TOGETHER_API_URL)
    pub together_api_url: String,
    /// Directory holding visual.onnx, textual.onnx, tokenizer.json
    /// (CLIP_MODEL_DIR)
    pub clip_model_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            together_api_key: None,
            together_api_url: DEFAULT_TOGETHER_API_URL.to_string(),
            clip_model_dir: PathBuf::from(DEFAULT_CLIP_MODEL_DIR),
        }
    }
}

impl ServiceConfig {
    /// Read configuration from environment variables
    ///
    /// Unset or unparseable values fall back to defaults; the API key
    /// stays `None` when absent (the proxy endpoint then fails
    /// upstream, the classifier is unaffected).
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let together_api_key = env::var("TOGETHER_API_KEY").ok().filter(|k| !k.is_empty());

        let together_api_url =
            env::var("TOGETHER_API_URL").unwrap_or_else(|_| DEFAULT_TOGETHER_API_URL.to_string());

        let clip_model_dir = env::var("CLIP_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CLIP_MODEL_DIR));

        Self {
            port,
            together_api_key,
            together_api_url,
            clip_model_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 5000);
        assert!(config.together_api_key.is_none());
        assert_eq!(config.together_api_url, "https://api.together.xyz");
        assert_eq!(
            config.clip_model_dir,
            PathBuf::from("./models/clip-vit-b-32-onnx")
        );
    }
}
