// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! SuggestBuildRequest type for POST /suggest-build

use serde::{Deserialize, Serialize};

/// Request body for POST /suggest-build
///
/// All four fields are optional free-form strings; no validation beyond
/// presence. Absent fields are rendered as "unspecified" in the prompt.
///
/// # Example
/// ```json
/// {
///   "layout": "65%",
///   "switchType": "linear",
///   "soundProfile": "thocky",
///   "budget": "250 USD"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestBuildRequest {
    /// Physical layout (e.g. "60%", "tkl", "full-size")
    pub layout: Option<String>,

    /// Switch type (e.g. "linear", "tactile", "clicky")
    pub switch_type: Option<String>,

    /// Desired sound profile (e.g. "thocky", "clacky")
    pub sound_profile: Option<String>,

    /// Budget as free text (e.g. "250 USD")
    pub budget: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialization_full() {
        let json = r#"{
            "layout": "65%",
            "switchType": "linear",
            "soundProfile": "thocky",
            "budget": "250 USD"
        }"#;
        let req: SuggestBuildRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.layout.as_deref(), Some("65%"));
        assert_eq!(req.switch_type.as_deref(), Some("linear"));
        assert_eq!(req.sound_profile.as_deref(), Some("thocky"));
        assert_eq!(req.budget.as_deref(), Some("250 USD"));
    }

    #[test]
    fn test_deserialization_empty_object() {
        let req: SuggestBuildRequest = serde_json::from_str("{}").unwrap();

        assert!(req.layout.is_none());
        assert!(req.switch_type.is_none());
        assert!(req.sound_profile.is_none());
        assert!(req.budget.is_none());
    }

    #[test]
    fn test_deserialization_partial() {
        let json = r#"{"layout": "tkl"}"#;
        let req: SuggestBuildRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.layout.as_deref(), Some("tkl"));
        assert!(req.budget.is_none());
    }

    #[test]
    fn test_camel_case_field_names() {
        let req = SuggestBuildRequest {
            layout: Some("60%".into()),
            switch_type: Some("tactile".into()),
            sound_profile: Some("clacky".into()),
            budget: Some("100".into()),
        };
        let json = serde_json::to_string(&req).unwrap();

        assert!(json.contains("switchType"));
        assert!(json.contains("soundProfile"));
        assert!(!json.contains("switch_type"));
    }
}
