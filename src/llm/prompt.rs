// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt construction for build suggestions

/// System role priming for the chat request
pub const SYSTEM_PROMPT: &str = "You are a keyboard build expert.";

/// Rendered for parameters the caller did not supply
const UNSPECIFIED: &str = "unspecified";

/// Build the user instruction for a suggestion request
///
/// Interpolates the four build parameters and directs the model to
/// answer with a bare JSON object matching the expected key schema.
/// Absent parameters render as "unspecified".
pub fn build_suggestion_prompt(
    layout: Option<&str>,
    switch_type: Option<&str>,
    sound_profile: Option<&str>,
    budget: Option<&str>,
) -> String {
    let layout = layout.unwrap_or(UNSPECIFIED);
    let switch_type = switch_type.unwrap_or(UNSPECIFIED);
    let sound_profile = sound_profile.unwrap_or(UNSPECIFIED);
    let budget = budget.unwrap_or(UNSPECIFIED);

    format!(
        "You are a mechanical keyboard expert. I want you to suggest me a build \
for a {layout} layout with {switch_type} switches. The sound should be \
{sound_profile}. The budget is {budget}. Please provide me with the best \
options available.\n\n\
Keep the response short and concise. Give a short intro and description of \
the build. Then list the components.\n\n\
Make sure all the components are compatible with each other.\n\
Make sure all the components are within the budget.\n\n\
Return a JSON object with the following keys: \"layout\", \"soundProfile\", \
\"switchType\", \"budget\", \"description\", \"intro\", \"totalPrice\", and \
\"components\" which contains: case, pcb, switches, keycaps, stabilizers.\n\n\
Always keep the response in this format, don't add any extra keys or values \
to the JSON object. Return only valid JSON and nothing else. Do not include \
explanations, markdown, or additional comments after the JSON."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_interpolates_all_parameters() {
        let prompt = build_suggestion_prompt(
            Some("65%"),
            Some("tactile"),
            Some("thocky"),
            Some("250 USD"),
        );

        assert!(prompt.contains("65% layout"));
        assert!(prompt.contains("tactile switches"));
        assert!(prompt.contains("The sound should be thocky"));
        assert!(prompt.contains("The budget is 250 USD"));
    }

    #[test]
    fn test_prompt_missing_parameters_render_unspecified() {
        let prompt = build_suggestion_prompt(None, None, None, None);
        assert!(prompt.contains("unspecified layout"));
        assert!(prompt.contains("The budget is unspecified"));
    }

    #[test]
    fn test_prompt_states_schema() {
        let prompt = build_suggestion_prompt(Some("tkl"), None, None, None);
        for key in [
            "\"layout\"",
            "\"soundProfile\"",
            "\"switchType\"",
            "\"budget\"",
            "\"description\"",
            "\"intro\"",
            "\"totalPrice\"",
            "\"components\"",
        ] {
            assert!(prompt.contains(key), "missing {} in prompt", key);
        }
        assert!(prompt.contains("stabilizers"));
    }

    #[test]
    fn test_prompt_demands_bare_json() {
        let prompt = build_suggestion_prompt(None, None, None, None);
        assert!(prompt.contains("Return only valid JSON and nothing else"));
        assert!(prompt.contains("markdown"));
    }

    #[test]
    fn test_system_prompt() {
        assert_eq!(SYSTEM_PROMPT, "You are a keyboard build expert.");
    }
}
