//! Best-effort capability inference for model ids missing from the catalog.
//!
//! The live listing returns bare ids with no capability metadata, so unknown
//! ids are classified by substring markers drawn from the provider's current
//! model-naming families. The marker tables are approximate by construction:
//! they will misclassify some future ids and need periodic revision alongside
//! the catalog itself. Known ids never pass through here; catalog metadata
//! always wins for them.

use crate::definition::InputModality;

/// Id substrings that mark reasoning-capable families.
pub const REASONING_ID_MARKERS: &[&str] = &[
    "thinking",
    "reason",
    "-r1",
    "-o1",
    "-o3",
    "opus-4",
    "4.1-opus",
    "sonnet-4",
    "4.5-sonnet",
    "4.5-haiku",
    "3.7-sonnet",
    "codex",
    "5.2",
];

/// Id substrings that mark vision-capable families.
pub const VISION_ID_MARKERS: &[&str] = &["claude", "gpt-4o", "gpt-4.1", "gpt-5"];

/// Substrings that veto vision support even when a vision family matches.
pub const VISION_EXCLUSION_MARKERS: &[&str] = &["oss", "codex"];

/// Whether an id outside the catalog looks like a reasoning model.
/// Matching is case-insensitive.
pub fn is_reasoning_id(id: &str) -> bool {
    let id = id.to_ascii_lowercase();
    REASONING_ID_MARKERS.iter().any(|marker| id.contains(marker))
}

/// Whether an id outside the catalog looks like it accepts image input.
/// Matching is case-insensitive.
pub fn is_vision_id(id: &str) -> bool {
    let id = id.to_ascii_lowercase();
    VISION_ID_MARKERS.iter().any(|marker| id.contains(marker))
        && !VISION_EXCLUSION_MARKERS.iter().any(|marker| id.contains(marker))
}

/// Modalities synthesized for an unknown id: text always, image when the id
/// matches a vision family.
pub fn infer_input_modalities(id: &str) -> Vec<InputModality> {
    if is_vision_id(id) {
        vec![InputModality::Text, InputModality::Image]
    } else {
        vec![InputModality::Text]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasoning_markers_match_known_families() {
        assert!(is_reasoning_id("deepseek-r1-0528"));
        assert!(is_reasoning_id("some-thinking-preview"));
        assert!(is_reasoning_id("anthropic-claude-4.5-sonnet-next"));
        assert!(is_reasoning_id("openai-gpt-5.2-mini"));
        assert!(is_reasoning_id("openai-gpt-5-codex"));
    }

    #[test]
    fn reasoning_matching_ignores_case() {
        assert!(is_reasoning_id("DeepSeek-R1-Distill"));
        assert!(is_reasoning_id("Magistral-REASONING-24b"));
    }

    #[test]
    fn plain_completion_ids_are_not_reasoning() {
        assert!(!is_reasoning_id("mistral-small-2503"));
        assert!(!is_reasoning_id("llama4-scout-instruct"));
    }

    #[test]
    fn vision_families_require_no_exclusion_marker() {
        assert!(is_vision_id("anthropic-claude-haiku-5"));
        assert!(is_vision_id("openai-gpt-4o-audio"));
        // Family match alone is not enough.
        assert!(!is_vision_id("openai-gpt-5-codex"));
        assert!(!is_vision_id("openai-gpt-oss-safeguard-20b"));
        assert!(!is_vision_id("alibaba-qwen3-235b"));
    }

    #[test]
    fn modalities_follow_vision_inference() {
        assert_eq!(
            infer_input_modalities("anthropic-claude-haiku-5"),
            vec![InputModality::Text, InputModality::Image]
        );
        assert_eq!(
            infer_input_modalities("llama4-scout-instruct"),
            vec![InputModality::Text]
        );
    }
}
