use crate::domain::contract::LlmPricingAdvice;
use crate::domain::recommendation::AiRecommendation;
use anyhow::Context;

/// Pull the JSON payload out of a model reply. Handles Markdown fences (with
/// or without a language tag) and falls back to the outermost brace pair.
pub fn extract_json(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.starts_with("```") {
        let mut inner = trimmed;
        if let Some(after_first_line) = inner.splitn(2, '\n').nth(1) {
            inner = after_first_line;
        }
        if let Some(end) = inner.rfind("```") {
            inner = &inner[..end];
        }
        return Some(inner.trim().to_string());
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(trimmed[start..=end].trim().to_string())
}

/// Parse a model reply into validated pricing advice. Fails on non-JSON
/// input, a missing key, a wrong value type, or any contract violation.
pub fn parse_advice(text: &str) -> anyhow::Result<AiRecommendation> {
    let json_str = extract_json(text).unwrap_or_else(|| text.trim().to_string());
    let parsed = serde_json::from_str::<LlmPricingAdvice>(&json_str).with_context(|| {
        format!("LLM reply is not valid JSON for the pricing advice schema: {json_str}")
    })?;
    parsed.validate_and_into_advice()
}
