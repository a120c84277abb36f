//! Response extractor.
//!
//! Locates the assistant's text payload in the provider response, strips an
//! optional Markdown code fence, and parses the remainder into a
//! [`RooftopAnalysis`]. Parse failures keep the raw extracted text so the
//! caller can display it.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::analysis::model::RooftopAnalysis;
use crate::analysis::AnalysisError;

// First fenced region, with or without a language tag.
static FENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:[A-Za-z0-9_-]+)?[ \t]*\r?\n?(.*?)```").expect("valid fence regex")
});

/// Pull the first choice's message content out of a chat-completions body.
pub fn extract_content(response: &Value) -> Result<&str, AnalysisError> {
    let content = response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .unwrap_or("");

    if content.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    Ok(content)
}

/// Strip an optional leading/trailing code fence.
///
/// Text that already starts with `{` is taken as bare JSON, so fences inside
/// string values are never mistaken for wrappers.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return trimmed;
    }
    match FENCE_RE.captures(trimmed) {
        Some(caps) => caps.get(1).map(|m| m.as_str().trim()).unwrap_or(trimmed),
        None => trimmed,
    }
}

/// Parse the structured analysis out of a raw provider response.
pub fn extract_analysis(response: &Value) -> Result<RooftopAnalysis, AnalysisError> {
    let content = extract_content(response)?;
    let json_text = strip_code_fence(content);

    serde_json::from_str(json_text).map_err(|source| AnalysisError::MalformedAnalysis {
        raw: content.to_string(),
        source,
    })
}
