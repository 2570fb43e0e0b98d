//! Tolerant signal extraction from model output.
//!
//! Models asked to "respond only with JSON" still wrap the object in prose
//! often enough that parsing is two-staged: a strict parse of the whole
//! content, then a re-parse of the greedy brace-to-brace span. Both stages
//! are total; the caller turns `None` into the HOLD fallback.

use crate::models::Signal;

/// Parse a completion's text content into a validated [`Signal`].
pub fn parse_signal(content: &str) -> Option<Signal> {
    if let Ok(signal) = serde_json::from_str::<Signal>(content.trim()) {
        return validate(signal);
    }
    let span = brace_span(content)?;
    let signal = serde_json::from_str::<Signal>(span).ok()?;
    validate(signal)
}

/// Largest `{...}` span: first opening brace to last closing brace.
fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Direction validity is enforced by the enum's strict serde; confidence
/// must additionally land in (0, 1].
fn validate(signal: Signal) -> Option<Signal> {
    (signal.confidence > 0.0 && signal.confidence <= 1.0).then_some(signal)
}
