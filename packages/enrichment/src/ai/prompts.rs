//! Analyst prompt and best-effort brief extraction.
//!
//! The model is asked for JSON but answers in free text often enough
//! that extraction is a fallible parse step: find a JSON-shaped block,
//! try to decode it, and treat failure as "no brief".

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::brief::AnalysisBrief;
use crate::types::event::RegulatoryEvent;

/// How many events the digest shows the model.
pub const DIGEST_EVENT_LIMIT: usize = 20;

/// Prompt for the weekly intelligence brief. `{events}` is replaced
/// with the event digest.
pub const ANALYSIS_PROMPT: &str = r#"You are a crypto regulatory analyst. Analyze these regulatory events from the past week and produce a brief intelligence report.

Events:
{events}

Produce a JSON response with:
{
  "risk_level": "low|elevated|high|critical",
  "summary": "2-3 sentence executive summary",
  "key_developments": [{"title": "...", "impact": "...", "jurisdiction": "..."}],
  "trends": ["trend1", "trend2"],
  "outlook": "1-2 sentence forward-looking assessment",
  "recommendations": ["rec1", "rec2"]
}

Be concise and factual. Focus on regulatory implications for crypto businesses and investors."#;

lazy_static! {
    // First `{` through last `}` - greedy across newlines.
    static ref JSON_BLOCK: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

/// Format up to [`DIGEST_EVENT_LIMIT`] events as a one-line-per-event
/// digest for the model.
pub fn format_event_digest(events: &[RegulatoryEvent]) -> String {
    events
        .iter()
        .take(DIGEST_EVENT_LIMIT)
        .map(|event| {
            format!(
                "[{}] {}: {} ({})",
                event
                    .severity
                    .map(|s| s.as_str().to_uppercase())
                    .unwrap_or_else(|| "UNKNOWN".to_string()),
                event.entity.as_deref().unwrap_or("Unknown"),
                event.description.as_deref().unwrap_or("No description"),
                event
                    .jurisdiction
                    .map(|j| j.as_str())
                    .unwrap_or("Unknown jurisdiction"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the analysis prompt for an event digest.
pub fn build_analysis_prompt(digest: &str) -> String {
    ANALYSIS_PROMPT.replace("{events}", digest)
}

/// Extract a brief from free-text model output, best effort.
pub fn extract_brief(content: &str) -> Option<AnalysisBrief> {
    let block = JSON_BLOCK.find(content)?;
    serde_json::from_str(block.as_str()).ok()
}
