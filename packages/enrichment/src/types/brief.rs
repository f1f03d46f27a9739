//! AI analysis brief and the persisted event store document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::event::RegulatoryEvent;

/// Overall risk assessment for the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Elevated,
    High,
    Critical,
}

/// A single notable development called out by the analyst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDevelopment {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub jurisdiction: String,
}

/// Structured narrative summary of a week's regulatory events.
///
/// `risk_level` and `summary` are required for a model response to
/// count as a usable brief; the list fields default to empty when the
/// model omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBrief {
    pub risk_level: RiskLevel,
    pub summary: String,
    #[serde(default)]
    pub key_developments: Vec<KeyDevelopment>,
    #[serde(default)]
    pub trends: Vec<String>,
    #[serde(default)]
    pub outlook: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// The event set wrapped with its analysis, persisted once the AI step
/// succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedEventSet {
    pub generated_at: DateTime<Utc>,
    pub analysis: AnalysisBrief,
    pub events: Vec<RegulatoryEvent>,
}

/// The persisted event store: a plain event list, replaced by the
/// analyzed wrapper when a brief is available.
///
/// Serialized untagged, so the store file is either a JSON array or a
/// JSON object - downstream consumers distinguish by shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventDocument {
    Analyzed(AnalyzedEventSet),
    Events(Vec<RegulatoryEvent>),
}

impl EventDocument {
    /// The enriched events, regardless of wrapping.
    pub fn events(&self) -> &[RegulatoryEvent] {
        match self {
            EventDocument::Analyzed(set) => &set.events,
            EventDocument::Events(events) => events,
        }
    }

    /// The analysis brief, when present.
    pub fn analysis(&self) -> Option<&AnalysisBrief> {
        match self {
            EventDocument::Analyzed(set) => Some(&set.analysis),
            EventDocument::Events(_) => None,
        }
    }
}
