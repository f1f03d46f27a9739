//! Regulatory event types - the records flowing through the pipeline.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One reported regulatory occurrence.
///
/// Raw events arrive from the search API with any subset of fields set;
/// enrichment guarantees that `severity`, `jurisdiction`, and `category`
/// are all populated before an event is persisted. Source fields the
/// pipeline does not model are carried through untouched in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryEvent {
    /// Free-text actor name (exchange, protocol, regulator)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,

    /// Free-text description of the occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ISO-8601 instant; missing or unparseable values order as the
    /// Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Risk label; preserved when the source already set it
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub severity: Option<Severity>,

    /// Regulatory region; always recomputed during enrichment
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub jurisdiction: Option<Jurisdiction>,

    /// Event class; always recomputed during enrichment
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Category>,

    /// Source fields the pipeline does not model, carried through to
    /// the persisted record
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Deserialize a field best-effort: values that do not match the
/// expected shape are treated as absent rather than failing the record.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

impl RegulatoryEvent {
    /// Create an empty event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entity.
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the timestamp.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Set a pre-assigned severity (as a source API would).
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// The instant this event occurred, for ordering.
    ///
    /// Missing or unparseable timestamps resolve to the Unix epoch so
    /// they sort after every dated event.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.timestamp
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// Ordinal risk label assigned by keyword rule (low < medium < high <
/// critical).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Wire spelling of this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named regulatory region inferred from event text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    #[serde(rename = "United States")]
    UnitedStates,
    #[serde(rename = "European Union")]
    EuropeanUnion,
    #[serde(rename = "United Kingdom")]
    UnitedKingdom,
    China,
    Japan,
    Singapore,
    #[serde(rename = "South Korea")]
    SouthKorea,
    #[serde(rename = "Hong Kong")]
    HongKong,
    Australia,
    Global,
    Other,
}

impl Jurisdiction {
    /// Wire spelling of this jurisdiction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Jurisdiction::UnitedStates => "United States",
            Jurisdiction::EuropeanUnion => "European Union",
            Jurisdiction::UnitedKingdom => "United Kingdom",
            Jurisdiction::China => "China",
            Jurisdiction::Japan => "Japan",
            Jurisdiction::Singapore => "Singapore",
            Jurisdiction::SouthKorea => "South Korea",
            Jurisdiction::HongKong => "Hong Kong",
            Jurisdiction::Australia => "Australia",
            Jurisdiction::Global => "Global",
            Jurisdiction::Other => "Other",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event class inferred from the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Enforcement,
    Sanctions,
    Policy,
    Investigation,
    Guidance,
    General,
}

impl Category {
    /// Wire spelling of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Enforcement => "Enforcement",
            Category::Sanctions => "Sanctions",
            Category::Policy => "Policy",
            Category::Investigation => "Investigation",
            Category::Guidance => "Guidance",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
