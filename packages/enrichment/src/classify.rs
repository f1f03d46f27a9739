//! Keyword classifiers for severity, jurisdiction, and category.
//!
//! Three deterministic, total functions over an event's text fields.
//! Each evaluates an ordered rule table, first match wins, with the
//! more severe/specific patterns checked before the general ones.
//! Absent fields are treated as empty strings, so classification never
//! fails.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::event::{Category, Jurisdiction, RegulatoryEvent, Severity};

lazy_static! {
    // Severity tiers are substring alternations (no word boundaries),
    // matching the upstream feed's phrasing. Order is the contract:
    // critical before high before medium.
    static ref SEVERITY_RULES: Vec<(Regex, Severity)> = vec![
        (
            Regex::new(r"ban|prohibit|criminal|arrest|indictment|shutdown|critical|emergency")
                .unwrap(),
            Severity::Critical,
        ),
        (
            Regex::new(r"enforcement|fine|penalty|sanction|lawsuit|sec |cftc|doj").unwrap(),
            Severity::High,
        ),
        (
            Regex::new(r"investigation|probe|warning|guidance|review|compliance").unwrap(),
            Severity::Medium,
        ),
    ];

    // Jurisdictions are matched on regulator acronyms, country terms,
    // and seat-of-regulator cities. The table order is fixed and acts
    // as the tie-break when an event mentions several regions.
    static ref JURISDICTION_RULES: Vec<(Jurisdiction, Regex)> = vec![
        (
            Jurisdiction::UnitedStates,
            Regex::new(r"\b(sec|cftc|doj|fincen|ofac|us |united states|american|federal)\b")
                .unwrap(),
        ),
        (
            Jurisdiction::EuropeanUnion,
            Regex::new(r"\b(eu |mica|esma|european|brussels)\b").unwrap(),
        ),
        (
            Jurisdiction::UnitedKingdom,
            Regex::new(r"\b(fca|uk |britain|british|london)\b").unwrap(),
        ),
        (
            Jurisdiction::China,
            Regex::new(r"\b(china|chinese|pboc|beijing)\b").unwrap(),
        ),
        (
            Jurisdiction::Japan,
            Regex::new(r"\b(japan|jfsa|japanese|tokyo)\b").unwrap(),
        ),
        (
            Jurisdiction::Singapore,
            Regex::new(r"\b(singapore|mas )\b").unwrap(),
        ),
        (
            Jurisdiction::SouthKorea,
            Regex::new(r"\b(korea|korean|seoul)\b").unwrap(),
        ),
        (
            Jurisdiction::HongKong,
            Regex::new(r"\b(hong kong|hkma|sfc)\b").unwrap(),
        ),
        (
            Jurisdiction::Australia,
            Regex::new(r"\b(australia|asic|australian)\b").unwrap(),
        ),
        (
            Jurisdiction::Global,
            Regex::new(r"\b(global|international|fatf|g20|iosco)\b").unwrap(),
        ),
    ];

    static ref CATEGORY_RULES: Vec<(Regex, Category)> = vec![
        (
            Regex::new(r"enforcement|fine|penalty|charged|sued").unwrap(),
            Category::Enforcement,
        ),
        (
            Regex::new(r"sanction|ofac|blacklist|designat").unwrap(),
            Category::Sanctions,
        ),
        (
            Regex::new(r"licens|registr|framework|legislation|bill|law").unwrap(),
            Category::Policy,
        ),
        (
            Regex::new(r"investigation|probe|subpoena|inquiry").unwrap(),
            Category::Investigation,
        ),
        (
            Regex::new(r"guidance|advisory|warning|alert").unwrap(),
            Category::Guidance,
        ),
    ];
}

/// Description and entity joined and lowercased, the text severity and
/// jurisdiction rules run against.
fn classification_text(event: &RegulatoryEvent) -> String {
    format!(
        "{} {}",
        event.description.as_deref().unwrap_or(""),
        event.entity.as_deref().unwrap_or("")
    )
    .to_lowercase()
}

/// Classify event severity from its text.
///
/// Only consulted when the source did not assign a severity itself.
pub fn classify_severity(event: &RegulatoryEvent) -> Severity {
    let text = classification_text(event);
    for (pattern, severity) in SEVERITY_RULES.iter() {
        if pattern.is_match(&text) {
            return *severity;
        }
    }
    Severity::Low
}

/// Infer the regulatory region from event text, or `Other`.
pub fn extract_jurisdiction(event: &RegulatoryEvent) -> Jurisdiction {
    let text = classification_text(event);
    for (jurisdiction, pattern) in JURISDICTION_RULES.iter() {
        if pattern.is_match(&text) {
            return *jurisdiction;
        }
    }
    Jurisdiction::Other
}

/// Categorize an event from its description only, or `General`.
pub fn categorize_event(event: &RegulatoryEvent) -> Category {
    let text = event
        .description
        .as_deref()
        .unwrap_or("")
        .to_lowercase();
    for (pattern, category) in CATEGORY_RULES.iter() {
        if pattern.is_match(&text) {
            return *category;
        }
    }
    Category::General
}
