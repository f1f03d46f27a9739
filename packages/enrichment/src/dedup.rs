//! Cross-query event deduplication.
//!
//! The same occurrence often comes back from several of the overlapping
//! queries. Events are collapsed on a coarse fingerprint: the entity
//! plus the first 80 characters of the description. This is a deliberate
//! precision/recall tradeoff - near-duplicates that diverge past the
//! prefix stay distinct, and short descriptions that are true prefixes
//! of each other collide. Both are accepted behavior; keep the rule
//! literal.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

use crate::types::event::RegulatoryEvent;

/// How much of the description participates in the fingerprint.
const DESCRIPTION_PREFIX_CHARS: usize = 80;

/// Duplicate fingerprint: SHA-256 over entity, a separator, and the
/// description prefix. Absent fields hash as empty.
fn fingerprint(event: &RegulatoryEvent) -> String {
    let prefix: String = event
        .description
        .as_deref()
        .unwrap_or("")
        .chars()
        .take(DESCRIPTION_PREFIX_CHARS)
        .collect();

    let mut hasher = Sha256::new();
    hasher.update(event.entity.as_deref().unwrap_or("").as_bytes());
    hasher.update(b"-");
    hasher.update(prefix.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Drop events whose fingerprint was already seen, keeping the first
/// occurrence in input order.
pub fn deduplicate_events(events: Vec<RegulatoryEvent>) -> Vec<RegulatoryEvent> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|event| seen.insert(fingerprint(event)))
        .collect()
}
