//! Batch aggregation: merge, dedup, enrich, sort, and roll the weekly
//! history forward.
//!
//! Pure over its inputs - the pipeline supplies the prior history and
//! persists the outcome.

use chrono::NaiveDate;
use std::cmp::Reverse;

use crate::classify::{categorize_event, classify_severity, extract_jurisdiction};
use crate::dedup::deduplicate_events;
use crate::types::event::RegulatoryEvent;
use crate::types::snapshot::WeeklySnapshot;

/// Rolling history retention: one year of weekly runs. Appending past
/// the cap evicts strictly oldest-first.
pub const MAX_HISTORY_WEEKS: usize = 52;

/// Result of aggregating one run's batches.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOutcome {
    /// Enriched events, newest first
    pub events: Vec<RegulatoryEvent>,

    /// Updated history, oldest first, at most [`MAX_HISTORY_WEEKS`] long
    pub history: Vec<WeeklySnapshot>,
}

/// Fill in the classification labels on a deduplicated event.
///
/// A severity already assigned by the source is preserved; jurisdiction
/// and category are always recomputed.
pub fn enrich_event(mut event: RegulatoryEvent) -> RegulatoryEvent {
    if event.severity.is_none() {
        event.severity = Some(classify_severity(&event));
    }
    event.jurisdiction = Some(extract_jurisdiction(&event));
    event.category = Some(categorize_event(&event));
    event
}

/// Aggregate per-query batches into the run's enriched event set and
/// the updated weekly history.
///
/// Batches are flattened in query order, deduplicated, enriched, and
/// stably sorted newest-first (events without a usable timestamp order
/// as the Unix epoch and land last). A snapshot for `run_date` is
/// appended to `history`, which is then trimmed from the front to
/// [`MAX_HISTORY_WEEKS`] entries.
pub fn aggregate(
    batches: Vec<Vec<RegulatoryEvent>>,
    mut history: Vec<WeeklySnapshot>,
    run_date: NaiveDate,
) -> AggregateOutcome {
    let merged: Vec<RegulatoryEvent> = batches.into_iter().flatten().collect();

    let mut events: Vec<RegulatoryEvent> = deduplicate_events(merged)
        .into_iter()
        .map(enrich_event)
        .collect();

    // Stable sort: equal timestamps keep their dedup-survivor order.
    events.sort_by_key(|event| Reverse(event.occurred_at()));

    history.push(WeeklySnapshot::for_events(run_date, &events));
    if history.len() > MAX_HISTORY_WEEKS {
        let excess = history.len() - MAX_HISTORY_WEEKS;
        history.drain(..excess);
    }

    AggregateOutcome { events, history }
}
