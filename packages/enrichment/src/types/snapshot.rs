//! Weekly history snapshots.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::event::{RegulatoryEvent, Severity};

/// One row in the rolling weekly history: aggregate statistics for a
/// single pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySnapshot {
    /// Run date truncated to day, serialized `YYYY-MM-DD`
    pub week: NaiveDate,

    /// Total enriched events that run
    pub count: usize,

    /// Events with severity `critical`
    pub critical: usize,

    /// Events with severity `high`
    pub high: usize,
}

impl WeeklySnapshot {
    /// Build a snapshot for a run's enriched event set.
    pub fn for_events(week: NaiveDate, events: &[RegulatoryEvent]) -> Self {
        Self {
            week,
            count: events.len(),
            critical: events
                .iter()
                .filter(|e| e.severity == Some(Severity::Critical))
                .count(),
            high: events
                .iter()
                .filter(|e| e.severity == Some(Severity::High))
                .count(),
        }
    }
}
