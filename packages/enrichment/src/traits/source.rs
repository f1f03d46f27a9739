//! Event source trait for external discovery.
//!
//! Abstracts over the regulatory-event search API. The pipeline issues
//! one fetch per configured query, sequentially, and treats any failure
//! as an empty batch - partial-result tolerance is a design choice, so
//! implementations should surface failures as errors rather than
//! papering over them.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use crate::error::SourceResult;
use crate::types::config::QuerySpec;
use crate::types::event::RegulatoryEvent;

/// The time range a query covers, as two UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// The window ending now and reaching `days` back.
    pub fn last_days(days: i64) -> Self {
        Self::ending_at(Utc::now(), days)
    }

    /// The window ending at a fixed instant and reaching `days` back.
    pub fn ending_at(end: DateTime<Utc>, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }
}

/// A provider of raw regulatory events for an entity/topic query.
///
/// # Implementations
///
/// - `CpwTrackerSource` - the RapidAPI cpw-tracker search API
/// - `MockEventSource` - for testing (in [`crate::testing`])
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch the raw events matching `query` within `window`.
    ///
    /// An empty result is normal; errors are per-query and the caller
    /// decides how to degrade.
    async fn fetch(
        &self,
        query: &QuerySpec,
        window: TimeWindow,
    ) -> SourceResult<Vec<RegulatoryEvent>>;
}
