//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the enrichment
//! library without making real API or model calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{AnalysisError, AnalysisResult, SourceError, SourceResult};
use crate::traits::analyst::Analyst;
use crate::traits::source::{EventSource, TimeWindow};
use crate::types::brief::AnalysisBrief;
use crate::types::config::QuerySpec;
use crate::types::event::RegulatoryEvent;

fn query_key(query: &QuerySpec) -> String {
    format!("{}/{}", query.entities, query.topic)
}

/// A mock event source with canned batches per query.
///
/// Queries without a configured batch return empty; queries marked as
/// failing return a 500-status error. Calls are recorded for
/// assertions.
#[derive(Default)]
pub struct MockEventSource {
    batches: HashMap<String, Vec<RegulatoryEvent>>,
    failures: HashSet<String>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockEventSource {
    /// Create a mock source with no canned batches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned batch for a query.
    pub fn with_batch(
        mut self,
        entities: &str,
        topic: &str,
        events: Vec<RegulatoryEvent>,
    ) -> Self {
        self.batches
            .insert(query_key(&QuerySpec::new(entities, topic)), events);
        self
    }

    /// Make a query fail with a non-success status.
    pub fn with_failure(mut self, entities: &str, topic: &str) -> Self {
        self.failures
            .insert(query_key(&QuerySpec::new(entities, topic)));
        self
    }

    /// The queries fetched so far, as `entities/topic` keys, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl EventSource for MockEventSource {
    async fn fetch(
        &self,
        query: &QuerySpec,
        _window: TimeWindow,
    ) -> SourceResult<Vec<RegulatoryEvent>> {
        let key = query_key(query);
        self.calls.write().unwrap().push(key.clone());

        if self.failures.contains(&key) {
            return Err(SourceError::Status { status: 500 });
        }
        Ok(self.batches.get(&key).cloned().unwrap_or_default())
    }
}

/// A mock analyst with a canned brief.
///
/// Without a brief it answers `Ok(None)` (an unparseable model
/// response); `failing()` makes the call itself error.
#[derive(Default)]
pub struct MockAnalyst {
    brief: Option<AnalysisBrief>,
    fail: bool,
    calls: Arc<RwLock<Vec<usize>>>,
}

impl MockAnalyst {
    /// Create a mock analyst that answers `Ok(None)`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer with the given brief.
    pub fn with_brief(mut self, brief: AnalysisBrief) -> Self {
        self.brief = Some(brief);
        self
    }

    /// Make every call fail with a non-success status.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Event counts passed to `analyze` so far.
    pub fn calls(&self) -> Vec<usize> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Analyst for MockAnalyst {
    async fn analyze(
        &self,
        events: &[RegulatoryEvent],
    ) -> AnalysisResult<Option<AnalysisBrief>> {
        self.calls.write().unwrap().push(events.len());

        if self.fail {
            return Err(AnalysisError::Status { status: 500 });
        }
        Ok(self.brief.clone())
    }
}
