//! The enrichment pipeline - main entry point of the library.
//!
//! Drives one run: fetch each configured query sequentially, aggregate
//! (dedup, classify, sort, roll history), persist, and optionally hand
//! the enriched events to an analyst for a narrative brief.
//!
//! Failure handling is concentrated here. Per-query failures degrade to
//! empty batches, analyst failures degrade to "no brief", storage
//! failures abort the run with the prior artifacts untouched.

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};

use crate::aggregate::aggregate;
use crate::error::Result;
use crate::traits::analyst::Analyst;
use crate::traits::source::{EventSource, TimeWindow};
use crate::traits::store::EventStore;
use crate::types::brief::{AnalyzedEventSet, EventDocument};
use crate::types::config::PipelineConfig;
use crate::types::event::{RegulatoryEvent, Severity};

/// One pipeline run, wired to its collaborators.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = Pipeline::new(CpwTrackerSource::from_env()?, JsonFileStore::new("data"))
///     .with_analyst(GitHubModelsAnalyst::new(token));
///
/// let report = pipeline.run().await?;
/// println!("kept {} events", report.unique_events);
/// ```
pub struct Pipeline<S: EventSource, T: EventStore> {
    source: S,
    store: T,
    analyst: Option<Box<dyn Analyst>>,
    config: PipelineConfig,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Events fetched across all queries, before dedup
    pub raw_events: usize,

    /// Events surviving dedup (the persisted set)
    pub unique_events: usize,

    /// Critical-severity events in the persisted set
    pub critical: usize,

    /// High-severity events in the persisted set
    pub high: usize,

    /// History length after this run
    pub history_len: usize,

    /// Whether an analysis brief was produced and persisted
    pub analyzed: bool,
}

impl<S: EventSource, T: EventStore> Pipeline<S, T> {
    /// Create a pipeline with the default configuration and no analyst.
    pub fn new(source: S, store: T) -> Self {
        Self {
            source,
            store,
            analyst: None,
            config: PipelineConfig::default(),
        }
    }

    /// Attach the optional analysis step.
    pub fn with_analyst(mut self, analyst: impl Analyst + 'static) -> Self {
        self.analyst = Some(Box::new(analyst));
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run once, dated now.
    pub async fn run(&self) -> Result<RunReport> {
        self.run_at(
            Utc::now().date_naive(),
            TimeWindow::last_days(self.config.lookback_days),
        )
        .await
    }

    /// Run once with an explicit run date and fetch window.
    pub async fn run_at(&self, run_date: NaiveDate, window: TimeWindow) -> Result<RunReport> {
        let batches = self.fetch_batches(window).await;
        let raw_events: usize = batches.iter().map(Vec::len).sum();

        let history = self.store.load_history().await?;
        let outcome = aggregate(batches, history, run_date);
        info!(
            raw = raw_events,
            unique = outcome.events.len(),
            "deduplicated and enriched"
        );

        self.store
            .save_events(&EventDocument::Events(outcome.events.clone()))
            .await?;
        self.store.save_history(&outcome.history).await?;

        let analyzed = self.analyze_and_persist(&outcome.events).await?;

        Ok(RunReport {
            raw_events,
            unique_events: outcome.events.len(),
            critical: count_severity(&outcome.events, Severity::Critical),
            high: count_severity(&outcome.events, Severity::High),
            history_len: outcome.history.len(),
            analyzed,
        })
    }

    /// Fetch every configured query in order. A failing query is logged
    /// and contributes an empty batch; the run continues.
    async fn fetch_batches(&self, window: TimeWindow) -> Vec<Vec<RegulatoryEvent>> {
        let mut batches = Vec::with_capacity(self.config.queries.len());
        for query in &self.config.queries {
            info!(entities = %query.entities, topic = %query.topic, "fetching query");
            match self.source.fetch(query, window).await {
                Ok(events) => batches.push(events),
                Err(err) => {
                    warn!(
                        entities = %query.entities,
                        topic = %query.topic,
                        error = %err,
                        "query failed, continuing with empty batch"
                    );
                    batches.push(Vec::new());
                }
            }
        }
        batches
    }

    /// Run the optional analysis step and, on success, replace the
    /// persisted event store with the wrapped document.
    async fn analyze_and_persist(&self, events: &[RegulatoryEvent]) -> Result<bool> {
        let Some(analyst) = &self.analyst else {
            return Ok(false);
        };

        match analyst.analyze(events).await {
            Ok(Some(brief)) => {
                info!(risk_level = ?brief.risk_level, "analysis complete");
                let document = EventDocument::Analyzed(AnalyzedEventSet {
                    generated_at: Utc::now(),
                    analysis: brief,
                    events: events.to_vec(),
                });
                self.store.save_events(&document).await?;
                Ok(true)
            }
            Ok(None) => {
                warn!("model response held no usable brief, keeping plain event list");
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "analysis failed, keeping plain event list");
                Ok(false)
            }
        }
    }
}

fn count_severity(events: &[RegulatoryEvent], severity: Severity) -> usize {
    events
        .iter()
        .filter(|e| e.severity == Some(severity))
        .count()
}
