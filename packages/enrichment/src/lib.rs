//! Regulatory Event Enrichment Library
//!
//! A scheduled data-enrichment pipeline for regulatory intelligence:
//! query a regulatory-event search API across several entity/topic
//! combinations, merge and deduplicate the results, classify each event
//! with heuristic rules, maintain a rolling weekly history, and
//! optionally ask a language model for a narrative brief.
//!
//! # Design
//!
//! The core (classifiers, dedup, aggregation) is pure and total: it
//! never fails, treats missing fields as empty, and does no I/O.
//! Everything fallible lives behind the collaborator traits and is
//! handled at the pipeline boundary - a failing query degrades to an
//! empty batch, a failing analyst to "no brief", while a storage
//! failure aborts the run with prior artifacts untouched.
//!
//! # Usage
//!
//! ```rust,ignore
//! use enrichment::{CpwTrackerSource, GitHubModelsAnalyst, JsonFileStore, Pipeline};
//!
//! let pipeline = Pipeline::new(CpwTrackerSource::from_env()?, JsonFileStore::new("data"))
//!     .with_analyst(GitHubModelsAnalyst::new(token));
//!
//! let report = pipeline.run().await?;
//! ```
//!
//! # Modules
//!
//! - [`classify`] - ordered first-match-wins keyword classifiers
//! - [`dedup`] - cross-query duplicate collapse
//! - [`aggregate`] - merge, enrich, sort, and roll the history forward
//! - [`pipeline`] - the run orchestrator
//! - [`traits`] - collaborator abstractions (source, analyst, store)
//! - [`sources`] - search API implementations
//! - [`ai`] - model analyst and prompt construction
//! - [`stores`] - storage implementations
//! - [`security`] - credential handling
//! - [`testing`] - mock implementations for testing

pub mod aggregate;
pub mod ai;
pub mod classify;
pub mod dedup;
pub mod error;
pub mod pipeline;
pub mod security;
pub mod sources;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    AnalysisError, AnalysisResult, EnrichmentError, Result, SourceError, SourceResult,
    StorageError, StorageResult,
};
pub use types::{
    brief::{AnalysisBrief, AnalyzedEventSet, EventDocument, KeyDevelopment, RiskLevel},
    config::{PipelineConfig, QuerySpec},
    event::{Category, Jurisdiction, RegulatoryEvent, Severity},
    snapshot::WeeklySnapshot,
};

// Re-export the collaborator traits
pub use traits::{
    analyst::Analyst,
    source::{EventSource, TimeWindow},
    store::EventStore,
};

// Re-export the core functions
pub use aggregate::{aggregate, enrich_event, AggregateOutcome, MAX_HISTORY_WEEKS};
pub use classify::{categorize_event, classify_severity, extract_jurisdiction};
pub use dedup::deduplicate_events;

// Re-export the pipeline
pub use pipeline::{Pipeline, RunReport};

// Re-export collaborator implementations
pub use ai::{build_analysis_prompt, extract_brief, format_event_digest, GitHubModelsAnalyst};
pub use sources::CpwTrackerSource;
pub use stores::{JsonFileStore, MemoryStore};

// Re-export credential helpers
pub use security::{optional_env, require_env, SecretString};
