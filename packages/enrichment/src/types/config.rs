//! Pipeline configuration.
//!
//! The query list is configuration, not data the pipeline reasons
//! about: it is built once at process start and passed in immutably.

use serde::{Deserialize, Serialize};

/// One entity/topic pair submitted to the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Entity class to search for (e.g. "cryptocurrency exchanges")
    pub entities: String,

    /// Topic to search within (e.g. "regulatory action")
    pub topic: String,
}

impl QuerySpec {
    /// Create a new query spec.
    pub fn new(entities: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            entities: entities.into(),
            topic: topic.into(),
        }
    }
}

/// Configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Queries issued each run, in order.
    #[serde(default)]
    pub queries: Vec<QuerySpec>,

    /// Size of the lookback window in days. Default: 7.
    pub lookback_days: i64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queries: vec![
                QuerySpec::new("cryptocurrency exchanges", "regulatory action"),
                QuerySpec::new("cryptocurrency exchanges", "sanctions"),
                QuerySpec::new("DeFi protocols", "regulatory action"),
                QuerySpec::new("financial regulators", "cryptocurrency enforcement"),
            ],
            lookback_days: 7,
        }
    }
}

impl PipelineConfig {
    /// Create a config with the default query set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the query list.
    pub fn with_queries(mut self, queries: impl IntoIterator<Item = QuerySpec>) -> Self {
        self.queries = queries.into_iter().collect();
        self
    }

    /// Set the lookback window in days.
    pub fn with_lookback_days(mut self, days: i64) -> Self {
        self.lookback_days = days;
        self
    }
}
