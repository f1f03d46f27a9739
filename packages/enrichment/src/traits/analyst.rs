//! Analyst trait for the optional AI summarization step.

use async_trait::async_trait;

use crate::error::AnalysisResult;
use crate::types::brief::AnalysisBrief;
use crate::types::event::RegulatoryEvent;

/// A collaborator that turns a week's enriched events into a narrative
/// brief.
///
/// The distinction between the two non-success outcomes matters to the
/// caller's logging but not its behavior: `Err` means the request
/// itself failed (transport, non-success status), `Ok(None)` means a
/// response arrived but contained no parseable brief. Both degrade to
/// "no brief" - an expected outcome, not an exceptional one.
#[async_trait]
pub trait Analyst: Send + Sync {
    /// Produce a brief for the given enriched events, or `None` when
    /// the response is unusable.
    async fn analyze(
        &self,
        events: &[RegulatoryEvent],
    ) -> AnalysisResult<Option<AnalysisBrief>>;
}
