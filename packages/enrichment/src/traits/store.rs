//! Storage trait for the persisted artifacts.
//!
//! Two artifacts survive between runs: the event store (the enriched
//! event set, possibly wrapped with analysis) and the weekly history
//! log. Both are fully read-then-overwritten each run - there are no
//! incremental updates, and a failed run must leave the prior artifacts
//! intact.

use async_trait::async_trait;

use crate::error::StorageResult;
use crate::types::brief::EventDocument;
use crate::types::snapshot::WeeklySnapshot;

/// Persistence for the event store and history log.
///
/// # Implementations
///
/// - `JsonFileStore` - events.json/history.json on disk
/// - `MemoryStore` - in-memory, for tests and development
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Load the persisted history, oldest first. Empty when no history
    /// exists yet.
    async fn load_history(&self) -> StorageResult<Vec<WeeklySnapshot>>;

    /// Overwrite the history log.
    async fn save_history(&self, history: &[WeeklySnapshot]) -> StorageResult<()>;

    /// Load the persisted event store, if any.
    async fn load_events(&self) -> StorageResult<Option<EventDocument>>;

    /// Overwrite the event store.
    async fn save_events(&self, document: &EventDocument) -> StorageResult<()>;
}

// Shared handles work as stores, so a caller can keep one for
// inspection while the pipeline owns the other.
#[async_trait]
impl<T: EventStore + ?Sized> EventStore for std::sync::Arc<T> {
    async fn load_history(&self) -> StorageResult<Vec<WeeklySnapshot>> {
        (**self).load_history().await
    }

    async fn save_history(&self, history: &[WeeklySnapshot]) -> StorageResult<()> {
        (**self).save_history(history).await
    }

    async fn load_events(&self) -> StorageResult<Option<EventDocument>> {
        (**self).load_events().await
    }

    async fn save_events(&self, document: &EventDocument) -> StorageResult<()> {
        (**self).save_events(document).await
    }
}
