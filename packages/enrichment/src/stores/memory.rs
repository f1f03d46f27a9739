//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::error::StorageResult;
use crate::traits::store::EventStore;
use crate::types::brief::EventDocument;
use crate::types::snapshot::WeeklySnapshot;

/// In-memory store for the event document and history log.
///
/// Useful for tests and development. Not suitable for production as
/// data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    document: RwLock<Option<EventDocument>>,
    history: RwLock<Vec<WeeklySnapshot>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with prior history.
    pub fn with_history(self, history: Vec<WeeklySnapshot>) -> Self {
        *self.history.write().unwrap() = history;
        self
    }

    /// The currently stored event document.
    pub fn document(&self) -> Option<EventDocument> {
        self.document.read().unwrap().clone()
    }

    /// The currently stored history.
    pub fn history(&self) -> Vec<WeeklySnapshot> {
        self.history.read().unwrap().clone()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn load_history(&self) -> StorageResult<Vec<WeeklySnapshot>> {
        Ok(self.history.read().unwrap().clone())
    }

    async fn save_history(&self, history: &[WeeklySnapshot]) -> StorageResult<()> {
        *self.history.write().unwrap() = history.to_vec();
        Ok(())
    }

    async fn load_events(&self) -> StorageResult<Option<EventDocument>> {
        Ok(self.document.read().unwrap().clone())
    }

    async fn save_events(&self, document: &EventDocument) -> StorageResult<()> {
        *self.document.write().unwrap() = Some(document.clone());
        Ok(())
    }
}
