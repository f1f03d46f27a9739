//! JSON file storage: `events.json` and `history.json` in a data
//! directory.
//!
//! Both artifacts are whole files, rewritten each run. Writes go
//! through a temp file and rename so an interrupted run never leaves a
//! partial artifact behind.

use async_trait::async_trait;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use crate::error::StorageResult;
use crate::traits::store::EventStore;
use crate::types::brief::EventDocument;
use crate::types::snapshot::WeeklySnapshot;

/// File-backed store rooted at a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created on
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the event store file.
    pub fn events_path(&self) -> PathBuf {
        self.dir.join("events.json")
    }

    /// Path of the history log file.
    pub fn history_path(&self) -> PathBuf {
        self.dir.join("history.json")
    }

    async fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).await?;

        let bytes = serde_json::to_vec_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl EventStore for JsonFileStore {
    async fn load_history(&self) -> StorageResult<Vec<WeeklySnapshot>> {
        let path = self.history_path();
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(history) => Ok(history),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "history file unreadable, starting fresh");
                    Ok(Vec::new())
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save_history(&self, history: &[WeeklySnapshot]) -> StorageResult<()> {
        self.write_json(&self.history_path(), &history).await
    }

    async fn load_events(&self) -> StorageResult<Option<EventDocument>> {
        match fs::read(self.events_path()).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save_events(&self, document: &EventDocument) -> StorageResult<()> {
        self.write_json(&self.events_path(), document).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::event::RegulatoryEvent;

    fn snapshot(week: &str, count: usize) -> WeeklySnapshot {
        WeeklySnapshot {
            week: week.parse().unwrap(),
            count,
            critical: 0,
            high: 0,
        }
    }

    #[tokio::test]
    async fn test_history_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let history = vec![snapshot("2024-01-03", 5), snapshot("2024-01-10", 8)];
        store.save_history(&history).await.unwrap();

        let loaded = store.load_history().await.unwrap();
        assert_eq!(loaded, history);
    }

    #[tokio::test]
    async fn test_missing_history_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_history_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        tokio::fs::create_dir_all(dir.path()).await.unwrap();
        tokio::fs::write(store.history_path(), b"{not json")
            .await
            .unwrap();

        assert!(store.load_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_events_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());

        let document = EventDocument::Events(vec![RegulatoryEvent::new()
            .with_entity("Binance")
            .with_description("SEC fine imposed")]);
        store.save_events(&document).await.unwrap();

        let loaded = store.load_events().await.unwrap().unwrap();
        assert_eq!(loaded, document);
    }

    #[tokio::test]
    async fn test_missing_events_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load_events().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("data"));
        store.save_history(&[snapshot("2024-01-03", 1)]).await.unwrap();
        assert_eq!(store.load_history().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_fails_when_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("data");
        tokio::fs::write(&blocker, b"in the way").await.unwrap();

        let store = JsonFileStore::new(&blocker);
        assert!(store.save_history(&[]).await.is_err());
    }

    #[tokio::test]
    async fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save_history(&[snapshot("2024-01-03", 1)]).await.unwrap();

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["history.json".to_string()]);
    }
}
