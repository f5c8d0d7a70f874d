use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use planboard_application::SnapshotCache;
use planboard_core::{AppError, AppResult};
use planboard_domain::ResourceAssignment;

/// Snapshot cache persisted as one JSON document on the local filesystem.
///
/// The file is the single named slot of the cache: every store overwrites
/// it whole, and a missing file reads back as an empty snapshot.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotCache {
    path: PathBuf,
}

impl JsonFileSnapshotCache {
    /// Creates a cache backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SnapshotCache for JsonFileSnapshotCache {
    async fn load(&self) -> AppResult<Vec<ResourceAssignment>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read snapshot file '{}': {error}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|error| {
            AppError::CacheCorrupt(format!(
                "snapshot file '{}' holds malformed JSON: {error}",
                self.path.display()
            ))
        })
    }

    async fn store(&self, assignments: &[ResourceAssignment]) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(assignments).map_err(|error| {
            AppError::Internal(format!("failed to serialize snapshot: {error}"))
        })?;

        tokio::fs::write(&self.path, bytes).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to write snapshot file '{}': {error}",
                self.path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use planboard_application::SnapshotCache;
    use planboard_core::{AppError, AssignmentId, MonthKey};
    use planboard_domain::ResourceAssignment;
    use uuid::Uuid;

    use super::JsonFileSnapshotCache;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("planboard-snapshot-{}.json", Uuid::new_v4()))
    }

    fn assignment(name: &str) -> ResourceAssignment {
        ResourceAssignment::monthly(
            AssignmentId::new(),
            name,
            "Delivery",
            "P1",
            "X",
            MonthKey::FALLBACK,
            40,
            1000,
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty_snapshot() {
        let cache = JsonFileSnapshotCache::new(temp_path());

        let loaded = cache.load().await;
        assert!(matches!(loaded, Ok(records) if records.is_empty()));
    }

    #[tokio::test]
    async fn store_then_load_round_trips_the_snapshot() {
        let path = temp_path();
        let cache = JsonFileSnapshotCache::new(path.clone());

        let records = vec![assignment("A"), assignment("B")];
        let stored = cache.store(&records).await;
        assert!(stored.is_ok());

        let loaded = cache.load().await;
        assert!(loaded.is_ok());
        assert_eq!(loaded.unwrap_or_default(), records);

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn malformed_file_is_reported_as_corrupt() {
        let path = temp_path();
        let written = tokio::fs::write(&path, b"{not json").await;
        assert!(written.is_ok());

        let cache = JsonFileSnapshotCache::new(path.clone());
        let loaded = cache.load().await;
        assert!(matches!(loaded, Err(AppError::CacheCorrupt(_))));

        let _ = tokio::fs::remove_file(path).await;
    }
}
