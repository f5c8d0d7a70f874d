use async_trait::async_trait;
use planboard_application::SnapshotCache;
use planboard_core::AppResult;
use planboard_domain::ResourceAssignment;
use tokio::sync::RwLock;

/// In-memory snapshot cache implementation.
#[derive(Debug, Default)]
pub struct InMemorySnapshotCache {
    snapshot: RwLock<Vec<ResourceAssignment>>,
}

impl InMemorySnapshotCache {
    /// Creates an empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SnapshotCache for InMemorySnapshotCache {
    async fn load(&self) -> AppResult<Vec<ResourceAssignment>> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn store(&self, assignments: &[ResourceAssignment]) -> AppResult<()> {
        *self.snapshot.write().await = assignments.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use planboard_application::SnapshotCache;
    use planboard_core::{AssignmentId, MonthKey};
    use planboard_domain::ResourceAssignment;

    use super::InMemorySnapshotCache;

    #[tokio::test]
    async fn store_overwrites_the_previous_snapshot() {
        let cache = InMemorySnapshotCache::new();
        let record = ResourceAssignment::monthly(
            AssignmentId::new(),
            "A",
            "Delivery",
            "P1",
            "X",
            MonthKey::FALLBACK,
            40,
            1000,
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(cache.store(std::slice::from_ref(&record)).await.is_ok());
        assert!(cache.store(&[]).await.is_ok());

        let loaded = cache.load().await;
        assert!(matches!(loaded, Ok(records) if records.is_empty()));
    }
}
