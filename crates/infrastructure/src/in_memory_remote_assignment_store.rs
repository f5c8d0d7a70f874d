use async_trait::async_trait;
use planboard_application::RemoteAssignmentStore;
use planboard_core::{AppResult, AssignmentId};
use planboard_domain::ResourceAssignment;
use tokio::sync::RwLock;

/// In-memory remote store implementation.
#[derive(Debug, Default)]
pub struct InMemoryRemoteAssignmentStore {
    records: RwLock<Vec<ResourceAssignment>>,
}

impl InMemoryRemoteAssignmentStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Creates a store pre-populated with the given records.
    #[must_use]
    pub fn with_records(records: Vec<ResourceAssignment>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl RemoteAssignmentStore for InMemoryRemoteAssignmentStore {
    async fn list_all(&self) -> AppResult<Vec<ResourceAssignment>> {
        let mut records = self.records.read().await.clone();
        records.sort_by_key(ResourceAssignment::id);
        Ok(records)
    }

    async fn upsert(&self, assignment: &ResourceAssignment) -> AppResult<()> {
        let mut records = self.records.write().await;
        match records
            .iter_mut()
            .find(|existing| existing.id() == assignment.id())
        {
            Some(slot) => *slot = assignment.clone(),
            None => records.push(assignment.clone()),
        }

        Ok(())
    }

    async fn delete(&self, id: AssignmentId) -> AppResult<()> {
        self.records
            .write()
            .await
            .retain(|record| record.id() != id);
        Ok(())
    }
}
