use planboard_core::AssignmentId;
use planboard_domain::ResourceAssignment;
use tokio::sync::RwLock;

/// Canonical in-memory assignment collection for the session.
///
/// Single source of truth between loads: every mutation goes through here
/// first, and the lock guarantees aggregation reads never observe a
/// half-applied replace.
#[derive(Debug, Default)]
pub struct AssignmentStore {
    assignments: RwLock<Vec<ResourceAssignment>>,
}

impl AssignmentStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            assignments: RwLock::new(Vec::new()),
        }
    }

    /// Bulk-replaces the collection, used on initial load.
    ///
    /// Id uniqueness is enforced by keeping the first occurrence of each id.
    pub async fn replace_all(&self, records: Vec<ResourceAssignment>) {
        let mut deduped: Vec<ResourceAssignment> = Vec::with_capacity(records.len());
        for record in records {
            if deduped.iter().all(|existing| existing.id() != record.id()) {
                deduped.push(record);
            }
        }

        *self.assignments.write().await = deduped;
    }

    /// Replaces the record with the same id in place, preserving its
    /// position, or appends it. Returns the stored record.
    pub async fn upsert(&self, record: ResourceAssignment) -> ResourceAssignment {
        let mut assignments = self.assignments.write().await;
        match assignments
            .iter_mut()
            .find(|existing| existing.id() == record.id())
        {
            Some(slot) => *slot = record.clone(),
            None => assignments.push(record.clone()),
        }

        record
    }

    /// Looks up one record by id.
    pub async fn get(&self, id: AssignmentId) -> Option<ResourceAssignment> {
        self.assignments
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
    }

    /// Removes the record with the given id if present.
    ///
    /// Returns whether a record was removed; an absent id is a no-op, not an
    /// error.
    pub async fn remove(&self, id: AssignmentId) -> bool {
        let mut assignments = self.assignments.write().await;
        let before = assignments.len();
        assignments.retain(|record| record.id() != id);
        assignments.len() != before
    }

    /// Returns a cloned snapshot of the collection.
    pub async fn all(&self) -> Vec<ResourceAssignment> {
        self.assignments.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use planboard_core::{AssignmentId, MonthKey};
    use planboard_domain::ResourceAssignment;

    use super::AssignmentStore;

    fn assignment(id: AssignmentId, name: &str, hours: u32) -> ResourceAssignment {
        ResourceAssignment::monthly(
            id,
            name,
            "Delivery",
            "P1",
            "X",
            MonthKey::FALLBACK,
            hours,
            1000,
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[tokio::test]
    async fn upsert_twice_with_same_id_never_grows_the_count() {
        let store = AssignmentStore::new();
        let id = AssignmentId::new();

        store.upsert(assignment(id, "A", 10)).await;
        store.upsert(assignment(id, "A", 20)).await;

        let all = store.all().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].hours_per_month(), 20);
    }

    #[tokio::test]
    async fn upsert_preserves_position_of_replaced_record() {
        let store = AssignmentStore::new();
        let first = AssignmentId::new();
        let second = AssignmentId::new();

        store.upsert(assignment(first, "A", 10)).await;
        store.upsert(assignment(second, "B", 10)).await;
        store.upsert(assignment(first, "A2", 15)).await;

        let all = store.all().await;
        assert_eq!(all[0].name().as_str(), "A2");
        assert_eq!(all[1].name().as_str(), "B");
    }

    #[tokio::test]
    async fn remove_is_a_noop_for_unknown_ids() {
        let store = AssignmentStore::new();
        let id = AssignmentId::new();
        store.upsert(assignment(id, "A", 10)).await;

        assert!(!store.remove(AssignmentId::new()).await);
        assert_eq!(store.all().await.len(), 1);

        assert!(store.remove(id).await);
        assert!(store.all().await.is_empty());
        assert!(!store.remove(id).await);
    }

    #[tokio::test]
    async fn replace_all_keeps_first_occurrence_of_duplicate_ids() {
        let store = AssignmentStore::new();
        let id = AssignmentId::new();

        store
            .replace_all(vec![
                assignment(id, "first", 10),
                assignment(AssignmentId::new(), "other", 10),
                assignment(id, "second", 20),
            ])
            .await;

        let all = store.all().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name().as_str(), "first");
    }
}
