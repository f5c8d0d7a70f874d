use async_trait::async_trait;
use planboard_core::{AppResult, AssignmentId};
use planboard_domain::ResourceAssignment;

/// Remote collection port, resolved against the configured backend.
///
/// All operations are best-effort from the caller's point of view: the
/// service absorbs every error this port returns and never lets one reach
/// the in-memory state.
#[async_trait]
pub trait RemoteAssignmentStore: Send + Sync {
    /// Lists every stored assignment, ordered by id ascending.
    async fn list_all(&self) -> AppResult<Vec<ResourceAssignment>>;

    /// Inserts or fully replaces an assignment by id.
    async fn upsert(&self, assignment: &ResourceAssignment) -> AppResult<()>;

    /// Deletes an assignment by id.
    async fn delete(&self, id: AssignmentId) -> AppResult<()>;
}

/// Local durable cache port: one named slot holding the full snapshot.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Reads the cached snapshot; an absent slot is an empty result.
    async fn load(&self) -> AppResult<Vec<ResourceAssignment>>;

    /// Replaces the cached snapshot with the given records.
    async fn store(&self, assignments: &[ResourceAssignment]) -> AppResult<()>;
}

/// Bootstrap dataset port, used when every persistence tier comes up empty.
pub trait BootstrapSource: Send + Sync {
    /// Generates the initial sample dataset.
    fn generate(&self) -> Vec<ResourceAssignment>;
}
