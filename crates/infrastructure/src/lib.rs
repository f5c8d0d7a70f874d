//! Infrastructure adapters for the Planboard persistence ports.

#![forbid(unsafe_code)]

mod http_remote_assignment_store;
mod in_memory_remote_assignment_store;
mod in_memory_snapshot_cache;
mod json_file_snapshot_cache;
mod sample_bootstrap_source;

pub use http_remote_assignment_store::{HttpRemoteAssignmentStore, RemoteStoreConfig};
pub use in_memory_remote_assignment_store::InMemoryRemoteAssignmentStore;
pub use in_memory_snapshot_cache::InMemorySnapshotCache;
pub use json_file_snapshot_cache::JsonFileSnapshotCache;
pub use sample_bootstrap_source::SampleBootstrapSource;
