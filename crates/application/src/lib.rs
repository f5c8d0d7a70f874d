//! Application services and persistence ports for the Planboard core.

#![forbid(unsafe_code)]

mod assignment_store;
mod dashboard_service;
mod ports;

pub use assignment_store::AssignmentStore;
pub use dashboard_service::{
    CreateAssignmentInput, CreatePlanningInput, DashboardService, DashboardViewModel,
    TOP_PROJECT_LIMIT,
};
pub use ports::{BootstrapSource, RemoteAssignmentStore, SnapshotCache};
