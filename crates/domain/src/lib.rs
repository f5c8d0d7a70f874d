//! Domain entities and invariants.

#![forbid(unsafe_code)]

/// Pure aggregation of assignment collections into renderer view-models.
pub mod analytics;

mod assignment;

pub use assignment::{AssignmentStatus, ResourceAssignment};
