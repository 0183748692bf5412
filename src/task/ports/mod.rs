//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services and
//! by the board coordinator.

pub mod activity;
pub mod repository;

pub use activity::ActivityRepository;
pub use repository::{
    TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskStatusWriter,
};
