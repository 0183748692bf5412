//! Domain model for task dependencies.
//!
//! A [`DependencyEdge`] states that one task depends on another. The
//! [`DependencyGraph`] holds a project's edges and answers adjacency queries;
//! the [`CycleGuard`] keeps that graph free of self-loops, duplicates, and
//! cycles.

mod edge;
mod error;
mod graph;
mod guard;
mod ids;

pub use edge::{DependencyEdge, PersistedDependencyData};
pub use error::DependencyError;
pub use graph::DependencyGraph;
pub use guard::CycleGuard;
pub use ids::DependencyId;
