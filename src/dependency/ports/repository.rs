//! Repository port for dependency edge persistence.

use crate::dependency::domain::{DependencyEdge, DependencyId};
use crate::task::domain::ProjectId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for dependency repository operations.
pub type DependencyRepositoryResult<T> = Result<T, DependencyRepositoryError>;

/// Dependency edge persistence contract.
#[async_trait]
pub trait DependencyRepository: Send + Sync {
    /// Loads every edge of a project in insertion order.
    ///
    /// # Errors
    ///
    /// Returns persistence errors from the underlying store.
    async fn load_edges(&self, project_id: ProjectId)
    -> DependencyRepositoryResult<Vec<DependencyEdge>>;

    /// Stores a new edge and returns its identifier.
    ///
    /// Stores that assign their own identifiers return the assigned one;
    /// callers use it in place of `edge.id()` from then on.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyRepositoryError::DuplicateEdge`] when the edge ID
    /// already exists.
    async fn save_edge(&self, edge: &DependencyEdge) -> DependencyRepositoryResult<DependencyId>;

    /// Deletes an edge.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyRepositoryError::NotFound`] when the edge does not
    /// exist.
    async fn delete_edge(&self, edge_id: DependencyId) -> DependencyRepositoryResult<()>;
}

/// Errors returned by dependency repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DependencyRepositoryError {
    /// An edge with the same identifier already exists.
    #[error("duplicate dependency identifier: {0}")]
    DuplicateEdge(DependencyId),

    /// The edge was not found.
    #[error("dependency not found: {0}")]
    NotFound(DependencyId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DependencyRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
