//! In-memory repository for dependency edges.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::dependency::{
    domain::{DependencyEdge, DependencyId},
    ports::{DependencyRepository, DependencyRepositoryError, DependencyRepositoryResult},
};
use crate::task::domain::ProjectId;

/// Thread-safe in-memory dependency repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDependencyRepository {
    state: Arc<RwLock<InMemoryDependencyState>>,
}

#[derive(Debug, Default)]
struct InMemoryDependencyState {
    edges: HashMap<DependencyId, DependencyEdge>,
    project_index: HashMap<ProjectId, Vec<DependencyId>>,
}

impl InMemoryDependencyRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DependencyRepository for InMemoryDependencyRepository {
    async fn load_edges(
        &self,
        project_id: ProjectId,
    ) -> DependencyRepositoryResult<Vec<DependencyEdge>> {
        let state = self.state.read().map_err(|err| {
            DependencyRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let edges = state
            .project_index
            .get(&project_id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.edges.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(edges)
    }

    async fn save_edge(&self, edge: &DependencyEdge) -> DependencyRepositoryResult<DependencyId> {
        let mut state = self.state.write().map_err(|err| {
            DependencyRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.edges.contains_key(&edge.id()) {
            return Err(DependencyRepositoryError::DuplicateEdge(edge.id()));
        }
        state
            .project_index
            .entry(edge.project_id())
            .or_default()
            .push(edge.id());
        state.edges.insert(edge.id(), edge.clone());
        Ok(edge.id())
    }

    async fn delete_edge(&self, edge_id: DependencyId) -> DependencyRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            DependencyRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let removed = state
            .edges
            .remove(&edge_id)
            .ok_or(DependencyRepositoryError::NotFound(edge_id))?;
        if let Some(ids) = state.project_index.get_mut(&removed.project_id()) {
            ids.retain(|id| *id != edge_id);
        }
        Ok(())
    }
}
