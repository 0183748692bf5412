//! Service layer for editing a project's dependency graph.

use crate::dependency::{
    domain::{CycleGuard, DependencyEdge, DependencyError, DependencyGraph, DependencyId},
    ports::{DependencyRepository, DependencyRepositoryError},
};
use crate::layout::{GraphLayout, LayoutConfig, LayoutEngine, LayoutError};
use crate::task::{
    domain::{ProjectId, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Request payload for adding "`task_id` depends on `depends_on_task_id`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddDependencyRequest {
    project_id: ProjectId,
    task_id: TaskId,
    depends_on_task_id: TaskId,
}

impl AddDependencyRequest {
    /// Creates a request for an edge within `project_id`.
    #[must_use]
    pub const fn new(project_id: ProjectId, task_id: TaskId, depends_on_task_id: TaskId) -> Self {
        Self {
            project_id,
            task_id,
            depends_on_task_id,
        }
    }
}

/// Layout and edges handed to the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGraphView {
    /// Placement of every task in the project.
    pub layout: GraphLayout,
    /// Dependency edges in insertion order.
    pub edges: Vec<DependencyEdge>,
}

/// Service-level errors for dependency operations.
#[derive(Debug, Error)]
pub enum DependencyServiceError {
    /// The edit was rejected by the graph rules.
    #[error(transparent)]
    Dependency(#[from] DependencyError),
    /// An endpoint task does not exist.
    #[error("task {0} not found")]
    TaskNotFound(TaskId),
    /// An endpoint task belongs to another project.
    #[error("task {task_id} does not belong to project {project_id}")]
    CrossProject {
        /// Offending task.
        task_id: TaskId,
        /// Project named by the request.
        project_id: ProjectId,
    },
    /// Edge persistence failed.
    #[error(transparent)]
    Repository(#[from] DependencyRepositoryError),
    /// Task lookup failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
    /// The stored edges could not be laid out.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Result type for dependency service operations.
pub type DependencyServiceResult<T> = Result<T, DependencyServiceError>;

type SharedGraph = Arc<RwLock<DependencyGraph>>;

/// Dependency editing service.
///
/// Holds one graph per project, loaded lazily from the repository. Edits take
/// the project's write lock for the whole check-then-persist-then-insert
/// sequence, so two concurrent additions can never jointly close a cycle.
pub struct DependencyService<D, T, C>
where
    D: DependencyRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    edges: Arc<D>,
    tasks: Arc<T>,
    clock: Arc<C>,
    layout: LayoutEngine,
    graphs: Mutex<HashMap<ProjectId, SharedGraph>>,
}

impl<D, T, C> DependencyService<D, T, C>
where
    D: DependencyRepository,
    T: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new dependency service with the default layout.
    #[must_use]
    pub fn new(edges: Arc<D>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            edges,
            tasks,
            clock,
            layout: LayoutEngine::default(),
            graphs: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the layout configuration used by [`Self::project_view`].
    #[must_use]
    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.layout = LayoutEngine::new(config);
        self
    }

    /// Adds a dependency edge after validating it against the current graph.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyServiceError::Dependency`] for self, duplicate, or
    /// cyclic edges, [`DependencyServiceError::TaskNotFound`] or
    /// [`DependencyServiceError::CrossProject`] for bad endpoints, and
    /// repository errors when persistence fails. Nothing is stored on error.
    pub async fn add_dependency(
        &self,
        request: AddDependencyRequest,
    ) -> DependencyServiceResult<DependencyEdge> {
        let AddDependencyRequest {
            project_id,
            task_id,
            depends_on_task_id,
        } = request;
        if task_id == depends_on_task_id {
            warn!(task_id = %task_id, "rejected self-dependency");
            return Err(DependencyError::SelfDependency(task_id).into());
        }
        self.ensure_in_project(project_id, task_id).await?;
        self.ensure_in_project(project_id, depends_on_task_id).await?;

        let handle = self.graph(project_id).await?;
        let mut graph = handle.write().await;
        if let Err(err) = CycleGuard::check(&graph, task_id, depends_on_task_id) {
            warn!(
                task_id = %task_id,
                depends_on = %depends_on_task_id,
                error = %err,
                "rejected dependency"
            );
            return Err(err.into());
        }

        let draft = DependencyEdge::new(project_id, task_id, depends_on_task_id, &*self.clock);
        let edge_id = self.edges.save_edge(&draft).await?;
        let edge = draft.with_id(edge_id);
        graph.add_edge(edge.clone())?;
        debug!(
            edge_id = %edge.id(),
            task_id = %task_id,
            depends_on = %depends_on_task_id,
            "dependency added"
        );
        Ok(edge)
    }

    /// Removes an edge from a project and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyError::EdgeNotFound`] (wrapped) when the project
    /// has no such edge, or repository errors.
    pub async fn remove_dependency(
        &self,
        project_id: ProjectId,
        edge_id: DependencyId,
    ) -> DependencyServiceResult<DependencyEdge> {
        let handle = self.graph(project_id).await?;
        let mut graph = handle.write().await;
        if graph.edge(edge_id).is_none() {
            return Err(DependencyError::EdgeNotFound(edge_id).into());
        }
        self.edges.delete_edge(edge_id).await?;
        let removed = graph.remove_edge(edge_id)?;
        debug!(edge_id = %edge_id, "dependency removed");
        Ok(removed)
    }

    /// Removes every edge touching a task, typically before deleting it.
    ///
    /// Edges are deleted one by one; if the repository fails part-way, the
    /// edges already deleted stay removed from the graph too.
    ///
    /// # Errors
    ///
    /// Returns repository errors.
    pub async fn detach_task(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> DependencyServiceResult<Vec<DependencyEdge>> {
        let handle = self.graph(project_id).await?;
        let mut graph = handle.write().await;
        let touching: Vec<DependencyId> = graph
            .edges()
            .filter(|edge| edge.touches(task_id))
            .map(DependencyEdge::id)
            .collect();

        let mut removed = Vec::with_capacity(touching.len());
        for edge_id in touching {
            self.edges.delete_edge(edge_id).await?;
            removed.push(graph.remove_edge(edge_id)?);
        }
        debug!(task_id = %task_id, removed = removed.len(), "task detached from graph");
        Ok(removed)
    }

    /// Returns the edges stating what `task_id` depends on.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the project graph must be loaded.
    pub async fn dependencies_of(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> DependencyServiceResult<Vec<DependencyEdge>> {
        let handle = self.graph(project_id).await?;
        let graph = handle.read().await;
        Ok(graph.edges_for_task(task_id).into_iter().cloned().collect())
    }

    /// Returns the tasks that depend directly on `task_id`.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the project graph must be loaded.
    pub async fn dependents_of(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> DependencyServiceResult<Vec<TaskId>> {
        let handle = self.graph(project_id).await?;
        let graph = handle.read().await;
        Ok(graph.incoming_dependents(task_id))
    }

    /// Returns a copy of the project's current graph.
    ///
    /// # Errors
    ///
    /// Returns repository errors when the project graph must be loaded.
    pub async fn snapshot(&self, project_id: ProjectId) -> DependencyServiceResult<DependencyGraph> {
        let handle = self.graph(project_id).await?;
        let snapshot = handle.read().await.clone();
        Ok(snapshot)
    }

    /// Discards the cached graph and reloads it from the repository.
    ///
    /// # Errors
    ///
    /// Returns repository errors, or [`DependencyError::DuplicateEdge`]
    /// (wrapped) when the stored edges repeat a pair.
    pub async fn reload_project(&self, project_id: ProjectId) -> DependencyServiceResult<()> {
        let handle = self.graph(project_id).await?;
        let mut graph = handle.write().await;
        let edges = self.edges.load_edges(project_id).await?;
        *graph = DependencyGraph::from_edges(edges)?;
        debug!(project_id = %project_id, edges = graph.edge_count(), "project graph reloaded");
        Ok(())
    }

    /// Lays out every task of a project together with its edges.
    ///
    /// Tasks are placed in creation order before crossing reduction, so the
    /// view is stable while the project is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DependencyServiceError::Layout`] if the stored edges form a
    /// cycle, or repository errors.
    pub async fn project_view(
        &self,
        project_id: ProjectId,
    ) -> DependencyServiceResult<ProjectGraphView> {
        let nodes: Vec<TaskId> = self
            .tasks
            .list_by_project(project_id)
            .await?
            .iter()
            .map(Task::id)
            .collect();
        let handle = self.graph(project_id).await?;
        let graph = handle.read().await;
        let layout = self.layout.layout(&nodes, graph.edges())?;
        Ok(ProjectGraphView {
            layout,
            edges: graph.edges().cloned().collect(),
        })
    }

    async fn ensure_in_project(
        &self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> DependencyServiceResult<()> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(DependencyServiceError::TaskNotFound(task_id))?;
        if task.project_id() != project_id {
            return Err(DependencyServiceError::CrossProject {
                task_id,
                project_id,
            });
        }
        Ok(())
    }

    async fn graph(&self, project_id: ProjectId) -> DependencyServiceResult<SharedGraph> {
        let mut graphs = self.graphs.lock().await;
        if let Some(graph) = graphs.get(&project_id) {
            return Ok(Arc::clone(graph));
        }
        let edges = self.edges.load_edges(project_id).await?;
        let graph = Arc::new(RwLock::new(DependencyGraph::from_edges(edges)?));
        graphs.insert(project_id, Arc::clone(&graph));
        debug!(project_id = %project_id, "project graph loaded");
        Ok(graph)
    }
}
