//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;
use taskgraph::dependency::{
    adapters::memory::InMemoryDependencyRepository,
    domain::DependencyEdge,
    services::{AddDependencyRequest, DependencyService},
};
use taskgraph::task::{
    adapters::memory::{InMemoryActivityRepository, InMemoryTaskRepository},
    domain::{ProjectId, Task},
    services::{CreateTaskRequest, TaskLifecycleService},
};

/// Lifecycle service over in-memory stores.
pub type TestLifecycle =
    TaskLifecycleService<InMemoryTaskRepository, InMemoryActivityRepository, DefaultClock>;

/// Dependency service over in-memory stores.
pub type TestDependencies =
    DependencyService<InMemoryDependencyRepository, InMemoryTaskRepository, DefaultClock>;

/// One project wired to services sharing the same task store.
pub struct Workspace {
    pub project_id: ProjectId,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub edges: Arc<InMemoryDependencyRepository>,
    pub lifecycle: Arc<TestLifecycle>,
    pub dependencies: TestDependencies,
}

impl Workspace {
    /// Creates a task in the workspace project.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifecycle service rejects the task.
    pub async fn create(&self, title: &str) -> Result<Task, eyre::Report> {
        self.lifecycle
            .create_task(CreateTaskRequest::new(self.project_id, title))
            .await
            .wrap_err_with(|| format!("create task {title}"))
    }

    /// Records that `task` depends on `prerequisite`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dependency service rejects the edge.
    pub async fn depend(
        &self,
        task: &Task,
        prerequisite: &Task,
    ) -> Result<DependencyEdge, eyre::Report> {
        self.dependencies
            .add_dependency(AddDependencyRequest::new(
                self.project_id,
                task.id(),
                prerequisite.id(),
            ))
            .await
            .wrap_err("add dependency")
    }
}

/// Provides a fresh workspace for each test.
#[fixture]
pub fn workspace() -> Workspace {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let edges = Arc::new(InMemoryDependencyRepository::new());
    let clock = Arc::new(DefaultClock);
    let lifecycle = Arc::new(TaskLifecycleService::new(
        Arc::clone(&tasks),
        Arc::new(InMemoryActivityRepository::new()),
        Arc::clone(&clock),
    ));
    let dependencies = DependencyService::new(Arc::clone(&edges), Arc::clone(&tasks), clock);
    Workspace {
        project_id: ProjectId::new(),
        tasks,
        edges,
        lifecycle,
        dependencies,
    }
}
