//! Shared world state for board drag BDD scenarios.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rstest::fixture;
use taskgraph::board::{
    adapters::memory::InMemoryTransitionNotifier,
    domain::TransitionOutcome,
    services::{BoardCoordinator, CoordinatorConfig},
};
use taskgraph::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskRepositoryResult, TaskStatusWriter},
};

/// Status writer whose behaviour is chosen by the scenario.
#[derive(Default)]
pub struct ScriptedWriter {
    stall: AtomicBool,
    calls: AtomicUsize,
}

impl ScriptedWriter {
    /// Makes every later write hang past the coordinator timeout.
    pub fn stall(&self) {
        self.stall.store(true, Ordering::SeqCst);
    }

    /// Makes every later write succeed at once.
    pub fn succeed(&self) {
        self.stall.store(false, Ordering::SeqCst);
    }

    /// Returns the number of writes attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskStatusWriter for ScriptedWriter {
    async fn save_task_status(&self, _: TaskId, _: TaskStatus) -> TaskRepositoryResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.stall.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Ok(())
    }
}

/// Coordinator type used by the BDD world.
pub type TestBoard = BoardCoordinator<ScriptedWriter, InMemoryTransitionNotifier>;

/// Scenario world for board drag behaviour tests.
pub struct BoardWorld {
    pub writer: Arc<ScriptedWriter>,
    pub notifier: Arc<InMemoryTransitionNotifier>,
    pub board: TestBoard,
    pub cards: Vec<Task>,
    pub names: HashMap<String, TaskId>,
    pub last_outcome: Option<TransitionOutcome>,
}

impl BoardWorld {
    /// Creates a world with an empty board and a short save timeout.
    #[must_use]
    pub fn new() -> Self {
        let writer = Arc::new(ScriptedWriter::default());
        let notifier = Arc::new(InMemoryTransitionNotifier::new());
        let board = BoardCoordinator::new(
            Arc::clone(&writer),
            Arc::clone(&notifier),
            CoordinatorConfig::default().with_persistence_timeout(Duration::from_millis(50)),
        );
        Self {
            writer,
            notifier,
            board,
            cards: Vec::new(),
            names: HashMap::new(),
            last_outcome: None,
        }
    }

    /// Looks up a card placed under `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if no card was placed under that name.
    pub fn task_id(&self, name: &str) -> Result<TaskId, eyre::Report> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| eyre::eyre!("no card named {name} in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
