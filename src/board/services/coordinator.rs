//! Optimistic status changes for board cards.
//!
//! Each card has at most one pending transition. The flow is:
//! - `drag_start` records the original status;
//! - `drag_over` changes the visible status speculatively;
//! - `drag_end` resolves the target and persists it, reverting on failure.
//!
//! The board lock is a plain mutex released before the status write is
//! awaited, so a slow store never blocks other cards.

use super::CoordinatorConfig;
use crate::board::{
    domain::{
        BoardError, DropTarget, PendingTransition, PersistenceFailure, TransitionNotice,
        TransitionOutcome,
    },
    ports::TransitionNotifier,
};
use crate::dependency::domain::DependencyGraph;
use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::TaskStatusWriter,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// Result type for board coordinator operations.
pub type BoardResult<T> = Result<T, BoardError>;

#[derive(Debug, Default)]
struct BoardState {
    generation: u64,
    order: Vec<TaskId>,
    stored: HashMap<TaskId, TaskStatus>,
    pending: HashMap<TaskId, PendingTransition>,
    persisting: HashSet<TaskId>,
}

impl BoardState {
    fn visible_status(&self, task_id: TaskId) -> Option<TaskStatus> {
        self.pending
            .get(&task_id)
            .map(PendingTransition::visible_status)
            .or_else(|| self.stored.get(&task_id).copied())
    }

    fn resolve(&self, target: Option<DropTarget>) -> Option<TaskStatus> {
        match target? {
            DropTarget::Column(status) => Some(status),
            DropTarget::Task(other) => self.visible_status(other),
        }
    }

    /// Returns the pending transition of a card that is not being persisted.
    fn idle_pending(&mut self, task_id: TaskId) -> BoardResult<&mut PendingTransition> {
        if self.persisting.contains(&task_id) {
            return Err(BoardError::TransitionPending(task_id));
        }
        self.pending
            .get_mut(&task_id)
            .ok_or(BoardError::NoPendingTransition(task_id))
    }
}

/// Keeps the board responsive while status changes are persisted.
pub struct BoardCoordinator<W, N>
where
    W: TaskStatusWriter,
    N: TransitionNotifier,
{
    writer: Arc<W>,
    notifier: Arc<N>,
    config: CoordinatorConfig,
    state: Mutex<BoardState>,
}

impl<W, N> BoardCoordinator<W, N>
where
    W: TaskStatusWriter,
    N: TransitionNotifier,
{
    /// Creates a coordinator with an empty board.
    #[must_use]
    pub fn new(writer: Arc<W>, notifier: Arc<N>, config: CoordinatorConfig) -> Self {
        Self {
            writer,
            notifier,
            config,
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Replaces the board contents with `tasks`, in display order.
    ///
    /// Pending transitions are discarded. A write already in flight still
    /// completes and reports its outcome, but it neither changes the
    /// reloaded board nor sends a revert notice.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the board lock is poisoned.
    pub fn load(&self, tasks: &[Task]) -> BoardResult<()> {
        let mut state = self.lock()?;
        let generation = state.generation.wrapping_add(1);
        *state = BoardState {
            generation,
            ..BoardState::default()
        };
        for task in tasks {
            if state.stored.insert(task.id(), task.status()).is_none() {
                state.order.push(task.id());
            }
        }
        debug!(cards = state.order.len(), "board loaded");
        Ok(())
    }

    /// Returns the status a card currently shows.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] for cards not on the board.
    pub fn visible_status(&self, task_id: TaskId) -> BoardResult<TaskStatus> {
        self.lock()?
            .visible_status(task_id)
            .ok_or(BoardError::TaskNotFound(task_id))
    }

    /// Returns the cards showing `status`, in load order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the board lock is poisoned.
    pub fn column(&self, status: TaskStatus) -> BoardResult<Vec<TaskId>> {
        let state = self.lock()?;
        Ok(state
            .order
            .iter()
            .copied()
            .filter(|task_id| state.visible_status(*task_id) == Some(status))
            .collect())
    }

    /// Returns the unresolved transition of a card, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::State`] when the board lock is poisoned.
    pub fn pending(&self, task_id: TaskId) -> BoardResult<Option<PendingTransition>> {
        Ok(self.lock()?.pending.get(&task_id).copied())
    }

    /// Returns the prerequisites of a card that are not yet done.
    ///
    /// Prerequisites that are not on the board are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TaskNotFound`] for cards not on the board.
    pub fn open_prerequisites(
        &self,
        task_id: TaskId,
        graph: &DependencyGraph,
    ) -> BoardResult<Vec<TaskId>> {
        let state = self.lock()?;
        if state.visible_status(task_id).is_none() {
            return Err(BoardError::TaskNotFound(task_id));
        }
        Ok(graph
            .outgoing_dependencies(task_id)
            .into_iter()
            .filter(|prerequisite| {
                state
                    .visible_status(*prerequisite)
                    .is_some_and(|status| status != TaskStatus::Done)
            })
            .collect())
    }

    /// Begins dragging a card.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TransitionPending`] while an earlier transition
    /// of the card is unresolved, or [`BoardError::TaskNotFound`].
    pub fn drag_start(&self, task_id: TaskId) -> BoardResult<PendingTransition> {
        let mut state = self.lock()?;
        if state.pending.contains_key(&task_id) {
            return Err(BoardError::TransitionPending(task_id));
        }
        let original = state
            .stored
            .get(&task_id)
            .copied()
            .ok_or(BoardError::TaskNotFound(task_id))?;
        let transition = PendingTransition::begin(task_id, original);
        state.pending.insert(task_id, transition);
        debug!(task_id = %task_id, status = %original, "drag started");
        Ok(transition)
    }

    /// Moves a dragged card over `target`, returning the status it shows.
    ///
    /// An absent or unresolvable target leaves the card as it is.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoPendingTransition`] when no drag was started,
    /// or [`BoardError::TransitionPending`] while the drop is being saved.
    pub fn drag_over(&self, task_id: TaskId, target: Option<DropTarget>) -> BoardResult<TaskStatus> {
        let mut state = self.lock()?;
        let resolved = state.resolve(target);
        let transition = state.idle_pending(task_id)?;
        if let Some(status) = resolved {
            transition.speculate(status);
        }
        Ok(transition.visible_status())
    }

    /// Abandons a drag and restores the original status.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoPendingTransition`] when no drag was started,
    /// or [`BoardError::TransitionPending`] while the drop is being saved.
    pub fn drag_cancel(&self, task_id: TaskId) -> BoardResult<TransitionOutcome> {
        let mut state = self.lock()?;
        state.idle_pending(task_id)?;
        state.pending.remove(&task_id);
        debug!(task_id = %task_id, "drag cancelled");
        Ok(TransitionOutcome::Cancelled)
    }

    /// Drops a card on `target` and persists the resulting status.
    ///
    /// Without a resolvable target, or when the target is the original
    /// status, nothing is written. Otherwise the card shows the target while
    /// the write runs; a failed or timed-out write restores the original
    /// status and sends a notice.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoPendingTransition`] when no drag was started,
    /// or [`BoardError::TransitionPending`] while the drop is being saved.
    /// Persistence failures are reported through
    /// [`TransitionOutcome::Reverted`], not as errors.
    pub async fn drag_end(
        &self,
        task_id: TaskId,
        target: Option<DropTarget>,
    ) -> BoardResult<TransitionOutcome> {
        let (generation, original, requested) = {
            let mut state = self.lock()?;
            let generation = state.generation;
            let resolved = state.resolve(target);
            let transition = state.idle_pending(task_id)?;
            let original = transition.original_status();
            match resolved {
                None => {
                    state.pending.remove(&task_id);
                    debug!(task_id = %task_id, "drop without target; drag cancelled");
                    return Ok(TransitionOutcome::Cancelled);
                }
                Some(status) if status == original => {
                    state.pending.remove(&task_id);
                    debug!(task_id = %task_id, "dropped on original column");
                    return Ok(TransitionOutcome::Unchanged);
                }
                Some(status) => {
                    transition.speculate(status);
                    state.persisting.insert(task_id);
                    (generation, original, status)
                }
            }
        };

        let failure = self.persist(task_id, requested).await.err();
        self.settle(generation, task_id, original, requested, failure)
    }

    /// Moves a card to `status` without a drag gesture.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::TransitionPending`] while another transition of
    /// the card is unresolved, or [`BoardError::TaskNotFound`].
    pub async fn transition(
        &self,
        task_id: TaskId,
        status: TaskStatus,
    ) -> BoardResult<TransitionOutcome> {
        self.drag_start(task_id)?;
        self.drag_end(task_id, Some(DropTarget::Column(status))).await
    }

    async fn persist(&self, task_id: TaskId, status: TaskStatus) -> Result<(), PersistenceFailure> {
        let timeout = self.config.persistence_timeout;
        match tokio::time::timeout(timeout, self.writer.save_task_status(task_id, status)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(PersistenceFailure::Rejected(err)),
            Err(_) => Err(PersistenceFailure::TimedOut(timeout)),
        }
    }

    fn settle(
        &self,
        generation: u64,
        task_id: TaskId,
        original: TaskStatus,
        requested: TaskStatus,
        failure: Option<PersistenceFailure>,
    ) -> BoardResult<TransitionOutcome> {
        let mut state = self.lock()?;
        let mut transition = PendingTransition::begin(task_id, original);
        transition.speculate(requested);

        // The board was reloaded while the write ran.
        if state.generation != generation {
            drop(state);
            debug!(task_id = %task_id, status = %requested, "write settled after reload");
            return Ok(match failure {
                None => TransitionOutcome::Committed(transition.commit()),
                Some(failure) => TransitionOutcome::Reverted {
                    transition: transition.revert(),
                    failure,
                },
            });
        }

        state.persisting.remove(&task_id);
        state.pending.remove(&task_id);

        let Some(failure) = failure else {
            if let Some(stored) = state.stored.get_mut(&task_id) {
                *stored = requested;
            }
            drop(state);
            debug!(task_id = %task_id, status = %requested, "status change committed");
            return Ok(TransitionOutcome::Committed(transition.commit()));
        };

        drop(state);
        warn!(
            task_id = %task_id,
            attempted = %requested,
            restored = %original,
            error = %failure,
            "status change reverted"
        );
        self.notifier.notify(&TransitionNotice::reverted(
            task_id,
            requested,
            original,
            failure.to_string(),
        ));
        Ok(TransitionOutcome::Reverted {
            transition: transition.revert(),
            failure,
        })
    }

    fn lock(&self) -> BoardResult<MutexGuard<'_, BoardState>> {
        self.state
            .lock()
            .map_err(|err| BoardError::State(err.to_string()))
    }
}
