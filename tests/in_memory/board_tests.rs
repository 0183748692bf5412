//! In-memory integration tests for the board coordinator.

use std::sync::Arc;

use super::helpers::{TestLifecycle, Workspace, workspace};
use taskgraph::board::{
    adapters::memory::InMemoryTransitionNotifier,
    domain::{DropTarget, TransitionOutcome},
    services::{BoardCoordinator, CoordinatorConfig},
};
use taskgraph::task::{
    domain::{ActivityAction, TaskField, TaskStatus},
    ports::TaskRepository,
};
use rstest::rstest;

type TestBoard = BoardCoordinator<TestLifecycle, InMemoryTransitionNotifier>;

fn board_for(workspace: &Workspace) -> (TestBoard, Arc<InMemoryTransitionNotifier>) {
    let notifier = Arc::new(InMemoryTransitionNotifier::new());
    let board = BoardCoordinator::new(
        Arc::clone(&workspace.lifecycle),
        Arc::clone(&notifier),
        CoordinatorConfig::default(),
    );
    (board, notifier)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn committed_drop_is_visible_in_the_task_store(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let task = workspace.create("Wire up login").await?;
    let (board, notifier) = board_for(&workspace);
    board.load(&workspace.lifecycle.list_project_tasks(workspace.project_id).await?)?;

    board.drag_start(task.id())?;
    board.drag_over(task.id(), Some(DropTarget::Column(TaskStatus::InProgress)))?;
    let outcome = board
        .drag_end(task.id(), Some(DropTarget::Column(TaskStatus::InProgress)))
        .await?;

    eyre::ensure!(outcome.is_committed(), "expected a commit, got {outcome:?}");
    let stored = workspace
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task disappeared"))?;
    eyre::ensure!(stored.status() == TaskStatus::InProgress, "store not updated");
    eyre::ensure!(notifier.notices().is_empty(), "unexpected notice");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn committed_drop_appends_a_status_activity_entry(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let task = workspace.create("Publish changelog").await?;
    let (board, _) = board_for(&workspace);
    board.load(&workspace.lifecycle.list_project_tasks(workspace.project_id).await?)?;

    let outcome = board.transition(task.id(), TaskStatus::Review).await?;
    let activity = workspace.lifecycle.activity(task.id()).await?;

    eyre::ensure!(outcome.is_committed(), "expected a commit, got {outcome:?}");
    let actions: Vec<ActivityAction> = activity.iter().map(|entry| entry.action()).collect();
    eyre::ensure!(
        actions == vec![ActivityAction::Created, ActivityAction::StatusChanged],
        "unexpected activity {actions:?}"
    );
    let entry = activity
        .last()
        .ok_or_else(|| eyre::eyre!("activity log is empty"))?;
    eyre::ensure!(entry.field() == Some(TaskField::Status), "wrong field");
    eyre::ensure!(entry.old_value() == Some("todo"), "wrong old value");
    eyre::ensure!(entry.new_value() == Some("review"), "wrong new value");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drop_for_a_task_missing_from_the_store_reverts(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let task = workspace.create("Short-lived").await?;
    let (board, notifier) = board_for(&workspace);
    board.load(&workspace.lifecycle.list_project_tasks(workspace.project_id).await?)?;
    workspace.lifecycle.delete_task(task.id()).await?;

    let outcome = board.transition(task.id(), TaskStatus::Done).await?;

    eyre::ensure!(
        matches!(outcome, TransitionOutcome::Reverted { .. }),
        "expected a revert, got {outcome:?}"
    );
    eyre::ensure!(
        board.visible_status(task.id())? == TaskStatus::Todo,
        "card was not restored"
    );
    eyre::ensure!(notifier.notices().len() == 1, "expected one notice");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn open_prerequisites_follow_board_progress(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let schema = workspace.create("Schema").await?;
    let api = workspace.create("API").await?;
    let ui = workspace.create("UI").await?;
    workspace.depend(&ui, &schema).await?;
    workspace.depend(&ui, &api).await?;
    let (board, _) = board_for(&workspace);
    board.load(&workspace.lifecycle.list_project_tasks(workspace.project_id).await?)?;
    let graph = workspace.dependencies.snapshot(workspace.project_id).await?;

    let before = board.open_prerequisites(ui.id(), &graph)?;
    board.transition(schema.id(), TaskStatus::Done).await?;
    let after = board.open_prerequisites(ui.id(), &graph)?;

    eyre::ensure!(before == vec![schema.id(), api.id()], "unexpected {before:?}");
    eyre::ensure!(after == vec![api.id()], "unexpected {after:?}");
    Ok(())
}
