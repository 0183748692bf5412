//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Workspace, workspace};
use taskgraph::task::{
    domain::{ActivityAction, TaskField, TaskStatus},
    ports::TaskRepository,
    services::{TaskLifecycleError, TransitionTaskRequest, UpdateTaskRequest},
};
use eyre::WrapErr;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_status_can_reach_every_other(workspace: Workspace) -> Result<(), eyre::Report> {
    let task = workspace.create("Roundtrip").await?;

    for from in TaskStatus::ALL {
        for to in TaskStatus::ALL {
            workspace
                .lifecycle
                .transition_task(TransitionTaskRequest::new(task.id(), from.as_str()))
                .await
                .wrap_err("move to starting status")?;
            let moved = workspace
                .lifecycle
                .transition_task(TransitionTaskRequest::new(task.id(), to.as_str()))
                .await
                .wrap_err_with(|| format!("transition {from} -> {to}"))?;
            eyre::ensure!(moved.status() == to, "expected {to}, found {}", moved.status());
        }
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_status_is_rejected_without_change(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let task = workspace.create("Strict parsing").await?;

    let result = workspace
        .lifecycle
        .transition_task(TransitionTaskRequest::new(task.id(), "archived"))
        .await;

    eyre::ensure!(
        matches!(result, Err(TaskLifecycleError::InvalidStatus(_))),
        "expected InvalidStatus, got {result:?}"
    );
    let stored = workspace
        .tasks
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task disappeared"))?;
    eyre::ensure!(stored.status() == TaskStatus::Todo, "status changed");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edits_are_recorded_in_the_activity_log(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let task = workspace.create("Draft").await?;
    workspace
        .lifecycle
        .update_task(
            task.id(),
            UpdateTaskRequest::new()
                .with_title("Final")
                .with_description(Some("Ready for review".to_owned())),
        )
        .await?;
    workspace
        .lifecycle
        .transition_task(TransitionTaskRequest::new(task.id(), "review"))
        .await?;

    let log = workspace.lifecycle.activity(task.id()).await?;

    let actions: Vec<ActivityAction> = log.iter().map(|entry| entry.action()).collect();
    eyre::ensure!(
        actions
            == vec![
                ActivityAction::Created,
                ActivityAction::Updated,
                ActivityAction::Updated,
                ActivityAction::StatusChanged,
            ],
        "unexpected activity sequence {actions:?}"
    );
    let status_entry = log
        .last()
        .ok_or_else(|| eyre::eyre!("activity log is empty"))?;
    eyre::ensure!(status_entry.field() == Some(TaskField::Status), "wrong field");
    eyre::ensure!(status_entry.new_value() == Some("review"), "wrong new value");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_after_detaching_leaves_no_dangling_edges(
    workspace: Workspace,
) -> Result<(), eyre::Report> {
    let design = workspace.create("Design").await?;
    let build = workspace.create("Build").await?;
    let ship = workspace.create("Ship").await?;
    workspace.depend(&build, &design).await?;
    workspace.depend(&ship, &build).await?;

    let removed = workspace
        .dependencies
        .detach_task(workspace.project_id, build.id())
        .await?;
    workspace.lifecycle.delete_task(build.id()).await?;

    eyre::ensure!(removed.len() == 2, "expected two detached edges");
    let view = workspace.dependencies.project_view(workspace.project_id).await?;
    eyre::ensure!(view.edges.is_empty(), "edges remain after detach");
    eyre::ensure!(view.layout.positions().len() == 2, "deleted task still laid out");
    eyre::ensure!(view.layout.rank_count() == 1, "remaining tasks should share rank 0");
    Ok(())
}
