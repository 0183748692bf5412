//! In-memory integration tests for dependency editing and graph views.

use super::helpers::{Workspace, workspace};
use taskgraph::dependency::{
    domain::DependencyError, ports::DependencyRepository, services::DependencyServiceError,
};
use taskgraph::layout::{LayoutConfig, LayoutDirection};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chain_is_laid_out_in_successive_ranks(workspace: Workspace) -> Result<(), eyre::Report> {
    let a = workspace.create("A").await?;
    let b = workspace.create("B").await?;
    let c = workspace.create("C").await?;
    workspace.depend(&b, &a).await?;
    workspace.depend(&c, &b).await?;

    let view = workspace.dependencies.project_view(workspace.project_id).await?;

    for (task, rank) in [(&a, 0), (&b, 1), (&c, 2)] {
        let position = view
            .layout
            .position(task.id())
            .ok_or_else(|| eyre::eyre!("task missing from layout"))?;
        eyre::ensure!(
            position.rank == rank,
            "expected rank {rank}, found {}",
            position.rank
        );
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_edges_never_reach_the_store(workspace: Workspace) -> Result<(), eyre::Report> {
    let a = workspace.create("A").await?;
    let b = workspace.create("B").await?;
    let c = workspace.create("C").await?;
    workspace.depend(&b, &a).await?;
    workspace.depend(&c, &b).await?;

    let result = workspace.depend(&a, &c).await;

    let err = result
        .err()
        .ok_or_else(|| eyre::eyre!("closing the chain must be rejected"))?;
    eyre::ensure!(
        matches!(
            err.downcast_ref::<DependencyServiceError>(),
            Some(DependencyServiceError::Dependency(
                DependencyError::CyclicDependency { .. }
            ))
        ),
        "expected a cycle rejection, got {err:?}"
    );
    let stored = workspace.edges.load_edges(workspace.project_id).await?;
    eyre::ensure!(stored.len() == 2, "rejected edge was persisted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn view_survives_a_reload_unchanged(workspace: Workspace) -> Result<(), eyre::Report> {
    let a = workspace.create("A").await?;
    let b = workspace.create("B").await?;
    let c = workspace.create("C").await?;
    let d = workspace.create("D").await?;
    workspace.depend(&c, &a).await?;
    workspace.depend(&d, &b).await?;
    workspace.depend(&d, &a).await?;

    let before = workspace.dependencies.project_view(workspace.project_id).await?;
    workspace.dependencies.reload_project(workspace.project_id).await?;
    let after = workspace.dependencies.project_view(workspace.project_id).await?;

    eyre::ensure!(before == after, "layout changed across reload");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn layout_config_reaches_the_view(
    #[from(workspace)] base: Workspace,
) -> Result<(), eyre::Report> {
    let workspace = Workspace {
        dependencies: base.dependencies.with_layout_config(LayoutConfig {
            direction: LayoutDirection::LeftToRight,
            ..LayoutConfig::spacious()
        }),
        ..base
    };
    let a = workspace.create("A").await?;
    let b = workspace.create("B").await?;
    workspace.depend(&b, &a).await?;

    let view = workspace.dependencies.project_view(workspace.project_id).await?;

    let position = view
        .layout
        .position(b.id())
        .ok_or_else(|| eyre::eyre!("task missing from layout"))?;
    eyre::ensure!(
        (position.x, position.y) == (150, 0),
        "unexpected coordinates ({}, {})",
        position.x,
        position.y
    );
    Ok(())
}
