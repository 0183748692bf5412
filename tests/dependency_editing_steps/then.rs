//! Then steps for dependency editing BDD scenarios.

use super::world::{DependencyWorld, run_async};
use rstest_bdd_macros::then;
use taskgraph::dependency::{domain::DependencyError, services::DependencyServiceError};

fn rejection(world: &DependencyWorld) -> Result<DependencyError, eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing dependency result"))?;
    match result {
        Err(DependencyServiceError::Dependency(err)) => Ok(*err),
        other => Err(eyre::eyre!("expected a dependency rejection, got {other:?}")),
    }
}

#[then("the dependency is rejected as cyclic")]
fn rejected_as_cyclic(world: &DependencyWorld) -> Result<(), eyre::Report> {
    let err = rejection(world)?;
    eyre::ensure!(
        matches!(err, DependencyError::CyclicDependency { .. }),
        "expected CyclicDependency, got {err:?}"
    );
    Ok(())
}

#[then("the dependency is rejected as a self dependency")]
fn rejected_as_self(world: &DependencyWorld) -> Result<(), eyre::Report> {
    let err = rejection(world)?;
    eyre::ensure!(
        matches!(err, DependencyError::SelfDependency(_)),
        "expected SelfDependency, got {err:?}"
    );
    Ok(())
}

#[then("the dependency is rejected as a duplicate")]
fn rejected_as_duplicate(world: &DependencyWorld) -> Result<(), eyre::Report> {
    let err = rejection(world)?;
    eyre::ensure!(
        matches!(err, DependencyError::DuplicateEdge { .. }),
        "expected DuplicateEdge, got {err:?}"
    );
    Ok(())
}

#[then("the project has {count:u64} dependencies")]
fn project_has_dependencies(world: &DependencyWorld, count: u64) -> Result<(), eyre::Report> {
    let graph = run_async(world.service.snapshot(world.project_id))?;
    let actual = u64::try_from(graph.edge_count())?;
    eyre::ensure!(actual == count, "expected {count} dependencies, found {actual}");
    Ok(())
}

#[then(r#"task "{task}" is in rank {rank:u64}"#)]
fn task_in_rank(world: &DependencyWorld, task: String, rank: u64) -> Result<(), eyre::Report> {
    let view = world
        .view
        .as_ref()
        .ok_or_else(|| eyre::eyre!("project was not laid out"))?;
    let position = view
        .layout
        .position(world.task_id(&task)?)
        .ok_or_else(|| eyre::eyre!("task {task} missing from layout"))?;
    let actual = u64::try_from(position.rank)?;
    eyre::ensure!(actual == rank, "expected rank {rank} for {task}, found {actual}");
    Ok(())
}
