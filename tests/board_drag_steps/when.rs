//! When steps for board drag BDD scenarios.

use super::world::{BoardWorld, run_async};
use rstest_bdd_macros::when;
use taskgraph::board::domain::DropTarget;
use taskgraph::task::domain::TaskStatus;

#[when(r#"task "{name}" is dragged to column "{column}""#)]
fn drag_to_column(
    world: &mut BoardWorld,
    name: String,
    column: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&name)?;
    let target = Some(DropTarget::Column(TaskStatus::try_from(column.as_str())?));
    world.board.drag_start(task_id)?;
    world.board.drag_over(task_id, target)?;
    let outcome = run_async(world.board.drag_end(task_id, target))?;
    world.last_outcome = Some(outcome);
    Ok(())
}

#[when(r#"task "{name}" is dropped without a target"#)]
fn drop_without_target(world: &mut BoardWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&name)?;
    world.board.drag_start(task_id)?;
    let outcome = run_async(world.board.drag_end(task_id, None))?;
    world.last_outcome = Some(outcome);
    Ok(())
}
