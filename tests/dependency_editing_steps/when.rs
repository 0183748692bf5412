//! When steps for dependency editing BDD scenarios.

use super::world::{DependencyWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskgraph::dependency::services::AddDependencyRequest;

#[when(r#"task "{task}" is made to depend on task "{prerequisite}""#)]
fn make_dependency(
    world: &mut DependencyWorld,
    task: String,
    prerequisite: String,
) -> Result<(), eyre::Report> {
    let request = AddDependencyRequest::new(
        world.project_id,
        world.task_id(&task)?,
        world.task_id(&prerequisite)?,
    );
    world.last_result = Some(run_async(world.service.add_dependency(request)));
    Ok(())
}

#[when("the project graph is laid out")]
fn lay_out(world: &mut DependencyWorld) -> Result<(), eyre::Report> {
    let view = run_async(world.service.project_view(world.project_id))
        .wrap_err("lay out scenario project")?;
    world.view = Some(view);
    Ok(())
}
