//! Given steps for dependency editing BDD scenarios.

use super::world::{DependencyWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskgraph::dependency::services::AddDependencyRequest;
use taskgraph::task::{
    domain::{Task, TaskTitle},
    ports::TaskRepository,
};

#[given(r#"a project with tasks "{names}""#)]
fn project_with_tasks(world: &mut DependencyWorld, names: String) -> Result<(), eyre::Report> {
    for name in names.split(',').map(str::trim) {
        let task = Task::new(world.project_id, TaskTitle::new(name)?, &DefaultClock);
        run_async(world.tasks.store(&task)).wrap_err("store scenario task")?;
        world.names.insert(name.to_owned(), task.id());
    }
    Ok(())
}

#[given(r#"task "{task}" depends on task "{prerequisite}""#)]
fn task_depends_on(
    world: &mut DependencyWorld,
    task: String,
    prerequisite: String,
) -> Result<(), eyre::Report> {
    let request = AddDependencyRequest::new(
        world.project_id,
        world.task_id(&task)?,
        world.task_id(&prerequisite)?,
    );
    run_async(world.service.add_dependency(request)).wrap_err("add scenario dependency")?;
    Ok(())
}
