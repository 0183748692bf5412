//! Given steps for board drag BDD scenarios.

use super::world::BoardWorld;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskgraph::task::domain::{ProjectId, Task, TaskStatus, TaskTitle};

#[given(r#"a board with task "{name}" in column "{column}""#)]
fn board_with_task(
    world: &mut BoardWorld,
    name: String,
    column: String,
) -> Result<(), eyre::Report> {
    let status = TaskStatus::try_from(column.as_str())?;
    let task = Task::new(ProjectId::new(), TaskTitle::new(name.as_str())?, &DefaultClock)
        .with_status(status);
    world.names.insert(name, task.id());
    world.cards.push(task);
    world.board.load(&world.cards)?;
    Ok(())
}

#[given("status saves time out")]
fn saves_time_out(world: &mut BoardWorld) {
    world.writer.stall();
}

#[given("status saves succeed")]
fn saves_succeed(world: &mut BoardWorld) {
    world.writer.succeed();
}
