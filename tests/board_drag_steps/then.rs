//! Then steps for board drag BDD scenarios.

use super::world::BoardWorld;
use rstest_bdd_macros::then;
use taskgraph::board::domain::TransitionOutcome;
use taskgraph::task::domain::TaskStatus;

fn outcome(world: &BoardWorld) -> Result<&TransitionOutcome, eyre::Report> {
    world
        .last_outcome
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing drop outcome"))
}

#[then("the drop is reverted")]
fn drop_reverted(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = outcome(world)?;
    eyre::ensure!(
        matches!(result, TransitionOutcome::Reverted { .. }),
        "expected a revert, got {result:?}"
    );
    Ok(())
}

#[then("the drop is committed")]
fn drop_committed(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = outcome(world)?;
    eyre::ensure!(result.is_committed(), "expected a commit, got {result:?}");
    Ok(())
}

#[then(r#"task "{name}" shows status "{status}""#)]
fn shows_status(world: &BoardWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())?;
    let actual = world.board.visible_status(world.task_id(&name)?)?;
    eyre::ensure!(actual == expected, "expected {expected}, found {actual}");
    Ok(())
}

#[then(r#"a rollback notice is recorded for task "{name}""#)]
fn rollback_notice_recorded(world: &BoardWorld, name: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&name)?;
    let notices = world.notifier.notices();
    eyre::ensure!(
        notices.iter().any(|notice| notice.task_id() == task_id),
        "no rollback notice for {name}"
    );
    Ok(())
}

#[then("no rollback notice is recorded")]
fn no_rollback_notice(world: &BoardWorld) -> Result<(), eyre::Report> {
    let notices = world.notifier.notices();
    eyre::ensure!(notices.is_empty(), "unexpected notices {notices:?}");
    Ok(())
}

#[then("no status save was attempted")]
fn no_save_attempted(world: &BoardWorld) -> Result<(), eyre::Report> {
    let calls = world.writer.calls();
    eyre::ensure!(calls == 0, "expected no saves, found {calls}");
    Ok(())
}
