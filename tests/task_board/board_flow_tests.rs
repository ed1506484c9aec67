//! Integration tests for the inbox to completion workflow.

use super::helpers::{Board, add_task, board, monday_at};
use breakdown::board::domain::{NextAction, StepState, Task, TaskStatus, TaskStep};
use chrono::TimeDelta;
use rstest::rstest;

fn titles(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.title()).collect()
}

#[rstest]
fn task_moves_from_inbox_through_active_to_completed(
    mut board: Board,
) -> Result<(), eyre::Report> {
    let task_id = add_task(&mut board, "Quarterly taxes", Some(monday_at(17)), 60)?;
    eyre::ensure!(titles(&board.store.inbox()) == vec!["Quarterly taxes"]);

    for title in ["Gather receipts", "Fill form", "Submit"] {
        board.store.add_step(task_id, TaskStep::new(title, 0));
    }
    board.store.update_status(task_id, TaskStatus::Refined);
    eyre::ensure!(board.store.inbox().is_empty(), "refined task left in inbox");

    let first_step = board
        .store
        .get_task(task_id)
        .and_then(|task| task.steps().first())
        .map(TaskStep::id)
        .ok_or_else(|| eyre::eyre!("missing first step"))?;
    board.store.advance_step(task_id, first_step);
    board.store.advance_step(task_id, first_step);

    let task = board
        .store
        .get_task(task_id)
        .ok_or_else(|| eyre::eyre!("missing task"))?;
    eyre::ensure!(
        task.steps().first().map(TaskStep::state) == Some(StepState::Done),
        "first step should be done"
    );
    match task.next_action() {
        NextAction::Step(step) => eyre::ensure!(step.title() == "Fill form"),
        other => return Err(eyre::eyre!("unexpected next action {other:?}")),
    }

    board.clock.advance(TimeDelta::hours(2));
    board.store.mark_completed(task_id);
    let views = board.store.views();
    eyre::ensure!(views.active.is_empty(), "completed task left in active list");
    eyre::ensure!(
        views.completed.first().and_then(|task| task.completed_at()) == Some(monday_at(10)),
        "completion time should come from the clock"
    );
    Ok(())
}

#[rstest]
fn views_partition_the_board(mut board: Board) -> Result<(), eyre::Report> {
    let draft = add_task(&mut board, "Draft", None, 30)?;
    let refined = add_task(&mut board, "Refined", None, 30)?;
    let done = add_task(&mut board, "Done", None, 30)?;
    board.store.update_status(refined, TaskStatus::Refined);
    board.store.mark_completed(done);

    let views = board.store.views();

    eyre::ensure!(views.inbox.iter().map(|task| task.id()).eq([draft]));
    eyre::ensure!(views.active.iter().map(|task| task.id()).eq([refined]));
    eyre::ensure!(views.completed.iter().map(|task| task.id()).eq([done]));
    Ok(())
}

#[rstest]
fn step_changes_feed_the_conflict_score(mut board: Board) -> Result<(), eyre::Report> {
    let task_id = add_task(&mut board, "Presentation", Some(monday_at(15)), 30)?;
    let before = board
        .store
        .get_task(task_id)
        .and_then(|task| task.conflict_score())
        .ok_or_else(|| eyre::eyre!("task should be scored"))?;

    let long_step = TaskStep::new("Rehearse", 0).with_estimated_minutes(150)?;
    board.store.add_step(task_id, long_step);

    let after = board
        .store
        .get_task(task_id)
        .and_then(|task| task.conflict_score())
        .ok_or_else(|| eyre::eyre!("task should be scored"))?;
    eyre::ensure!(
        after.value() > before.value(),
        "a longer plan should raise the score"
    );
    Ok(())
}
