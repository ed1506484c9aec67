//! Integration tests for persisting a board through records.

use std::sync::Arc;

use super::helpers::{Board, SteppedClock, add_task, board, monday_at};
use breakdown::board::{
    adapters::{decode_tasks, encode_tasks},
    domain::{LayoutPoint, TaskStatus, TaskStep},
    services::TaskStore,
};
use rstest::rstest;

#[rstest]
fn saved_board_hydrates_into_a_new_store(mut board: Board) -> Result<(), eyre::Report> {
    let task_id = add_task(&mut board, "Move flat", Some(monday_at(18)), 45)?;
    board
        .store
        .add_step(task_id, TaskStep::new("Book van", 0).with_estimated_minutes(20)?);
    board.store.add_subtask_node(task_id, LayoutPoint::new(0.4, 0.6));
    let finished = add_task(&mut board, "Cancel broadband", None, 15)?;
    board.store.update_status(finished, TaskStatus::Completed);

    let saved = encode_tasks(board.store.tasks())?;
    let mut hydrated = TaskStore::new(Arc::new(SteppedClock::at(monday_at(9))));
    hydrated.load_tasks(decode_tasks(&saved)?);

    let original = board
        .store
        .get_task(task_id)
        .ok_or_else(|| eyre::eyre!("missing original task"))?;
    let restored = hydrated
        .get_task(task_id)
        .ok_or_else(|| eyre::eyre!("missing restored task"))?;
    eyre::ensure!(restored.title() == original.title());
    eyre::ensure!(restored.steps() == original.steps());
    eyre::ensure!(restored.graph_nodes() == original.graph_nodes());
    eyre::ensure!(restored.graph_version() == original.graph_version());
    eyre::ensure!(restored.conflict_calculated_at() == Some(monday_at(9)));
    eyre::ensure!(hydrated.completed().len() == 1);
    Ok(())
}
