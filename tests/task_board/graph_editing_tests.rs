//! Integration tests for subtask graph editing.

use super::helpers::{Board, add_task, board};
use breakdown::board::domain::{LayoutPoint, RELATION_DEPENDENCY};
use rstest::rstest;

#[rstest]
fn edit_session_can_be_walked_back_and_forth(mut board: Board) -> Result<(), eyre::Report> {
    let task_id = add_task(&mut board, "Conference talk", None, 30)?;
    board.store.ensure_graph_history(task_id);

    let root = board
        .store
        .add_subtask_node(task_id, LayoutPoint::CENTER)
        .ok_or_else(|| eyre::eyre!("missing root node"))?;
    let slides = board
        .store
        .add_subtask_node(task_id, LayoutPoint::new(0.3, 0.7))
        .ok_or_else(|| eyre::eyre!("missing slides node"))?;
    let demo = board
        .store
        .add_subtask_node(task_id, LayoutPoint::new(0.7, 0.7))
        .ok_or_else(|| eyre::eyre!("missing demo node"))?;
    board.store.rename_node(task_id, slides, "Slides");
    board
        .store
        .connect_nodes(task_id, slides, demo, RELATION_DEPENDENCY)?;

    let edited = board
        .store
        .get_task(task_id)
        .cloned()
        .ok_or_else(|| eyre::eyre!("missing task"))?;
    eyre::ensure!(edited.graph_nodes().len() == 3);
    eyre::ensure!(edited.graph_edges().len() == 3);
    eyre::ensure!(edited.root_node().map(|node| node.id()) == Some(root));

    for _ in 0..5 {
        board.store.undo_graph(task_id);
    }
    let emptied = board
        .store
        .get_task(task_id)
        .ok_or_else(|| eyre::eyre!("missing task"))?;
    eyre::ensure!(emptied.graph_nodes().is_empty(), "undo should reach the empty graph");
    eyre::ensure!(!board.store.can_undo_graph(task_id));

    for _ in 0..5 {
        board.store.redo_graph(task_id);
    }
    let restored = board
        .store
        .get_task(task_id)
        .ok_or_else(|| eyre::eyre!("missing task"))?;
    eyre::ensure!(restored.graph_nodes() == edited.graph_nodes());
    eyre::ensure!(restored.graph_edges() == edited.graph_edges());
    eyre::ensure!(restored.graph_version() == edited.graph_version());
    Ok(())
}

#[rstest]
fn histories_are_independent_per_task(mut board: Board) -> Result<(), eyre::Report> {
    let first = add_task(&mut board, "First", None, 30)?;
    let second = add_task(&mut board, "Second", None, 30)?;

    board.store.add_subtask_node(first, LayoutPoint::CENTER);
    board.store.add_subtask_node(second, LayoutPoint::CENTER);
    board.store.undo_graph(first);

    let first_nodes = board.store.get_task(first).map(|task| task.graph_nodes().len());
    let second_nodes = board.store.get_task(second).map(|task| task.graph_nodes().len());
    eyre::ensure!(first_nodes == Some(0));
    eyre::ensure!(second_nodes == Some(1));
    eyre::ensure!(board.store.can_redo_graph(first));
    eyre::ensure!(!board.store.can_redo_graph(second));
    Ok(())
}
