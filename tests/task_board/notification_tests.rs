//! Integration tests for change notifications.

use super::helpers::{Board, add_task, board};
use breakdown::board::domain::{Capacity, TaskStatus};
use chrono::TimeDelta;
use rstest::rstest;
use tokio::sync::broadcast::error::TryRecvError;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscribers_receive_views_after_each_commit(mut board: Board) {
    let mut receiver = board.store.subscribe();
    let listener = tokio::spawn(async move {
        let mut inbox_sizes = Vec::new();
        while let Ok(views) = receiver.recv().await {
            inbox_sizes.push(views.inbox.len());
        }
        inbox_sizes
    });

    let first = add_task(&mut board, "One", None, 30).expect("task is valid");
    add_task(&mut board, "Two", None, 30).expect("task is valid");
    board.store.update_status(first, TaskStatus::Refined);
    drop(board);

    let inbox_sizes = listener.await.expect("listener finishes");
    assert_eq!(inbox_sizes, vec![1, 2, 1]);
}

#[rstest]
fn capacity_bursts_notify_once(mut board: Board) -> Result<(), eyre::Report> {
    add_task(&mut board, "Deep work", None, 90)?;
    let mut receiver = board.store.subscribe();

    for minutes in [120, 150, 240] {
        board.store.set_capacity(Capacity::new(minutes, 300));
        board.clock.advance(TimeDelta::milliseconds(50));
        eyre::ensure!(!board.store.poll_scheduled_recompute());
    }
    board.clock.advance(TimeDelta::seconds(1));
    eyre::ensure!(board.store.poll_scheduled_recompute());

    eyre::ensure!(receiver.try_recv().is_ok(), "expected one notification");
    eyre::ensure!(
        matches!(receiver.try_recv(), Err(TryRecvError::Empty)),
        "expected a single notification"
    );
    Ok(())
}

#[rstest]
fn store_without_subscribers_still_commits(mut board: Board) -> Result<(), eyre::Report> {
    let task_id = add_task(&mut board, "Quiet", None, 30)?;
    board.store.recalculate_conflicts();
    let scored = board
        .store
        .get_task(task_id)
        .and_then(|task| task.conflict_calculated_at());
    eyre::ensure!(scored.is_some(), "task should carry a score timestamp");
    Ok(())
}
