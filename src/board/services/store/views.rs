//! Derived inbox, active and completed lists.

use super::{Clock, TaskStore};
use crate::board::domain::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

/// The three lists a board renders, derived from the current task list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardViews {
    /// Draft tasks, soonest first.
    pub inbox: Vec<Task>,
    /// Refined tasks, soonest next step first.
    pub active: Vec<Task>,
    /// Completed tasks, most recent first.
    pub completed: Vec<Task>,
}

impl BoardViews {
    /// Derives all three lists from `tasks`.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self {
            inbox: inbox(tasks),
            active: active(tasks),
            completed: completed(tasks),
        }
    }
}

/// Draft tasks sorted ascending by due date, falling back to creation time.
#[must_use]
pub fn inbox(tasks: &[Task]) -> Vec<Task> {
    let mut drafts = with_status(tasks, TaskStatus::Draft);
    drafts.sort_by_key(|task| task.due_at().unwrap_or_else(|| task.created_at()));
    drafts
}

/// Refined tasks sorted ascending by their earliest scheduled open step,
/// then due date, then creation time.
#[must_use]
pub fn active(tasks: &[Task]) -> Vec<Task> {
    let mut refined = with_status(tasks, TaskStatus::Refined);
    refined.sort_by_key(active_sort_key);
    refined
}

/// Completed tasks sorted descending by completion time, then due date,
/// then creation time.
#[must_use]
pub fn completed(tasks: &[Task]) -> Vec<Task> {
    let mut done = with_status(tasks, TaskStatus::Completed);
    done.sort_by_key(|task| Reverse(completed_sort_key(task)));
    done
}

fn with_status(tasks: &[Task], status: TaskStatus) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.status() == status)
        .cloned()
        .collect()
}

fn active_sort_key(task: &Task) -> DateTime<Utc> {
    task.next_scheduled_step_at()
        .or_else(|| task.due_at())
        .unwrap_or_else(|| task.created_at())
}

fn completed_sort_key(task: &Task) -> DateTime<Utc> {
    task.completed_at()
        .or_else(|| task.due_at())
        .unwrap_or_else(|| task.created_at())
}

impl<C: Clock> TaskStore<C> {
    /// Draft tasks, soonest first.
    #[must_use]
    pub fn inbox(&self) -> Vec<Task> {
        inbox(&self.tasks)
    }

    /// Refined tasks, soonest next step first.
    #[must_use]
    pub fn active(&self) -> Vec<Task> {
        active(&self.tasks)
    }

    /// Completed tasks, most recent first.
    #[must_use]
    pub fn completed(&self) -> Vec<Task> {
        completed(&self.tasks)
    }

    /// All three derived lists at once.
    #[must_use]
    pub fn views(&self) -> BoardViews {
        BoardViews::from_tasks(&self.tasks)
    }
}
