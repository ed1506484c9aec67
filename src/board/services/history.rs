//! Per-task undo and redo of graph edits.
//!
//! Each task gets its own linear history of full graph snapshots. Recording
//! a new snapshot abandons the redo branch, and an undo immediately followed
//! by a redo restores exactly the state the undo replaced. The history only
//! stores snapshots; applying them and adjusting the graph version is left
//! to the store.

use crate::board::domain::{GraphSnapshot, TaskId};
use std::collections::{HashMap, VecDeque};

/// Number of undo steps kept per task unless configured otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 128;

/// Undo and redo stacks for a single task's graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphHistory {
    past: VecDeque<GraphSnapshot>,
    future: Vec<GraphSnapshot>,
    limit: usize,
}

impl GraphHistory {
    /// Creates an empty history keeping at most `limit` undo steps.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            future: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Pushes the graph as it is before an edit and clears the redo stack.
    pub fn record(&mut self, snapshot: GraphSnapshot) {
        self.push_past(snapshot);
        self.future.clear();
    }

    /// Steps back one edit.
    ///
    /// `current` is the graph as it is now; it moves onto the redo stack and
    /// the snapshot to restore is returned. Returns `None` and drops
    /// `current` when there is nothing to undo.
    pub fn undo(&mut self, current: GraphSnapshot) -> Option<GraphSnapshot> {
        let previous = self.past.pop_back()?;
        self.future.push(current);
        Some(previous)
    }

    /// Steps forward over the most recently undone edit.
    ///
    /// Mirrors [`Self::undo`]: `current` moves onto the undo stack and the
    /// snapshot to restore is returned.
    pub fn redo(&mut self, current: GraphSnapshot) -> Option<GraphSnapshot> {
        let next = self.future.pop()?;
        self.push_past(current);
        Some(next)
    }

    /// Returns `true` when an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Returns `true` when a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Number of undo steps held.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of redo steps held.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }

    fn push_past(&mut self, snapshot: GraphSnapshot) {
        self.past.push_back(snapshot);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }
}

impl Default for GraphHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

/// Explicit map from task to its graph history.
///
/// Histories are created on the first mutating access. Read-only queries
/// never create entries, so asking about a task that was never edited
/// simply reports that nothing can be undone.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphHistoryRegistry {
    histories: HashMap<TaskId, GraphHistory>,
    limit: usize,
}

impl GraphHistoryRegistry {
    /// Creates an empty registry whose histories keep `limit` undo steps.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            histories: HashMap::new(),
            limit,
        }
    }

    /// Returns the history for `task_id`, creating it if needed.
    pub fn ensure(&mut self, task_id: TaskId) -> &mut GraphHistory {
        let limit = self.limit;
        self.histories
            .entry(task_id)
            .or_insert_with(|| GraphHistory::new(limit))
    }

    /// Returns the history for `task_id` if one exists.
    #[must_use]
    pub fn get(&self, task_id: TaskId) -> Option<&GraphHistory> {
        self.histories.get(&task_id)
    }

    /// Returns `true` when `task_id` has an undo step.
    #[must_use]
    pub fn can_undo(&self, task_id: TaskId) -> bool {
        self.get(task_id).is_some_and(GraphHistory::can_undo)
    }

    /// Returns `true` when `task_id` has a redo step.
    #[must_use]
    pub fn can_redo(&self, task_id: TaskId) -> bool {
        self.get(task_id).is_some_and(GraphHistory::can_redo)
    }

    /// Drops every task's history, keeping the configured limit.
    pub fn clear(&mut self) {
        self.histories.clear();
    }

    /// Returns `true` when a history exists for `task_id`.
    #[must_use]
    pub fn contains(&self, task_id: TaskId) -> bool {
        self.histories.contains_key(&task_id)
    }
}

impl Default for GraphHistoryRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
