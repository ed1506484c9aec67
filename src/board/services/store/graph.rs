//! Graph editing operations routed through the per-task history.

use super::{Clock, TaskStore, find_task_mut};
use crate::board::domain::{
    Confidence, EdgeId, LayoutPoint, NodeId, SubtaskEdge, SubtaskNode, TaskDomainError, TaskId,
};
use tracing::{debug, trace};

/// Range new nodes are placed within, keeping them clear of the canvas edge.
pub const PLACEMENT_BOUNDS: (f64, f64) = (0.05, 0.95);
/// Range dragged nodes are confined to.
pub const DRAG_BOUNDS: (f64, f64) = (0.02, 0.98);
/// Title given to nodes created on the canvas.
pub const NEW_NODE_TITLE: &str = "New subtask";

impl<C: Clock> TaskStore<C> {
    /// Returns `true` when the task's graph has an edit to undo.
    #[must_use]
    pub fn can_undo_graph(&self, task_id: TaskId) -> bool {
        self.histories.can_undo(task_id)
    }

    /// Returns `true` when the task's graph has an undone edit to redo.
    #[must_use]
    pub fn can_redo_graph(&self, task_id: TaskId) -> bool {
        self.histories.can_redo(task_id)
    }

    /// Creates the history for a task's graph ahead of its first edit.
    pub fn ensure_graph_history(&mut self, task_id: TaskId) {
        if self.get_task(task_id).is_none() {
            trace!(%task_id, "ignoring history request for unknown task");
            return;
        }
        self.histories.ensure(task_id);
    }

    /// Adds a person-authored node near `anchor` and links it from the root
    /// node when the graph already has one.
    ///
    /// Returns the new node's identifier, or `None` for an unknown task.
    pub fn add_subtask_node(&mut self, task_id: TaskId, anchor: LayoutPoint) -> Option<NodeId> {
        let Some(task) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring node for unknown task");
            return None;
        };
        self.histories.ensure(task_id).record(task.graph_snapshot());

        let (min, max) = PLACEMENT_BOUNDS;
        let root_id = task.root_node().map(SubtaskNode::id);
        let created = SubtaskNode::new(task_id, NEW_NODE_TITLE)
            .with_confidence(Confidence::CERTAIN)
            .with_layout(anchor.clamped(min, max))
            .user_edited();
        let node = match root_id {
            Some(parent) => created.with_parent(parent),
            None => created,
        };
        let node_id = node.id();
        task.push_node(node);
        if let Some(parent) = root_id {
            task.push_edge(SubtaskEdge::new(task_id, parent, node_id));
        }
        task.bump_graph_version();
        debug!(%task_id, %node_id, "added subtask node");
        self.commit();
        Some(node_id)
    }

    /// Moves a node during a drag.
    ///
    /// Intermediate drag positions are not undoable and do not change the
    /// graph version; [`Self::finalize_node_position`] marks the gesture end.
    pub fn update_node_position(&mut self, task_id: TaskId, node_id: NodeId, point: LayoutPoint) {
        let (min, max) = DRAG_BOUNDS;
        let Some(node) =
            find_task_mut(&mut self.tasks, task_id).and_then(|task| task.node_mut(node_id))
        else {
            trace!(%task_id, %node_id, "ignoring move of unknown node");
            return;
        };
        node.move_to(point.clamped(min, max));
        self.commit();
    }

    /// Ends a drag gesture by bumping the graph version.
    pub fn finalize_node_position(&mut self, task_id: TaskId) {
        let Some(task) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring drag end for unknown task");
            return;
        };
        task.bump_graph_version();
        self.commit();
    }

    /// Renames a node on behalf of the user.
    pub fn rename_node(&mut self, task_id: TaskId, node_id: NodeId, title: impl Into<String>) {
        let Some(task) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring rename for unknown task");
            return;
        };
        if task.node(node_id).is_none() {
            trace!(%task_id, %node_id, "ignoring rename of unknown node");
            return;
        }
        self.histories.ensure(task_id).record(task.graph_snapshot());
        if let Some(node) = task.node_mut(node_id) {
            node.rename_by_user(title);
        }
        task.bump_graph_version();
        self.commit();
    }

    /// Moves graph nodes as a block within the display order.
    pub fn reorder_graph_nodes(&mut self, task_id: TaskId, sources: &[usize], destination: usize) {
        let Some(task) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring node reorder for unknown task");
            return;
        };
        self.histories.ensure(task_id).record(task.graph_snapshot());
        task.reorder_nodes(sources, destination);
        task.bump_graph_version();
        self.commit();
    }

    /// Adds a validated edge between two nodes of the same task.
    ///
    /// Returns `Ok(None)` for an unknown task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DanglingEdgeEndpoint`],
    /// [`TaskDomainError::SelfLoop`] or [`TaskDomainError::DuplicateEdge`]
    /// when the edge would be malformed; the graph is left untouched.
    pub fn connect_nodes(
        &mut self,
        task_id: TaskId,
        source: NodeId,
        target: NodeId,
        relation: impl Into<String>,
    ) -> Result<Option<EdgeId>, TaskDomainError> {
        let Some(task) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring edge for unknown task");
            return Ok(None);
        };
        task.ensure_can_connect(source, target)?;
        let snapshot = task.graph_snapshot();
        let edge_id = task.connect(source, target, relation)?;
        self.histories.ensure(task_id).record(snapshot);
        task.bump_graph_version();
        debug!(%task_id, %edge_id, "connected subtask nodes");
        self.commit();
        Ok(Some(edge_id))
    }

    /// Restores the graph as it was before the last recorded edit.
    pub fn undo_graph(&mut self, task_id: TaskId) {
        let Some(task) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring undo for unknown task");
            return;
        };
        let history = self.histories.ensure(task_id);
        if !history.can_undo() {
            return;
        }
        let Some(previous) = history.undo(task.graph_snapshot()) else {
            return;
        };
        task.replace_graph(previous);
        task.rewind_graph_version();
        debug!(%task_id, graph_version = task.graph_version(), "undid graph edit");
        self.commit();
    }

    /// Re-applies the graph edit most recently undone.
    pub fn redo_graph(&mut self, task_id: TaskId) {
        let Some(task) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring redo for unknown task");
            return;
        };
        let history = self.histories.ensure(task_id);
        if !history.can_redo() {
            return;
        }
        let Some(next) = history.redo(task.graph_snapshot()) else {
            return;
        };
        task.replace_graph(next);
        task.bump_graph_version();
        debug!(%task_id, graph_version = task.graph_version(), "redid graph edit");
        self.commit();
    }
}
