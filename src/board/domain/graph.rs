//! Decomposition graph entities: subtask nodes, edges and snapshots.

use super::{EdgeId, LayoutPoint, NodeId, TaskId};
use std::collections::BTreeMap;

/// Relation tag for edges expressing "do this after that".
pub const RELATION_SEQUENCE: &str = "sequence";
/// Relation tag for edges expressing a hard prerequisite.
pub const RELATION_DEPENDENCY: &str = "dependency";

/// Confidence attached to a proposed node, clamped to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    /// Confidence given to nodes that carry no explicit value.
    pub const DEFAULT: Self = Self(0.5);
    /// Confidence given to nodes a person created directly.
    pub const CERTAIN: Self = Self(1.0);

    /// Creates a confidence value, clamping it into `[0, 1]`.
    ///
    /// `NaN` is treated as zero.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the coarse band the value falls into.
    #[must_use]
    pub fn band(self) -> ConfidenceBand {
        if self.0 >= 0.75 {
            ConfidenceBand::High
        } else if self.0 >= 0.5 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Coarse classification of a [`Confidence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidenceBand {
    /// Below 0.5.
    Low,
    /// From 0.5 up to 0.75.
    Medium,
    /// 0.75 and above.
    High,
}

/// A node in a task's decomposition graph.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtaskNode {
    id: NodeId,
    task_id: TaskId,
    parent_node_id: Option<NodeId>,
    title: String,
    ai_proposed_title: Option<String>,
    confidence: Confidence,
    metadata: BTreeMap<String, String>,
    layout: LayoutPoint,
    is_user_edited: bool,
}

impl SubtaskNode {
    /// Creates a node owned by `task_id`, centred on the canvas.
    #[must_use]
    pub fn new(task_id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            task_id,
            parent_node_id: None,
            title: title.into(),
            ai_proposed_title: None,
            confidence: Confidence::DEFAULT,
            metadata: BTreeMap::new(),
            layout: LayoutPoint::CENTER,
            is_user_edited: false,
        }
    }

    /// Replaces the identifier, used when rebuilding persisted nodes.
    #[must_use]
    pub const fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    /// Records the parent node as a layout hint.
    #[must_use]
    pub const fn with_parent(mut self, parent_node_id: NodeId) -> Self {
        self.parent_node_id = Some(parent_node_id);
        self
    }

    /// Stores the title originally proposed for this node.
    #[must_use]
    pub fn with_ai_proposed_title(mut self, title: impl Into<String>) -> Self {
        self.ai_proposed_title = Some(title.into());
        self
    }

    /// Sets the confidence.
    #[must_use]
    pub const fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    /// Replaces the free-form metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: BTreeMap<String, String>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Sets the canvas position.
    #[must_use]
    pub const fn with_layout(mut self, layout: LayoutPoint) -> Self {
        self.layout = layout;
        self
    }

    /// Marks the node as authored by a person.
    #[must_use]
    pub const fn user_edited(mut self) -> Self {
        self.is_user_edited = true;
        self
    }

    /// Returns the node identifier.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the parent hint, if any.
    #[must_use]
    pub const fn parent_node_id(&self) -> Option<NodeId> {
        self.parent_node_id
    }

    /// Returns the current title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the originally proposed title, if any.
    #[must_use]
    pub fn ai_proposed_title(&self) -> Option<&str> {
        self.ai_proposed_title.as_deref()
    }

    /// Returns the confidence.
    #[must_use]
    pub const fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Returns the free-form metadata.
    #[must_use]
    pub const fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Returns the canvas position.
    #[must_use]
    pub const fn layout(&self) -> LayoutPoint {
        self.layout
    }

    /// Returns `true` once a person has created or renamed the node.
    #[must_use]
    pub const fn is_user_edited(&self) -> bool {
        self.is_user_edited
    }

    /// Renames the node on behalf of a person.
    pub fn rename_by_user(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.is_user_edited = true;
    }

    /// Moves the node without any range checks.
    pub const fn move_to(&mut self, layout: LayoutPoint) {
        self.layout = layout;
    }
}

/// A directed edge between two nodes of the same task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtaskEdge {
    id: EdgeId,
    task_id: TaskId,
    source_node_id: NodeId,
    target_node_id: NodeId,
    relation: String,
}

impl SubtaskEdge {
    /// Creates a `sequence` edge from `source` to `target`.
    #[must_use]
    pub fn new(task_id: TaskId, source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::new(),
            task_id,
            source_node_id: source,
            target_node_id: target,
            relation: RELATION_SEQUENCE.to_owned(),
        }
    }

    /// Replaces the identifier, used when rebuilding persisted edges.
    #[must_use]
    pub const fn with_id(mut self, id: EdgeId) -> Self {
        self.id = id;
        self
    }

    /// Sets the free-form relation tag.
    #[must_use]
    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = relation.into();
        self
    }

    /// Returns the edge identifier.
    #[must_use]
    pub const fn id(&self) -> EdgeId {
        self.id
    }

    /// Returns the owning task identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the source node identifier.
    #[must_use]
    pub const fn source_node_id(&self) -> NodeId {
        self.source_node_id
    }

    /// Returns the target node identifier.
    #[must_use]
    pub const fn target_node_id(&self) -> NodeId {
        self.target_node_id
    }

    /// Returns the relation tag.
    #[must_use]
    pub fn relation(&self) -> &str {
        &self.relation
    }
}

/// Full copy of a task's graph, as captured for undo and redo.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    /// Nodes in display order.
    pub nodes: Vec<SubtaskNode>,
    /// Edges between those nodes.
    pub edges: Vec<SubtaskEdge>,
}
