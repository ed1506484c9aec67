//! Error types for task board validation and parsing.

use super::{NodeId, TaskId};
use thiserror::Error;

/// Errors returned while constructing or editing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// An estimate of zero minutes was supplied.
    #[error("estimated minutes must be a positive integer")]
    NonPositiveEstimate,

    /// An edge endpoint does not name a node of the owning task.
    #[error("node {node_id} does not belong to the graph of task {task_id}")]
    DanglingEdgeEndpoint {
        /// Task whose graph was being edited.
        task_id: TaskId,
        /// Endpoint that could not be resolved.
        node_id: NodeId,
    },

    /// Source and target of an edge are the same node.
    #[error("edge would connect node {0} to itself")]
    SelfLoop(NodeId),

    /// An edge between the same source and target already exists.
    #[error("an edge from {source_id} to {target_id} already exists")]
    DuplicateEdge {
        /// Source node of the rejected edge.
        source_id: NodeId,
        /// Target node of the rejected edge.
        target_id: NodeId,
    },
}

/// Error returned while parsing task statuses from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);

/// Error returned while parsing preferred time slots from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown preferred slot: {0}")]
pub struct ParsePreferredSlotError(pub String);

/// Error returned while parsing step states from external input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown step state: {0}")]
pub struct ParseStepStateError(pub String);
