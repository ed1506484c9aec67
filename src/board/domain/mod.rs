//! Domain model for the task board.
//!
//! Tasks own their ordered steps and a decomposition graph of subtask nodes
//! and edges. Everything here is plain data plus invariant-preserving
//! mutators; scoring, history and orchestration live in
//! [`crate::board::services`].

mod capacity;
mod error;
mod graph;
mod ids;
mod layout;
mod score;
mod sequence;
mod step;
mod task;

pub use capacity::{Capacity, WorkCalendar};
pub use error::{
    ParsePreferredSlotError, ParseStepStateError, ParseTaskPriorityError, ParseTaskStatusError,
    TaskDomainError,
};
pub use graph::{
    Confidence, ConfidenceBand, GraphSnapshot, RELATION_DEPENDENCY, RELATION_SEQUENCE,
    SubtaskEdge, SubtaskNode,
};
pub use ids::{EdgeId, NodeId, StepId, TaskId};
pub use layout::LayoutPoint;
pub use score::{ConflictLevel, ConflictScore};
pub use sequence::{OrderIndexed, reindex, reorder};
pub use step::{DEFAULT_ESTIMATED_MINUTES, StepState, TaskStep};
pub use task::{
    INITIAL_GRAPH_VERSION, NextAction, PersistedTaskData, PreferredSlot, Task, TaskDraft,
    TaskPriority, TaskStatus,
};
