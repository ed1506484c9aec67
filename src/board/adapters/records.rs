//! Serialised record shapes for tasks and their graphs.
//!
//! Records are the forward and backward compatible wire form used by any
//! durability layer built on the board. Keys are camelCase, node positions
//! are split into the scalar fields `layoutX` and `layoutY`, absent optional
//! values are omitted on encode, and missing fields fall back to their
//! documented defaults on decode.

use crate::board::domain::{
    Confidence, ConflictScore, DEFAULT_ESTIMATED_MINUTES, EdgeId, INITIAL_GRAPH_VERSION,
    LayoutPoint, NodeId, PersistedTaskData, PreferredSlot, RELATION_SEQUENCE, StepId, StepState,
    SubtaskEdge, SubtaskNode, Task, TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskStep,
    reindex,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors returned while encoding or decoding records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The JSON document could not be read or written.
    #[error("malformed task record JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record holds a value the domain rejects.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The completion timestamp is present without completed status, or
    /// missing with it.
    #[error("task {task_id} has status {status:?} but inconsistent completion timestamp")]
    CompletionMismatch {
        /// Offending task.
        task_id: TaskId,
        /// Status recorded for the task.
        status: TaskStatus,
    },
}

/// Serialised task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Optional detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<DateTime<Utc>>,
    /// Priority; medium when missing.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Preferred time of day; anytime when missing.
    #[serde(default)]
    pub preferred_slot: PreferredSlot,
    /// Status; draft when missing.
    #[serde(default)]
    pub status: TaskStatus,
    /// Steps in order.
    #[serde(default)]
    pub steps: Vec<TaskStepRecord>,
    /// Estimate used while there are no steps; 30 when missing.
    #[serde(default = "default_estimate")]
    pub baseline_estimate_minutes: u32,
    /// Last computed conflict score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_score: Option<f64>,
    /// When the conflict score was computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict_calculated_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Graph edit counter; 1 when missing.
    #[serde(default = "initial_graph_version")]
    pub graph_version: u64,
    /// Graph nodes in display order.
    #[serde(default)]
    pub nodes: Vec<SubtaskNodeRecord>,
    /// Graph edges.
    #[serde(default)]
    pub edges: Vec<SubtaskEdgeRecord>,
}

/// Serialised task step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStepRecord {
    /// Step identifier.
    pub id: StepId,
    /// Title.
    pub title: String,
    /// Optional detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Estimate; 30 when missing.
    #[serde(default = "default_estimate")]
    pub estimated_minutes: u32,
    /// Position within the task.
    #[serde(default)]
    pub order_index: usize,
    /// Progress; pending when missing.
    #[serde(default)]
    pub state: StepState,
    /// Optional scheduled time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Serialised graph node with its position split into scalar fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskNodeRecord {
    /// Node identifier.
    pub id: NodeId,
    /// Owning task.
    pub task_id: TaskId,
    /// Optional parent hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_node_id: Option<NodeId>,
    /// Current title.
    pub title: String,
    /// Originally proposed title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_proposed_title: Option<String>,
    /// Confidence; 0.5 when missing.
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    /// Flat string metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Horizontal position; 0.5 when missing.
    #[serde(default = "default_coordinate")]
    pub layout_x: f64,
    /// Vertical position; 0.5 when missing.
    #[serde(default = "default_coordinate")]
    pub layout_y: f64,
    /// Whether a person created or renamed the node.
    #[serde(default)]
    pub is_user_edited: bool,
}

/// Serialised graph edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtaskEdgeRecord {
    /// Edge identifier.
    pub id: EdgeId,
    /// Owning task.
    pub task_id: TaskId,
    /// Source node.
    pub source_node_id: NodeId,
    /// Target node.
    pub target_node_id: NodeId,
    /// Relation tag; `sequence` when missing.
    #[serde(default = "default_relation")]
    pub relation: String,
}

const fn default_estimate() -> u32 {
    DEFAULT_ESTIMATED_MINUTES
}

const fn initial_graph_version() -> u64 {
    INITIAL_GRAPH_VERSION
}

const fn default_confidence() -> f64 {
    Confidence::DEFAULT.value()
}

const fn default_coordinate() -> f64 {
    LayoutPoint::CENTER.x
}

fn default_relation() -> String {
    RELATION_SEQUENCE.to_owned()
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            detail: task.detail().map(str::to_owned),
            created_at: task.created_at(),
            due_at: task.due_at(),
            priority: task.priority(),
            preferred_slot: task.preferred_slot(),
            status: task.status(),
            steps: task.steps().iter().map(TaskStepRecord::from).collect(),
            baseline_estimate_minutes: task.baseline_estimate_minutes(),
            conflict_score: task.conflict_score().map(ConflictScore::value),
            conflict_calculated_at: task.conflict_calculated_at(),
            completed_at: task.completed_at(),
            graph_version: task.graph_version(),
            nodes: task.graph_nodes().iter().map(SubtaskNodeRecord::from).collect(),
            edges: task.graph_edges().iter().map(SubtaskEdgeRecord::from).collect(),
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = RecordError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let completed = record.status == TaskStatus::Completed;
        if completed != record.completed_at.is_some() {
            return Err(RecordError::CompletionMismatch {
                task_id: record.id,
                status: record.status,
            });
        }
        let title = record.title.trim().to_owned();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle.into());
        }
        if record.baseline_estimate_minutes == 0 {
            return Err(TaskDomainError::NonPositiveEstimate.into());
        }

        let mut ordered_steps = record.steps;
        ordered_steps.sort_by_key(|step| step.order_index);
        let mut steps = ordered_steps
            .into_iter()
            .map(TaskStep::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        reindex(&mut steps);

        Ok(Self::from_persisted(PersistedTaskData {
            id: record.id,
            title,
            detail: record.detail,
            created_at: record.created_at,
            due_at: record.due_at,
            priority: record.priority,
            preferred_slot: record.preferred_slot,
            status: record.status,
            steps,
            baseline_estimate_minutes: record.baseline_estimate_minutes,
            conflict_score: record.conflict_score.map(ConflictScore::clamped),
            conflict_calculated_at: record.conflict_calculated_at,
            completed_at: record.completed_at,
            graph_version: record.graph_version,
            graph_nodes: record.nodes.into_iter().map(SubtaskNode::from).collect(),
            graph_edges: record.edges.into_iter().map(SubtaskEdge::from).collect(),
        }))
    }
}

impl From<&TaskStep> for TaskStepRecord {
    fn from(step: &TaskStep) -> Self {
        Self {
            id: step.id(),
            title: step.title().to_owned(),
            detail: step.detail().map(str::to_owned),
            estimated_minutes: step.estimated_minutes(),
            order_index: step.order_index(),
            state: step.state(),
            scheduled_at: step.scheduled_at(),
        }
    }
}

impl TryFrom<TaskStepRecord> for TaskStep {
    type Error = TaskDomainError;

    fn try_from(record: TaskStepRecord) -> Result<Self, Self::Error> {
        let step = Self::new(record.title, record.order_index)
            .with_id(record.id)
            .with_estimated_minutes(record.estimated_minutes)?
            .with_state(record.state);
        let with_detail = match record.detail {
            Some(detail) => step.with_detail(detail),
            None => step,
        };
        Ok(match record.scheduled_at {
            Some(scheduled_at) => with_detail.with_scheduled_at(scheduled_at),
            None => with_detail,
        })
    }
}

impl From<&SubtaskNode> for SubtaskNodeRecord {
    fn from(node: &SubtaskNode) -> Self {
        let layout = node.layout();
        Self {
            id: node.id(),
            task_id: node.task_id(),
            parent_node_id: node.parent_node_id(),
            title: node.title().to_owned(),
            ai_proposed_title: node.ai_proposed_title().map(str::to_owned),
            confidence: node.confidence().value(),
            metadata: node.metadata().clone(),
            layout_x: layout.x,
            layout_y: layout.y,
            is_user_edited: node.is_user_edited(),
        }
    }
}

impl From<SubtaskNodeRecord> for SubtaskNode {
    fn from(record: SubtaskNodeRecord) -> Self {
        let base = Self::new(record.task_id, record.title)
            .with_id(record.id)
            .with_confidence(Confidence::new(record.confidence))
            .with_metadata(record.metadata)
            .with_layout(LayoutPoint::new(record.layout_x, record.layout_y));
        let with_parent = match record.parent_node_id {
            Some(parent) => base.with_parent(parent),
            None => base,
        };
        let with_proposal = match record.ai_proposed_title {
            Some(proposed) => with_parent.with_ai_proposed_title(proposed),
            None => with_parent,
        };
        if record.is_user_edited {
            with_proposal.user_edited()
        } else {
            with_proposal
        }
    }
}

impl From<&SubtaskEdge> for SubtaskEdgeRecord {
    fn from(edge: &SubtaskEdge) -> Self {
        Self {
            id: edge.id(),
            task_id: edge.task_id(),
            source_node_id: edge.source_node_id(),
            target_node_id: edge.target_node_id(),
            relation: edge.relation().to_owned(),
        }
    }
}

impl From<SubtaskEdgeRecord> for SubtaskEdge {
    fn from(record: SubtaskEdgeRecord) -> Self {
        Self::new(record.task_id, record.source_node_id, record.target_node_id)
            .with_id(record.id)
            .with_relation(record.relation)
    }
}

/// Encodes tasks as a JSON array of [`TaskRecord`]s.
///
/// # Errors
///
/// Returns [`RecordError::Json`] if serialisation fails.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, RecordError> {
    let records: Vec<TaskRecord> = tasks.iter().map(TaskRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Decodes a JSON array of [`TaskRecord`]s.
///
/// # Errors
///
/// Returns [`RecordError::Json`] for malformed JSON and the other
/// [`RecordError`] variants for records the domain rejects.
pub fn decode_tasks(json: &str) -> Result<Vec<Task>, RecordError> {
    let records: Vec<TaskRecord> = serde_json::from_str(json)?;
    records.into_iter().map(Task::try_from).collect()
}
