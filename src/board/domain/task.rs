//! Task aggregate root and related lifecycle types.

use super::{
    ConflictScore, EdgeId, GraphSnapshot, NodeId, ParsePreferredSlotError, ParseTaskPriorityError,
    ParseTaskStatusError, StepId, SubtaskEdge, SubtaskNode, TaskDomainError, TaskId, TaskStep,
    sequence::{reindex, reorder},
    step::DEFAULT_ESTIMATED_MINUTES,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Graph version assigned to every new task.
pub const INITIAL_GRAPH_VERSION: u64 = 1;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Captured but not yet broken down.
    #[default]
    Draft,
    /// Broken down into steps and being worked on.
    Refined,
    /// Finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Refined => "refined",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "draft" => Ok(Self::Draft),
            "refined" => Ok(Self::Refined),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskPriority {
    /// Needs attention first.
    High,
    /// Regular work.
    #[default]
    Medium,
    /// Can wait.
    Low,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

/// Part of the day the user would rather work on a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferredSlot {
    /// No preference.
    #[default]
    Anytime,
    /// Before noon.
    Morning,
    /// Between noon and the evening.
    Afternoon,
    /// After work.
    Evening,
}

impl PreferredSlot {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anytime => "anytime",
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }
}

impl TryFrom<&str> for PreferredSlot {
    type Error = ParsePreferredSlotError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "anytime" => Ok(Self::Anytime),
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            _ => Err(ParsePreferredSlotError(value.to_owned())),
        }
    }
}

/// What the user should do next with a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction<'a> {
    /// The draft still has to be broken down.
    Refine,
    /// Work on the first step that is not done.
    Step(&'a TaskStep),
    /// Every step is done; review the result.
    Review,
    /// Nothing left to do.
    Completed,
}

/// Validated input for a brand-new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    detail: Option<String>,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
    preferred_slot: PreferredSlot,
    baseline_estimate_minutes: u32,
    steps: Vec<TaskStep>,
}

impl TaskDraft {
    /// Creates a draft with the required title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] if the title is blank.
    pub fn new(title: impl Into<String>) -> Result<Self, TaskDomainError> {
        Ok(Self {
            title: normalize_title(title)?,
            detail: None,
            due_at: None,
            priority: TaskPriority::default(),
            preferred_slot: PreferredSlot::default(),
            baseline_estimate_minutes: DEFAULT_ESTIMATED_MINUTES,
            steps: Vec::new(),
        })
    }

    /// Sets the detail text, dropping blank input.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = normalize_detail(&detail.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: Option<DateTime<Utc>>) -> Self {
        self.due_at = due_at;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the preferred time of day.
    #[must_use]
    pub const fn with_preferred_slot(mut self, preferred_slot: PreferredSlot) -> Self {
        self.preferred_slot = preferred_slot;
        self
    }

    /// Sets the estimate used while the task has no steps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NonPositiveEstimate`] when `minutes` is zero.
    pub fn with_estimated_minutes(mut self, minutes: u32) -> Result<Self, TaskDomainError> {
        self.baseline_estimate_minutes = positive_estimate(minutes)?;
        Ok(self)
    }

    /// Sets the initial steps; their order indices are rewritten densely.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = TaskStep>) -> Self {
        self.steps = steps.into_iter().collect();
        reindex(&mut self.steps);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    title: String,
    detail: Option<String>,
    created_at: DateTime<Utc>,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
    preferred_slot: PreferredSlot,
    status: TaskStatus,
    steps: Vec<TaskStep>,
    baseline_estimate_minutes: u32,
    conflict_score: Option<ConflictScore>,
    conflict_calculated_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    graph_version: u64,
    graph_nodes: Vec<SubtaskNode>,
    graph_edges: Vec<SubtaskEdge>,
}

/// Parameter object for reconstructing a task from stored data.
///
/// No invariants are checked; callers such as the record decoder validate
/// before building one.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedTaskData {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Optional detail.
    pub detail: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    pub due_at: Option<DateTime<Utc>>,
    /// Priority.
    pub priority: TaskPriority,
    /// Preferred time of day.
    pub preferred_slot: PreferredSlot,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Steps in order.
    pub steps: Vec<TaskStep>,
    /// Estimate used while there are no steps.
    pub baseline_estimate_minutes: u32,
    /// Last computed conflict score.
    pub conflict_score: Option<ConflictScore>,
    /// When the conflict score was computed.
    pub conflict_calculated_at: Option<DateTime<Utc>>,
    /// Completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Graph edit counter.
    pub graph_version: u64,
    /// Graph nodes in display order.
    pub graph_nodes: Vec<SubtaskNode>,
    /// Graph edges.
    pub graph_edges: Vec<SubtaskEdge>,
}

impl Task {
    /// Creates a draft task from validated input.
    #[must_use]
    pub fn from_draft(draft: TaskDraft, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::new(),
            title: draft.title,
            detail: draft.detail,
            created_at: clock.utc(),
            due_at: draft.due_at,
            priority: draft.priority,
            preferred_slot: draft.preferred_slot,
            status: TaskStatus::Draft,
            steps: draft.steps,
            baseline_estimate_minutes: draft.baseline_estimate_minutes,
            conflict_score: None,
            conflict_calculated_at: None,
            completed_at: None,
            graph_version: INITIAL_GRAPH_VERSION,
            graph_nodes: Vec::new(),
            graph_edges: Vec::new(),
        }
    }

    /// Reconstructs a task from stored data.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            detail: data.detail,
            created_at: data.created_at,
            due_at: data.due_at,
            priority: data.priority,
            preferred_slot: data.preferred_slot,
            status: data.status,
            steps: data.steps,
            baseline_estimate_minutes: data.baseline_estimate_minutes,
            conflict_score: data.conflict_score,
            conflict_calculated_at: data.conflict_calculated_at,
            completed_at: data.completed_at,
            graph_version: data.graph_version.max(INITIAL_GRAPH_VERSION),
            graph_nodes: data.graph_nodes,
            graph_edges: data.graph_edges,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the detail text, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_at(&self) -> Option<DateTime<Utc>> {
        self.due_at
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the preferred time of day.
    #[must_use]
    pub const fn preferred_slot(&self) -> PreferredSlot {
        self.preferred_slot
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the steps in order.
    #[must_use]
    pub fn steps(&self) -> &[TaskStep] {
        &self.steps
    }

    /// Returns the estimate used while there are no steps.
    #[must_use]
    pub const fn baseline_estimate_minutes(&self) -> u32 {
        self.baseline_estimate_minutes
    }

    /// Returns the last computed conflict score.
    ///
    /// `None` means either "not computed yet" or "no capacity that day";
    /// check [`Self::conflict_calculated_at`] to tell them apart.
    #[must_use]
    pub const fn conflict_score(&self) -> Option<ConflictScore> {
        self.conflict_score
    }

    /// Returns when the conflict score was last computed.
    #[must_use]
    pub const fn conflict_calculated_at(&self) -> Option<DateTime<Utc>> {
        self.conflict_calculated_at
    }

    /// Returns the completion timestamp; present only for completed tasks.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the graph edit counter.
    #[must_use]
    pub const fn graph_version(&self) -> u64 {
        self.graph_version
    }

    /// Returns the graph nodes in display order.
    #[must_use]
    pub fn graph_nodes(&self) -> &[SubtaskNode] {
        &self.graph_nodes
    }

    /// Returns the graph edges.
    #[must_use]
    pub fn graph_edges(&self) -> &[SubtaskEdge] {
        &self.graph_edges
    }

    /// Returns the first node, which acts as the graph root.
    #[must_use]
    pub fn root_node(&self) -> Option<&SubtaskNode> {
        self.graph_nodes.first()
    }

    /// Sum of step estimates, or the baseline estimate when there are no
    /// steps.
    #[must_use]
    pub fn total_estimated_minutes(&self) -> u32 {
        if self.steps.is_empty() {
            return self.baseline_estimate_minutes;
        }
        self.steps
            .iter()
            .fold(0_u32, |total, step| total.saturating_add(step.estimated_minutes()))
    }

    /// Returns what the user should do next.
    #[must_use]
    pub fn next_action(&self) -> NextAction<'_> {
        match self.status {
            TaskStatus::Draft => NextAction::Refine,
            TaskStatus::Refined => self
                .steps
                .iter()
                .find(|step| !step.is_done())
                .map_or(NextAction::Review, NextAction::Step),
            TaskStatus::Completed => NextAction::Completed,
        }
    }

    /// Fraction of steps that are done, in `[0, 1]`; `0` without steps.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "progress is a ratio of two step counts"
    )]
    pub fn progress(&self) -> f64 {
        let done = self.steps.iter().filter(|step| step.is_done()).count();
        let (Ok(done_count), Ok(total)) = (u32::try_from(done), u32::try_from(self.steps.len()))
        else {
            return 0.0;
        };
        if total == 0 {
            return 0.0;
        }
        f64::from(done_count) / f64::from(total)
    }

    /// Earliest scheduled time among steps that are not done.
    #[must_use]
    pub fn next_scheduled_step_at(&self) -> Option<DateTime<Utc>> {
        self.steps
            .iter()
            .filter(|step| !step.is_done())
            .filter_map(TaskStep::scheduled_at)
            .min()
    }

    /// Sets the title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] if the title is blank.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), TaskDomainError> {
        self.title = normalize_title(title)?;
        Ok(())
    }

    /// Sets or clears the detail text.
    pub fn set_detail(&mut self, detail: Option<String>) {
        self.detail = detail.as_deref().and_then(normalize_detail);
    }

    /// Sets or clears the due date.
    pub const fn set_due_at(&mut self, due_at: Option<DateTime<Utc>>) {
        self.due_at = due_at;
    }

    /// Sets the priority.
    pub const fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Sets the preferred time of day.
    pub const fn set_preferred_slot(&mut self, preferred_slot: PreferredSlot) {
        self.preferred_slot = preferred_slot;
    }

    /// Sets the estimate used while there are no steps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NonPositiveEstimate`] when `minutes` is zero.
    pub fn set_baseline_estimate_minutes(&mut self, minutes: u32) -> Result<(), TaskDomainError> {
        self.baseline_estimate_minutes = positive_estimate(minutes)?;
        Ok(())
    }

    /// Sets the status, stamping `completed_at` when the task completes and
    /// clearing it otherwise.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.completed_at = (status == TaskStatus::Completed).then(|| clock.utc());
    }

    /// Appends a step at the end of the list.
    pub fn push_step(&mut self, step: TaskStep) {
        self.steps.push(step);
        reindex(&mut self.steps);
    }

    /// Advances the state of one step. Returns `false` if the step is
    /// unknown.
    pub fn advance_step(&mut self, step_id: StepId) -> bool {
        let Some(step) = self.steps.iter_mut().find(|step| step.id() == step_id) else {
            return false;
        };
        step.advance();
        true
    }

    /// Moves steps as a block and rewrites their order indices.
    pub fn reorder_steps(&mut self, sources: &[usize], destination: usize) {
        reorder(&mut self.steps, sources, destination);
        reindex(&mut self.steps);
    }

    /// Adds an edge between two existing nodes of this task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DanglingEdgeEndpoint`] when either node is
    /// not part of this task's graph, [`TaskDomainError::SelfLoop`] when both
    /// endpoints are the same node, and [`TaskDomainError::DuplicateEdge`]
    /// when the pair is already connected.
    pub fn connect(
        &mut self,
        source: NodeId,
        target: NodeId,
        relation: impl Into<String>,
    ) -> Result<EdgeId, TaskDomainError> {
        self.ensure_can_connect(source, target)?;
        let edge = SubtaskEdge::new(self.id, source, target).with_relation(relation);
        let edge_id = edge.id();
        self.graph_edges.push(edge);
        Ok(edge_id)
    }

    /// Checks that an edge from `source` to `target` would be well formed.
    ///
    /// # Errors
    ///
    /// See [`Self::connect`].
    pub fn ensure_can_connect(&self, source: NodeId, target: NodeId) -> Result<(), TaskDomainError> {
        for endpoint in [source, target] {
            if self.node(endpoint).is_none() {
                return Err(TaskDomainError::DanglingEdgeEndpoint {
                    task_id: self.id,
                    node_id: endpoint,
                });
            }
        }
        if source == target {
            return Err(TaskDomainError::SelfLoop(source));
        }
        let duplicate = self
            .graph_edges
            .iter()
            .any(|edge| edge.source_node_id() == source && edge.target_node_id() == target);
        if duplicate {
            return Err(TaskDomainError::DuplicateEdge {
                source_id: source,
                target_id: target,
            });
        }
        Ok(())
    }

    /// Returns the node with the given identifier.
    #[must_use]
    pub fn node(&self, node_id: NodeId) -> Option<&SubtaskNode> {
        self.graph_nodes.iter().find(|node| node.id() == node_id)
    }

    /// Copies the current graph.
    #[must_use]
    pub fn graph_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.graph_nodes.clone(),
            edges: self.graph_edges.clone(),
        }
    }

    pub(crate) fn node_mut(&mut self, node_id: NodeId) -> Option<&mut SubtaskNode> {
        self.graph_nodes.iter_mut().find(|node| node.id() == node_id)
    }

    pub(crate) fn push_node(&mut self, node: SubtaskNode) {
        self.graph_nodes.push(node);
    }

    /// Adds an edge that the caller has already validated.
    pub(crate) fn push_edge(&mut self, edge: SubtaskEdge) {
        self.graph_edges.push(edge);
    }

    pub(crate) fn reorder_nodes(&mut self, sources: &[usize], destination: usize) {
        reorder(&mut self.graph_nodes, sources, destination);
    }

    pub(crate) fn replace_graph(&mut self, snapshot: GraphSnapshot) {
        self.graph_nodes = snapshot.nodes;
        self.graph_edges = snapshot.edges;
    }

    pub(crate) const fn bump_graph_version(&mut self) {
        self.graph_version = self.graph_version.saturating_add(1);
    }

    pub(crate) fn rewind_graph_version(&mut self) {
        self.graph_version = self
            .graph_version
            .saturating_sub(1)
            .max(INITIAL_GRAPH_VERSION);
    }

    /// Stores a freshly computed score together with its timestamp.
    pub(crate) fn record_conflict(
        &mut self,
        score: Option<ConflictScore>,
        calculated_at: DateTime<Utc>,
    ) {
        self.conflict_score = score;
        self.conflict_calculated_at = Some(calculated_at);
    }
}

fn normalize_title(title: impl Into<String>) -> Result<String, TaskDomainError> {
    let raw = title.into();
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(TaskDomainError::EmptyTitle);
    }
    Ok(normalized.to_owned())
}

fn normalize_detail(detail: &str) -> Option<String> {
    let normalized = detail.trim();
    (!normalized.is_empty()).then(|| normalized.to_owned())
}

const fn positive_estimate(minutes: u32) -> Result<u32, TaskDomainError> {
    if minutes == 0 {
        return Err(TaskDomainError::NonPositiveEstimate);
    }
    Ok(minutes)
}
