//! Ordered steps that break a task into concrete work items.

use super::{ParseStepStateError, StepId, TaskDomainError, sequence::OrderIndexed};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estimate applied to steps and tasks when the caller supplies none.
pub const DEFAULT_ESTIMATED_MINUTES: u32 = 30;

/// Progress of a single step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepState {
    /// Work has not started.
    #[default]
    Pending,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Done,
}

impl StepState {
    /// Returns the state that follows this one in the
    /// pending → in progress → done → pending cycle.
    #[must_use]
    pub const fn advanced(self) -> Self {
        match self {
            Self::Pending => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::Pending,
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }
}

impl TryFrom<&str> for StepState {
    type Error = ParseStepStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "pending" => Ok(Self::Pending),
            "inProgress" | "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseStepStateError(value.to_owned())),
        }
    }
}

/// A single ordered step of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStep {
    id: StepId,
    title: String,
    detail: Option<String>,
    estimated_minutes: u32,
    order_index: usize,
    state: StepState,
    scheduled_at: Option<DateTime<Utc>>,
}

impl TaskStep {
    /// Creates a pending step with the default estimate.
    ///
    /// The order index is provisional; it is rewritten when the step is
    /// attached to a task.
    #[must_use]
    pub fn new(title: impl Into<String>, order_index: usize) -> Self {
        Self {
            id: StepId::new(),
            title: title.into(),
            detail: None,
            estimated_minutes: DEFAULT_ESTIMATED_MINUTES,
            order_index,
            state: StepState::Pending,
            scheduled_at: None,
        }
    }

    /// Sets the estimate in minutes.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NonPositiveEstimate`] when `minutes` is zero.
    pub fn with_estimated_minutes(mut self, minutes: u32) -> Result<Self, TaskDomainError> {
        if minutes == 0 {
            return Err(TaskDomainError::NonPositiveEstimate);
        }
        self.estimated_minutes = minutes;
        Ok(self)
    }

    /// Sets the step detail, dropping blank text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        let value = detail.into();
        let normalized = value.trim();
        self.detail = (!normalized.is_empty()).then(|| normalized.to_owned());
        self
    }

    /// Sets the step state.
    #[must_use]
    pub const fn with_state(mut self, state: StepState) -> Self {
        self.state = state;
        self
    }

    /// Sets the time the step is scheduled for.
    #[must_use]
    pub const fn with_scheduled_at(mut self, scheduled_at: DateTime<Utc>) -> Self {
        self.scheduled_at = Some(scheduled_at);
        self
    }

    /// Replaces the identifier, used when rebuilding persisted steps.
    #[must_use]
    pub const fn with_id(mut self, id: StepId) -> Self {
        self.id = id;
        self
    }

    /// Returns the step identifier.
    #[must_use]
    pub const fn id(&self) -> StepId {
        self.id
    }

    /// Returns the step title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the optional detail text.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the estimate in minutes.
    #[must_use]
    pub const fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    /// Returns the dense position of the step within its task.
    #[must_use]
    pub const fn order_index(&self) -> usize {
        self.order_index
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> StepState {
        self.state
    }

    /// Returns the scheduled time, if any.
    #[must_use]
    pub const fn scheduled_at(&self) -> Option<DateTime<Utc>> {
        self.scheduled_at
    }

    /// Returns `true` once the step is done.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.state == StepState::Done
    }

    /// Moves the step to the next state in its cycle.
    pub const fn advance(&mut self) {
        self.state = self.state.advanced();
    }
}

impl OrderIndexed for TaskStep {
    fn set_order_index(&mut self, index: usize) {
        self.order_index = index;
    }
}
