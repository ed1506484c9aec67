//! Task store: the single owner of board state.
//!
//! Every committed mutation recomputes conflict scores synchronously and
//! publishes exactly one [`BoardViews`] notification to subscribers.
//! Operations that name an unknown task, step or node are silent no-ops:
//! they change nothing and publish nothing. Capacity changes are the one
//! exception to synchronous recomputation; they are debounced and applied
//! when the owner polls [`TaskStore::poll_scheduled_recompute`].

mod graph;
mod views;

pub use graph::{DRAG_BOUNDS, NEW_NODE_TITLE, PLACEMENT_BOUNDS};
pub use views::{BoardViews, active, completed, inbox};

use crate::board::{
    config::{BoardConfig, BoardConfigError},
    domain::{
        Capacity, DEFAULT_ESTIMATED_MINUTES, PreferredSlot, StepId, Task, TaskDomainError,
        TaskDraft, TaskId, TaskPriority, TaskStatus, TaskStep, WorkCalendar,
    },
    services::{DebounceTimer, GraphHistoryRegistry, calculate_scores},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Request payload for adding a task to the inbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTaskRequest {
    title: String,
    detail: Option<String>,
    due_at: Option<DateTime<Utc>>,
    priority: TaskPriority,
    preferred_slot: PreferredSlot,
    estimated_minutes: u32,
}

impl AddTaskRequest {
    /// Creates a request with the required fields and a 30 minute estimate.
    #[must_use]
    pub fn new(title: impl Into<String>, priority: TaskPriority) -> Self {
        Self {
            title: title.into(),
            detail: None,
            due_at: None,
            priority,
            preferred_slot: PreferredSlot::Anytime,
            estimated_minutes: DEFAULT_ESTIMATED_MINUTES,
        }
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_at(mut self, due_at: Option<DateTime<Utc>>) -> Self {
        self.due_at = due_at;
        self
    }

    /// Sets the estimate in minutes.
    #[must_use]
    pub const fn with_estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = minutes;
        self
    }

    /// Sets the preferred time of day.
    #[must_use]
    pub const fn with_preferred_slot(mut self, preferred_slot: PreferredSlot) -> Self {
        self.preferred_slot = preferred_slot;
        self
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    fn into_draft(self) -> Result<TaskDraft, TaskDomainError> {
        let draft = TaskDraft::new(self.title)?
            .with_due_at(self.due_at)
            .with_priority(self.priority)
            .with_preferred_slot(self.preferred_slot)
            .with_estimated_minutes(self.estimated_minutes)?;
        Ok(match self.detail {
            Some(detail) => draft.with_detail(detail),
            None => draft,
        })
    }
}

/// Owner of the task list, capacity model and graph histories.
///
/// The store is single-writer: every operation takes `&mut self` and runs
/// to completion before returning. Readers observe committed state through
/// accessors or by subscribing to [`BoardViews`] notifications.
pub struct TaskStore<C: Clock> {
    tasks: Vec<Task>,
    capacity: Capacity,
    calendar: WorkCalendar,
    histories: GraphHistoryRegistry,
    recompute_timer: DebounceTimer,
    notifier: broadcast::Sender<BoardViews>,
    clock: Arc<C>,
}

impl<C: Clock> TaskStore<C> {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self::build(&BoardConfig::default(), WorkCalendar::utc(), clock)
    }

    /// Creates an empty store from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BoardConfigError::InvalidUtcOffset`] when the configured
    /// offset does not describe a valid time zone.
    pub fn with_config(config: &BoardConfig, clock: Arc<C>) -> Result<Self, BoardConfigError> {
        let calendar = config.calendar()?;
        Ok(Self::build(config, calendar, clock))
    }

    fn build(config: &BoardConfig, calendar: WorkCalendar, clock: Arc<C>) -> Self {
        let (notifier, _) = broadcast::channel(config.notification_capacity.max(1));
        Self {
            tasks: Vec::new(),
            capacity: config.capacity,
            calendar,
            histories: GraphHistoryRegistry::new(config.history_limit),
            recompute_timer: DebounceTimer::new(config.debounce_millis),
            notifier,
            clock,
        }
    }

    /// Subscribes to the views published after every committed mutation.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<BoardViews> {
        self.notifier.subscribe()
    }

    /// Returns every task in insertion order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns the task with the given identifier.
    #[must_use]
    pub fn get_task(&self, task_id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns the capacity model currently in effect.
    #[must_use]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Returns the calendar used to bucket work into days.
    #[must_use]
    pub const fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    /// Returns `true` while a debounced recompute is waiting to run.
    #[must_use]
    pub const fn has_pending_recompute(&self) -> bool {
        self.recompute_timer.is_pending()
    }

    /// Replaces the whole task list, for example when hydrating from
    /// storage.
    ///
    /// Graph histories are discarded along with the old tasks.
    pub fn load_tasks(&mut self, tasks: impl IntoIterator<Item = Task>) {
        self.tasks = tasks.into_iter().collect();
        self.histories.clear();
        debug!(task_count = self.tasks.len(), "loaded tasks into store");
        self.commit();
    }

    /// Adds a draft task to the inbox and returns its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title and
    /// [`TaskDomainError::NonPositiveEstimate`] for a zero estimate.
    pub fn add_task(&mut self, request: AddTaskRequest) -> Result<TaskId, TaskDomainError> {
        let task = Task::from_draft(request.into_draft()?, self.clock.as_ref());
        let task_id = task.id();
        self.tasks.push(task);
        debug!(%task_id, "added task");
        self.commit();
        Ok(task_id)
    }

    /// Replaces the stored task that has the same identifier.
    pub fn update_task(&mut self, task: Task) {
        let task_id = task.id();
        let Some(slot) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring update for unknown task");
            return;
        };
        *slot = task;
        self.commit();
    }

    /// Sets a task's status, stamping or clearing its completion time.
    pub fn update_status(&mut self, task_id: TaskId, status: TaskStatus) {
        let Some(task) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring status change for unknown task");
            return;
        };
        task.set_status(status, self.clock.as_ref());
        debug!(%task_id, status = status.as_str(), "updated task status");
        self.commit();
    }

    /// Marks a task as completed.
    pub fn mark_completed(&mut self, task_id: TaskId) {
        self.update_status(task_id, TaskStatus::Completed);
    }

    /// Advances one step along pending → in progress → done → pending.
    pub fn advance_step(&mut self, task_id: TaskId, step_id: StepId) {
        let advanced =
            find_task_mut(&mut self.tasks, task_id).is_some_and(|task| task.advance_step(step_id));
        if !advanced {
            trace!(%task_id, %step_id, "ignoring advance of unknown step");
            return;
        }
        self.commit();
    }

    /// Appends a step to a task.
    pub fn add_step(&mut self, task_id: TaskId, step: TaskStep) {
        let Some(task) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring step for unknown task");
            return;
        };
        task.push_step(step);
        self.commit();
    }

    /// Moves steps as a block and rewrites their order indices densely.
    pub fn reorder_steps(&mut self, task_id: TaskId, sources: &[usize], destination: usize) {
        let Some(task) = find_task_mut(&mut self.tasks, task_id) else {
            trace!(%task_id, "ignoring step reorder for unknown task");
            return;
        };
        task.reorder_steps(sources, destination);
        self.commit();
    }

    /// Changes the capacity model.
    ///
    /// Scores are not recomputed immediately. Each call restarts the quiet
    /// period, and a single recompute runs once it has elapsed and the
    /// owner polls [`Self::poll_scheduled_recompute`].
    pub fn set_capacity(&mut self, capacity: Capacity) {
        self.capacity = capacity;
        self.recompute_timer.schedule(self.clock.utc());
        debug!(
            weekday_minutes = capacity.weekday_minutes,
            weekend_minutes = capacity.weekend_minutes,
            "scheduled conflict recompute after capacity change"
        );
    }

    /// Runs the debounced recompute if its quiet period has elapsed.
    ///
    /// Returns `true` when a recompute ran.
    pub fn poll_scheduled_recompute(&mut self) -> bool {
        if !self.recompute_timer.fire_if_due(self.clock.utc()) {
            return false;
        }
        debug!("running debounced conflict recompute");
        self.commit();
        true
    }

    /// Drops a pending debounced recompute. Returns `true` if one was
    /// pending.
    pub fn cancel_pending_recompute(&mut self) -> bool {
        self.recompute_timer.cancel()
    }

    /// Recomputes every conflict score now and publishes the result.
    pub fn recalculate_conflicts(&mut self) {
        self.commit();
    }

    fn commit(&mut self) {
        self.recompute_scores();
        self.publish();
    }

    fn recompute_scores(&mut self) {
        let now = self.clock.utc();
        let scores = calculate_scores(&self.tasks, &self.calendar, self.capacity, now);
        for task in &mut self.tasks {
            task.record_conflict(scores.get(&task.id()).copied(), now);
        }
        debug!(
            task_count = self.tasks.len(),
            scored_count = scores.len(),
            "recomputed conflict scores"
        );
    }

    fn publish(&self) {
        if self.notifier.receiver_count() == 0 {
            return;
        }
        if self.notifier.send(self.views()).is_err() {
            trace!("board subscribers went away before notification");
        }
    }
}

impl<C: Clock> Drop for TaskStore<C> {
    fn drop(&mut self) {
        if self.recompute_timer.cancel() {
            debug!("discarded pending conflict recompute on store teardown");
        }
    }
}

fn find_task_mut(tasks: &mut [Task], task_id: TaskId) -> Option<&mut Task> {
    tasks.iter_mut().find(|task| task.id() == task_id)
}
