//! Shared world state for conflict scoring BDD scenarios.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use breakdown::board::{
    domain::{Task, TaskId},
    services::TaskStore,
};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock pinned to a scenario-controlled instant.
pub struct ScenarioClock {
    now: Mutex<DateTime<Utc>>,
}

impl ScenarioClock {
    /// Creates a clock reading 08:00 UTC on Monday 3 March 2025.
    ///
    /// # Panics
    ///
    /// Panics if the fixed timestamp cannot be represented.
    #[must_use]
    pub fn monday_morning() -> Self {
        let now = Utc
            .with_ymd_and_hms(2025, 3, 3, 8, 0, 0)
            .single()
            .expect("valid scenario timestamp");
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward.
    ///
    /// # Panics
    ///
    /// Panics if the clock lock is poisoned.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += delta;
    }
}

impl Clock for ScenarioClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// Scenario world for conflict scoring behaviour tests.
pub struct ConflictWorld {
    pub clock: Arc<ScenarioClock>,
    pub store: Option<TaskStore<ScenarioClock>>,
    pub tasks_by_title: HashMap<String, TaskId>,
}

impl ConflictWorld {
    /// Creates a world without a board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Arc::new(ScenarioClock::monday_morning()),
            store: None,
            tasks_by_title: HashMap::new(),
        }
    }

    /// Returns the board created by the background step.
    ///
    /// # Errors
    ///
    /// Returns an error if no board has been created yet.
    pub fn store_mut(&mut self) -> Result<&mut TaskStore<ScenarioClock>, eyre::Report> {
        self.store
            .as_mut()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Resolves a task title used in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no task with that title was created.
    pub fn task_id(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled {title:?} in scenario world"))
    }

    /// Looks up the current state of a task by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the board or the task is missing.
    pub fn task(&self, title: &str) -> Result<&Task, eyre::Report> {
        let task_id = self.task_id(title)?;
        self.store
            .as_ref()
            .and_then(|store| store.get_task(task_id))
            .ok_or_else(|| eyre::eyre!("task {title:?} is not on the board"))
    }
}

impl Default for ConflictWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ConflictWorld {
    ConflictWorld::default()
}
