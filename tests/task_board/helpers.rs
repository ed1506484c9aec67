//! Shared test helpers for task board integration tests.

use std::sync::{Arc, Mutex};

use breakdown::board::{
    domain::{TaskId, TaskPriority},
    services::{AddTaskRequest, TaskStore},
};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Clock that only moves when a test advances it.
pub struct SteppedClock {
    now: Mutex<DateTime<Utc>>,
}

impl SteppedClock {
    /// Creates a clock reading the given instant.
    #[must_use]
    pub const fn at(now: DateTime<Utc>) -> Self {
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

impl Clock for SteppedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// Store type used across board integration tests.
pub type TestStore = TaskStore<SteppedClock>;

/// A store together with the clock that drives it.
pub struct Board {
    pub clock: Arc<SteppedClock>,
    pub store: TestStore,
}

/// Returns 2025-03-03 (a Monday) at the given hour, UTC.
///
/// # Panics
///
/// Panics if `hour` is not a valid hour of the day.
#[must_use]
pub fn monday_at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Provides an empty board whose clock reads Monday 08:00 UTC.
#[fixture]
pub fn board() -> Board {
    let clock = Arc::new(SteppedClock::at(monday_at(8)));
    let store = TaskStore::new(Arc::clone(&clock));
    Board { clock, store }
}

/// Adds a medium priority task and returns its identifier.
///
/// # Errors
///
/// Returns an error if the store rejects the task.
pub fn add_task(
    board: &mut Board,
    title: &str,
    due_at: Option<DateTime<Utc>>,
    minutes: u32,
) -> Result<TaskId, eyre::Report> {
    let task_id = board.store.add_task(
        AddTaskRequest::new(title, TaskPriority::Medium)
            .with_due_at(due_at)
            .with_estimated_minutes(minutes),
    )?;
    Ok(task_id)
}
