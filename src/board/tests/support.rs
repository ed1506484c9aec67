//! Shared fixtures for board unit tests.

use crate::board::domain::{Task, TaskDraft, TaskPriority, TaskStep};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock poisoned")
    }
}

/// 2025-03-03 is a Monday.
pub fn monday_at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// 2025-03-08 is a Saturday.
pub fn saturday_at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 8, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn task_due(
    title: &str,
    due_at: Option<DateTime<Utc>>,
    minutes: u32,
    clock: &ManualClock,
) -> Task {
    let draft = TaskDraft::new(title)
        .expect("valid title")
        .with_due_at(due_at)
        .with_priority(TaskPriority::Medium)
        .with_estimated_minutes(minutes)
        .expect("positive estimate");
    Task::from_draft(draft, clock)
}

pub fn step(title: &str, minutes: u32) -> TaskStep {
    TaskStep::new(title, 0)
        .with_estimated_minutes(minutes)
        .expect("positive estimate")
}
