//! Day-level workload contention scoring.

use crate::board::domain::{Capacity, ConflictScore, Task, TaskId, TaskStatus, WorkCalendar};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;

/// Scores every open task by how much of its anchor day's capacity the
/// day's total workload consumes.
///
/// A task's anchor day is the calendar day of its due date, or of
/// `reference` when it has none. All tasks anchored on the same day share
/// one workload, so they receive the same score. Completed tasks are
/// skipped, and tasks on a day whose capacity is zero or negative get no
/// entry: the risk is undefined rather than nil.
///
/// # Examples
///
/// ```
/// use breakdown::board::domain::{Capacity, WorkCalendar};
/// use breakdown::board::services::calculate_scores;
/// use chrono::Utc;
///
/// let scores = calculate_scores(&[], &WorkCalendar::utc(), Capacity::default(), Utc::now());
/// assert!(scores.is_empty());
/// ```
#[must_use]
pub fn calculate_scores(
    tasks: &[Task],
    calendar: &WorkCalendar,
    capacity: Capacity,
    reference: DateTime<Utc>,
) -> HashMap<TaskId, ConflictScore> {
    let anchored: Vec<(TaskId, NaiveDate, u32)> = tasks
        .iter()
        .filter(|task| task.status() != TaskStatus::Completed)
        .map(|task| {
            let anchor = task.due_at().unwrap_or(reference);
            (task.id(), calendar.day_of(anchor), task.total_estimated_minutes())
        })
        .collect();

    let mut workload_by_day: HashMap<NaiveDate, u32> = HashMap::new();
    for (_, day, minutes) in &anchored {
        let workload = workload_by_day.entry(*day).or_default();
        *workload = workload.saturating_add(*minutes);
    }

    anchored
        .into_iter()
        .filter_map(|(task_id, day, _)| {
            let available = capacity.minutes_on(day);
            if available <= 0 {
                return None;
            }
            let workload = workload_by_day.get(&day).copied().unwrap_or_default();
            Some((task_id, ConflictScore::clamped(ratio(workload, available))))
        })
        .collect()
}

#[expect(clippy::float_arithmetic, reason = "a score is a ratio of minutes")]
fn ratio(workload: u32, available: i32) -> f64 {
    f64::from(workload) / f64::from(available)
}
