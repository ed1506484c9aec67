//! Given steps for conflict scoring BDD scenarios.

use std::sync::Arc;

use super::world::ConflictWorld;
use breakdown::board::{
    config::BoardConfig,
    domain::{Capacity, TaskPriority, TaskStep},
    services::{AddTaskRequest, TaskStore},
};
use chrono::{TimeDelta, TimeZone, Utc};
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given("a board with {weekday:i32} weekday minutes and {weekend:i32} weekend minutes")]
fn board_with_capacity(
    world: &mut ConflictWorld,
    weekday: i32,
    weekend: i32,
) -> Result<(), eyre::Report> {
    let config = BoardConfig::with_capacity(Capacity::new(weekday, weekend));
    let store = TaskStore::with_config(&config, Arc::clone(&world.clock))
        .wrap_err("create board for conflict scenario")?;
    world.store = Some(store);
    Ok(())
}

#[given(r#"a draft task "{title}" due on {day} estimated at {minutes:u32} minutes"#)]
fn draft_task_due_on(
    world: &mut ConflictWorld,
    title: String,
    day: String,
    minutes: u32,
) -> Result<(), eyre::Report> {
    let day_of_month = match day.as_str() {
        "Monday" => 3,
        "Saturday" => 8,
        other => return Err(eyre::eyre!("unsupported scenario day {other:?}")),
    };
    let due_at = Utc
        .with_ymd_and_hms(2025, 3, day_of_month, 17, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid due date for {day}"))?;

    let request = AddTaskRequest::new(title.clone(), TaskPriority::Medium)
        .with_due_at(Some(due_at))
        .with_estimated_minutes(minutes);
    let task_id = world
        .store_mut()?
        .add_task(request)
        .wrap_err("add task in conflict scenario")?;
    world.tasks_by_title.insert(title, task_id);
    world.clock.advance(TimeDelta::seconds(1));
    Ok(())
}

#[given(r#"the task "{title}" has a step "{step}" estimated at {minutes:u32} minutes"#)]
fn task_has_step(
    world: &mut ConflictWorld,
    title: String,
    step: String,
    minutes: u32,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    let new_step = TaskStep::new(step, 0)
        .with_estimated_minutes(minutes)
        .wrap_err("build step in conflict scenario")?;
    world.store_mut()?.add_step(task_id, new_step);
    Ok(())
}
