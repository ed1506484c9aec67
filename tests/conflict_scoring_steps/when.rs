//! When steps for conflict scoring BDD scenarios.

use super::world::ConflictWorld;
use breakdown::board::{domain::Capacity, services::DEFAULT_DEBOUNCE_MILLIS};
use chrono::TimeDelta;
use rstest_bdd_macros::when;

#[when(r#"the task "{title}" is marked completed"#)]
fn task_marked_completed(world: &mut ConflictWorld, title: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id(&title)?;
    world.store_mut()?.mark_completed(task_id);
    Ok(())
}

#[when("the weekday capacity changes to {minutes:i32} minutes")]
fn weekday_capacity_changes(world: &mut ConflictWorld, minutes: i32) -> Result<(), eyre::Report> {
    let store = world.store_mut()?;
    let weekend = store.capacity().weekend_minutes;
    store.set_capacity(Capacity::new(minutes, weekend));
    Ok(())
}

#[when("the quiet period elapses")]
fn quiet_period_elapses(world: &mut ConflictWorld) -> Result<(), eyre::Report> {
    world
        .clock
        .advance(TimeDelta::milliseconds(i64::from(DEFAULT_DEBOUNCE_MILLIS)));
    let ran = world.store_mut()?.poll_scheduled_recompute();
    eyre::ensure!(ran, "expected the debounced recompute to run");
    Ok(())
}
