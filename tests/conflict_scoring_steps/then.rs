//! Then steps for conflict scoring BDD scenarios.

use super::world::ConflictWorld;
use rstest_bdd_macros::then;

#[then(r#"the conflict score of "{title}" is {expected:f64}"#)]
fn conflict_score_is(world: &ConflictWorld, title: String, expected: f64) -> Result<(), eyre::Report> {
    let score = world
        .task(&title)?
        .conflict_score()
        .ok_or_else(|| eyre::eyre!("task {title:?} has no conflict score"))?;

    if score.value().total_cmp(&expected).is_ne() {
        return Err(eyre::eyre!(
            "expected conflict score {expected} for {title:?}, found {}",
            score.value()
        ));
    }
    Ok(())
}

#[then(r#"the conflict level of "{title}" is "{level}""#)]
fn conflict_level_is(world: &ConflictWorld, title: String, level: String) -> Result<(), eyre::Report> {
    let score = world
        .task(&title)?
        .conflict_score()
        .ok_or_else(|| eyre::eyre!("task {title:?} has no conflict score"))?;

    let actual = score.level().as_str();
    eyre::ensure!(
        actual == level,
        "expected conflict level {level} for {title:?}, found {actual}"
    );
    Ok(())
}

#[then(r#"the task "{title}" has no conflict score"#)]
fn task_has_no_conflict_score(world: &ConflictWorld, title: String) -> Result<(), eyre::Report> {
    let task = world.task(&title)?;
    if let Some(score) = task.conflict_score() {
        return Err(eyre::eyre!(
            "expected no conflict score for {title:?}, found {}",
            score.value()
        ));
    }
    eyre::ensure!(
        task.conflict_calculated_at().is_some(),
        "task {title:?} was never scored"
    );
    Ok(())
}
