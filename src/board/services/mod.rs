//! Application services for conflict scoring and board orchestration.

mod conflict;
mod debounce;
mod history;
pub mod store;

pub use conflict::calculate_scores;
pub use debounce::{DEFAULT_DEBOUNCE_MILLIS, DebounceTimer};
pub use history::{DEFAULT_HISTORY_LIMIT, GraphHistory, GraphHistoryRegistry};
pub use store::{AddTaskRequest, BoardViews, TaskStore};
