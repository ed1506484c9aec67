//! Configuration for the task board store.

use crate::board::{
    domain::{Capacity, WorkCalendar},
    services::{DEFAULT_DEBOUNCE_MILLIS, DEFAULT_HISTORY_LIMIT},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of unread notifications buffered per subscriber.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 64;

/// Store configuration.
///
/// Every field has a default, so partial JSON documents load.
///
/// # Examples
///
/// ```
/// use breakdown::board::config::BoardConfig;
///
/// let config = BoardConfig::from_json_str(r#"{ "capacity": { "weekday_minutes": 240 } }"#)
///     .expect("valid configuration");
/// assert_eq!(config.capacity.weekday_minutes, 240);
/// assert_eq!(config.capacity.weekend_minutes, 300);
/// assert_eq!(config.debounce_millis, 300);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Minutes of work available per weekday and weekend day.
    pub capacity: Capacity,
    /// Quiet period after a capacity change before scores are recomputed.
    pub debounce_millis: u32,
    /// Undo steps kept per task graph.
    pub history_limit: usize,
    /// Offset east of UTC, in minutes, that defines where days start.
    pub utc_offset_minutes: i32,
    /// Notifications buffered for a subscriber that falls behind.
    pub notification_capacity: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            capacity: Capacity::default(),
            debounce_millis: DEFAULT_DEBOUNCE_MILLIS,
            history_limit: DEFAULT_HISTORY_LIMIT,
            utc_offset_minutes: 0,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }
}

impl BoardConfig {
    /// Creates the default configuration with a custom capacity.
    #[must_use]
    pub fn with_capacity(capacity: Capacity) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Parses a configuration from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardConfigError::Malformed`] when the document cannot be
    /// parsed and [`BoardConfigError::InvalidUtcOffset`] when the offset is
    /// outside ±24 hours.
    pub fn from_json_str(json: &str) -> Result<Self, BoardConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.calendar()?;
        Ok(config)
    }

    /// Returns the calendar described by the configured offset.
    ///
    /// # Errors
    ///
    /// Returns [`BoardConfigError::InvalidUtcOffset`] when the offset is
    /// outside ±24 hours.
    pub fn calendar(&self) -> Result<WorkCalendar, BoardConfigError> {
        WorkCalendar::with_offset_minutes(self.utc_offset_minutes)
            .ok_or(BoardConfigError::InvalidUtcOffset(self.utc_offset_minutes))
    }
}

/// Errors returned while loading or applying configuration.
#[derive(Debug, Error)]
pub enum BoardConfigError {
    /// The configuration document could not be parsed.
    #[error("malformed board configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The UTC offset does not describe a valid time zone.
    #[error("invalid UTC offset of {0} minutes")]
    InvalidUtcOffset(i32),
}
