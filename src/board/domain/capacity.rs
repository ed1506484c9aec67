//! Daily work capacity and the calendar used to bucket work into days.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Minutes of work available per day.
///
/// Values are signed so that a degenerate configuration (zero or negative
/// minutes) can be represented; days with such a capacity receive no score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Capacity {
    /// Minutes available Monday through Friday.
    pub weekday_minutes: i32,
    /// Minutes available on Saturday and Sunday.
    pub weekend_minutes: i32,
}

impl Capacity {
    /// Creates a capacity model.
    #[must_use]
    pub const fn new(weekday_minutes: i32, weekend_minutes: i32) -> Self {
        Self {
            weekday_minutes,
            weekend_minutes,
        }
    }

    /// Returns the minutes available on `day`.
    #[must_use]
    pub fn minutes_on(self, day: NaiveDate) -> i32 {
        if WorkCalendar::is_weekend(day) {
            self.weekend_minutes
        } else {
            self.weekday_minutes
        }
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::new(180, 300)
    }
}

/// Calendar that maps instants onto local days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkCalendar {
    offset: FixedOffset,
}

impl WorkCalendar {
    /// Calendar whose days start at midnight UTC.
    #[must_use]
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Calendar for a fixed offset east of UTC, in minutes.
    ///
    /// Returns `None` when the offset is outside ±24 hours.
    #[must_use]
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        let seconds = minutes.checked_mul(60)?;
        FixedOffset::east_opt(seconds).map(|offset| Self { offset })
    }

    /// Returns the calendar's offset from UTC.
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Returns the local day containing `instant`.
    #[must_use]
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Returns `true` for Saturdays and Sundays.
    #[must_use]
    pub fn is_weekend(day: NaiveDate) -> bool {
        matches!(day.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

impl Default for WorkCalendar {
    fn default() -> Self {
        Self::utc()
    }
}
