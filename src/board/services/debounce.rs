//! Cooperative debounce timer.

use chrono::{DateTime, TimeDelta, Utc};

/// Quiet period used for capacity changes unless configured otherwise.
pub const DEFAULT_DEBOUNCE_MILLIS: u32 = 300;

/// A cancellable deadline that collapses bursts of triggers into one firing.
///
/// The timer never runs anything on its own. Its owner polls it from the
/// thread that owns the debounced state, so dropping the owner also drops
/// any pending firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceTimer {
    delay: TimeDelta,
    deadline: Option<DateTime<Utc>>,
}

impl DebounceTimer {
    /// Creates an idle timer with the given quiet period.
    #[must_use]
    pub fn new(delay_millis: u32) -> Self {
        Self {
            delay: TimeDelta::milliseconds(i64::from(delay_millis)),
            deadline: None,
        }
    }

    /// Returns the quiet period.
    #[must_use]
    pub const fn delay(&self) -> TimeDelta {
        self.delay
    }

    /// Returns the pending deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns `true` while a firing is pending.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// (Re)starts the quiet period from `now`, replacing any earlier
    /// deadline.
    pub fn schedule(&mut self, now: DateTime<Utc>) {
        self.deadline = Some(now.checked_add_signed(self.delay).unwrap_or(now));
    }

    /// Drops the pending deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Consumes the deadline if it has passed at `now`.
    ///
    /// Returns `true` exactly once per scheduled quiet period.
    pub fn fire_if_due(&mut self, now: DateTime<Utc>) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for DebounceTimer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_MILLIS)
    }
}
