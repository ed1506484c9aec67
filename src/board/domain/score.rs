//! Bounded conflict scores.

/// Share of a day's capacity consumed by the work due that day, capped at
/// one.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ConflictScore(f64);

impl ConflictScore {
    /// Score of a day with no contention.
    pub const NONE: Self = Self(0.0);
    /// Score of a day at or beyond capacity.
    pub const SATURATED: Self = Self(1.0);

    /// Creates a score, clamping the ratio into `[0, 1]`.
    ///
    /// `NaN` is treated as zero.
    #[must_use]
    pub const fn clamped(ratio: f64) -> Self {
        if ratio.is_nan() {
            return Self::NONE;
        }
        if ratio >= Self::SATURATED.0 {
            return Self::SATURATED;
        }
        Self(ratio.max(Self::NONE.0))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the risk band the score falls into.
    #[must_use]
    pub fn level(self) -> ConflictLevel {
        if self.0 < 0.4 {
            ConflictLevel::Low
        } else if self.0 < 0.7 {
            ConflictLevel::Moderate
        } else {
            ConflictLevel::High
        }
    }
}

/// Coarse risk band of a [`ConflictScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictLevel {
    /// Below 0.4.
    Low,
    /// From 0.4 up to 0.7.
    Moderate,
    /// 0.7 and above.
    High,
}

impl ConflictLevel {
    /// Returns the lowercase label used when displaying the band.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}
