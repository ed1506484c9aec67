//! Normalized canvas coordinates for graph nodes.

/// Position of a node on the graph canvas, normalized so that both axes are
/// expected to lie in `[0, 1]`.
///
/// The entity does not enforce the range; producers clamp before storing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPoint {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl LayoutPoint {
    /// Centre of the canvas.
    pub const CENTER: Self = Self::new(0.5, 0.5);

    /// Creates a point from raw coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the point with both axes clamped to `[min, max]`.
    ///
    /// A `NaN` axis is replaced by the canvas centre, itself clamped into
    /// the range, so the result is always finite.
    #[must_use]
    pub const fn clamped(self, min: f64, max: f64) -> Self {
        Self {
            x: clamp_axis(self.x, min, max),
            y: clamp_axis(self.y, min, max),
        }
    }

    /// Returns `true` when both axes lie in `[0, 1]`.
    #[must_use]
    pub fn is_normalized(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

const fn clamp_axis(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return LayoutPoint::CENTER.x.clamp(min, max);
    }
    value.clamp(min, max)
}

impl Default for LayoutPoint {
    fn default() -> Self {
        Self::CENTER
    }
}
