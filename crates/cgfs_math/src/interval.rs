/// A range of ray parameters `t`.
///
/// Ray hits are accepted with [`Interval::surrounds`], the open test, so the
/// bounds themselves never count as hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Open-ended interval `(min, +inf)`.
    pub fn from_min(min: f32) -> Self {
        Self::new(min, f32::INFINITY)
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    ///
    /// NaN and infinite roots never pass, which is how degenerate
    /// intersections are filtered out.
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }
}
