/// 2D point / velocity in playfield units.
///
/// Fields are public; callers mutate `x` and `y` directly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2D {
    pub x: f64,
    pub y: f64,
}

impl Vector2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Velocity with the same magnitude on both axes.
    pub const fn of_scalar(value: f64) -> Self {
        Self { x: value, y: value }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Vector2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}
