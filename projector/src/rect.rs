/// An immutable vertical interval: `[top, top + height)`.
///
/// Rectangles are plain values. Any geometry change builds a new one, so a rectangle that
/// was captured in a [`crate::ProjectionSnapshot`] never changes behind the snapshot's back.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    top: f64,
    height: f64,
}

impl Rectangle {
    /// Creates a rectangle. Negative or NaN heights collapse to zero.
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: if height >= 0.0 { height } else { 0.0 },
        }
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn with_top(&self, top: f64) -> Self {
        Self::new(top, self.height)
    }

    pub fn with_height(&self, height: f64) -> Self {
        Self::new(self.top, height)
    }

    /// Moves the rectangle down by `dy` (up when negative).
    pub fn translate_by(&self, dy: f64) -> Self {
        Self::new(self.top + dy, self.height)
    }

    /// Re-expresses the rectangle relative to an origin given in the same coordinate space.
    pub fn relative_to(&self, origin_top: f64) -> Self {
        Self::new(self.top - origin_top, self.height)
    }

    /// Returns `true` when `y` lies in `[top, bottom)`.
    pub fn contains(&self, y: f64) -> bool {
        is_between(y, self.top, self.bottom())
    }

    /// Returns `true` when `other` lies entirely inside this rectangle.
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        other.top >= self.top && other.bottom() <= self.bottom()
    }

    /// Returns `true` when either rectangle's top lies inside the other one.
    ///
    /// Edges are half-open, so rectangles that merely touch do not intersect.
    pub fn intersects(&self, other: &Rectangle) -> bool {
        is_between(self.top, other.top, other.bottom())
            || is_between(other.top, self.top, self.bottom())
    }
}

fn is_between(value: f64, begin: f64, end: f64) -> bool {
    value >= begin && value < end
}
