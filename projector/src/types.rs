/// A half-open index range `[start, end)` into a movie's frames.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slice {
    pub start: usize,
    pub end: usize, // exclusive
}

impl Slice {
    pub const EMPTY: Slice = Slice { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Clamps both ends to `len`.
    pub fn clamp_to(&self, len: usize) -> Self {
        let end = self.end.min(len);
        Self {
            start: self.start.min(end),
            end,
        }
    }

    pub fn as_range(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }
}

/// Space standing in for the frames that are not mounted.
///
/// Hosts apply these as padding (or spacer items) around the rendered slice so that the
/// scrollable extent matches the whole movie.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlankSpace {
    pub above: f64,
    pub below: f64,
}

/// What the host needs to render one pass: the slice to mount and its blank space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderPlan {
    pub slice: Slice,
    pub blank_space: BlankSpace,
}
