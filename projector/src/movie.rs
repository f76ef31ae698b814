use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::key::{FrameKey, IdIndexMap, index_ids};
use crate::{BlankSpace, Frame, MovieError, Rectangle, Slice};

/// The ordered geometry of every item in a list, rendered or not.
///
/// Frames are laid out contiguously from the movie's origin:
/// `frames[i].rect.top() == frames[i - 1].rect.bottom()`. Heights start out as the movie's
/// `assumed_height` and are replaced as the host reports measurements.
///
/// A `Movie` is a value. Every mutation returns a new movie and leaves the receiver alone;
/// frame storage is shared behind an `Arc`, so cloning a movie (or capturing it in a
/// [`crate::ProjectionSnapshot`]) is cheap.
pub struct Movie<K, C> {
    assumed_height: f64,
    frames: Arc<[Frame<K, C>]>,
}

/// The result of [`Movie::update_heights`].
#[derive(Clone, Debug)]
pub struct HeightUpdate<K, C> {
    /// Sum of `measured - previous` over every frame whose height changed.
    ///
    /// Positive when items rendered taller than the movie assumed.
    pub height_error: f64,
    pub movie: Movie<K, C>,
}

impl<K, C> Clone for Movie<K, C> {
    fn clone(&self) -> Self {
        Self {
            assumed_height: self.assumed_height,
            frames: Arc::clone(&self.frames),
        }
    }
}

impl<K, C> fmt::Debug for Movie<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Movie")
            .field("assumed_height", &self.assumed_height)
            .field("len", &self.frames.len())
            .field("total_height", &self.total_height())
            .finish_non_exhaustive()
    }
}

impl<K, C> Movie<K, C> {
    /// Creates an empty movie.
    ///
    /// A negative or non-finite `assumed_height` is replaced with `0`.
    pub fn new(assumed_height: f64) -> Self {
        let assumed_height = if assumed_height.is_finite() && assumed_height >= 0.0 {
            assumed_height
        } else {
            pwarn!(assumed_height, "Movie::new: invalid assumed height, using 0");
            0.0
        };
        Self {
            assumed_height,
            frames: Arc::from(Vec::new()),
        }
    }

    pub fn assumed_height(&self) -> f64 {
        self.assumed_height
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[Frame<K, C>] {
        &self.frames
    }

    pub fn frame(&self, index: usize) -> Option<&Frame<K, C>> {
        self.frames.get(index)
    }

    /// Returns `true` when both movies share the same frame storage.
    pub fn shares_frames_with(&self, other: &Movie<K, C>) -> bool {
        Arc::ptr_eq(&self.frames, &other.frames)
    }

    /// Top of the first frame, or `0` for an empty movie.
    pub fn origin(&self) -> f64 {
        self.frames.first().map_or(0.0, Frame::top)
    }

    pub fn total_height(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.bottom() - first.top(),
            _ => 0.0,
        }
    }

    /// The rectangle spanning every frame. Empty movies yield a zero rectangle at the origin.
    pub fn rect(&self) -> Rectangle {
        Rectangle::new(self.origin(), self.total_height())
    }

    /// Computes the blank space standing in for the frames outside `slice`.
    ///
    /// `above + below + rendered height` always equals [`Self::total_height`]. An empty movie
    /// has no blank space; an empty slice puts the whole movie above or below its position.
    pub fn blank_space(&self, slice: Slice) -> BlankSpace {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return BlankSpace::default();
        };
        let slice = slice.clamp_to(self.frames.len());
        let rendered_top = self.frames.get(slice.start).map_or(last.bottom(), Frame::top);
        let rendered_bottom = if slice.is_empty() {
            rendered_top
        } else {
            self.frames[slice.end - 1].bottom()
        };
        BlankSpace {
            above: rendered_top - first.top(),
            below: last.bottom() - rendered_bottom,
        }
    }

    fn with_frames(&self, frames: Vec<Frame<K, C>>) -> Self {
        Self {
            assumed_height: self.assumed_height,
            frames: Arc::from(frames),
        }
    }
}

impl<K: FrameKey, C> Movie<K, C> {
    /// Returns the index of the frame with `id`, if any.
    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.frames.iter().position(|frame| &frame.id == id)
    }

    pub(crate) fn id_index(&self) -> IdIndexMap<K> {
        index_ids(self.frames.iter().enumerate().map(|(i, frame)| (i, &frame.id)))
    }
}

impl<K: FrameKey, C: Clone> Movie<K, C> {
    /// Builds a fresh movie (same assumed height) from `items`, laid out from top `0`.
    ///
    /// Each frame takes `height_of(id)` when it returns `Some`, and the assumed height
    /// otherwise. This is how previously measured heights survive a full rebuild.
    pub fn layout(
        &self,
        items: impl IntoIterator<Item = (K, C)>,
        mut height_of: impl FnMut(&K) -> Option<f64>,
    ) -> Result<Self, MovieError> {
        let items = items.into_iter();
        let mut frames = Vec::with_capacity(items.size_hint().0);
        let mut top = 0.0;
        for (index, (id, content)) in items.enumerate() {
            let height = match height_of(&id) {
                Some(height) => validate_height(index, height)?,
                None => self.assumed_height,
            };
            let rect = Rectangle::new(top, height);
            top = rect.bottom();
            frames.push(Frame::new(id, content, rect));
        }
        check_unique_ids(&frames)?;
        pdebug!(len = frames.len(), total_height = top, "Movie::layout");
        Ok(self.with_frames(frames))
    }

    /// Returns a movie with `items` inserted before the existing frames.
    ///
    /// New frames are unmeasured and take the assumed height. Existing frames keep their
    /// heights and are shifted down to start where the new block ends.
    pub fn prefix_frames(&self, items: impl IntoIterator<Item = (K, C)>) -> Result<Self, MovieError> {
        let mut frames = Vec::new();
        let mut top = 0.0;
        for (id, content) in items {
            let rect = Rectangle::new(top, self.assumed_height);
            top = rect.bottom();
            frames.push(Frame::new(id, content, rect));
        }
        if frames.is_empty() {
            return Ok(self.clone());
        }

        frames.reserve(self.frames.len());
        for frame in self.frames.iter() {
            let rect = frame.rect.with_top(top);
            top = rect.bottom();
            frames.push(Frame::new(frame.id.clone(), frame.content.clone(), rect));
        }
        check_unique_ids(&frames)?;
        pdebug!(
            added = frames.len() - self.frames.len(),
            len = frames.len(),
            "Movie::prefix_frames"
        );
        Ok(self.with_frames(frames))
    }

    /// Returns a movie with `items` appended after the existing frames.
    ///
    /// Existing rectangles are untouched; new frames take the assumed height.
    pub fn append_frames(&self, items: impl IntoIterator<Item = (K, C)>) -> Result<Self, MovieError> {
        let mut frames: Vec<Frame<K, C>> = self.frames.to_vec();
        let existing = frames.len();
        let mut top = frames.last().map_or(0.0, Frame::bottom);
        for (id, content) in items {
            let rect = Rectangle::new(top, self.assumed_height);
            top = rect.bottom();
            frames.push(Frame::new(id, content, rect));
        }
        if frames.len() == existing {
            return Ok(self.clone());
        }
        check_unique_ids(&frames)?;
        pdebug!(
            added = frames.len() - existing,
            len = frames.len(),
            "Movie::append_frames"
        );
        Ok(self.with_frames(frames))
    }

    /// Applies measured heights keyed by frame index.
    ///
    /// Entries are applied in index order. Every frame after a changed one is shifted so the
    /// movie stays contiguous. Out-of-range indexes are ignored, whatever height they carry. A
    /// negative or non-finite height for an existing frame rejects the whole update.
    ///
    /// When nothing changes the returned movie shares storage with `self` and the error is
    /// exactly `0`.
    pub fn update_heights(
        &self,
        measured: impl IntoIterator<Item = (usize, f64)>,
    ) -> Result<HeightUpdate<K, C>, MovieError> {
        let mut entries = Vec::new();
        for (index, height) in measured {
            if index >= self.frames.len() {
                pwarn!(
                    index,
                    len = self.frames.len(),
                    "update_heights: index out of range, ignored"
                );
                continue;
            }
            entries.push((index, validate_height(index, height)?));
        }
        entries.sort_by_key(|&(index, _)| index);
        Ok(self.apply_heights(&entries))
    }

    /// Same as [`Self::update_heights`], keyed by frame id. Unknown ids are ignored.
    pub fn update_heights_by_id(
        &self,
        measured: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<HeightUpdate<K, C>, MovieError> {
        let index = self.id_index();
        let mut entries = Vec::new();
        for (id, height) in measured {
            let Some(&i) = index.get(&id) else {
                ptrace!("update_heights_by_id: unknown id, ignored");
                continue;
            };
            entries.push((i, validate_height(i, height)?));
        }
        entries.sort_by_key(|&(index, _)| index);
        Ok(self.apply_heights(&entries))
    }

    fn apply_heights(&self, entries: &[(usize, f64)]) -> HeightUpdate<K, C> {
        let mut height_error = 0.0;
        let mut heights: Option<Vec<f64>> = None;
        for &(index, height) in entries {
            let current = match &heights {
                Some(heights) => heights[index],
                None => self.frames[index].height(),
            };
            if current == height {
                continue;
            }
            height_error += height - current;
            heights.get_or_insert_with(|| self.frames.iter().map(Frame::height).collect())[index] =
                height;
        }

        let Some(heights) = heights else {
            return HeightUpdate {
                height_error: 0.0,
                movie: self.clone(),
            };
        };

        let mut top = self.origin();
        let frames = self
            .frames
            .iter()
            .zip(heights)
            .map(|(frame, height)| {
                let rect = Rectangle::new(top, height);
                top = rect.bottom();
                Frame::new(frame.id.clone(), frame.content.clone(), rect)
            })
            .collect();
        pdebug!(
            height_error,
            measured = entries.len(),
            "Movie::update_heights"
        );
        HeightUpdate {
            height_error,
            movie: self.with_frames(frames),
        }
    }
}

fn validate_height(index: usize, height: f64) -> Result<f64, MovieError> {
    if height.is_finite() && height >= 0.0 {
        Ok(height)
    } else {
        Err(MovieError::InvalidHeight { index, height })
    }
}

fn check_unique_ids<K: FrameKey, C>(frames: &[Frame<K, C>]) -> Result<(), MovieError> {
    let mut seen = IdIndexMap::<K>::new();
    for (index, frame) in frames.iter().enumerate() {
        if let Some(first) = seen.insert(frame.id.clone(), index) {
            pwarn!(first, index, "duplicate frame id");
            return Err(MovieError::DuplicateId { first, index });
        }
    }
    Ok(())
}
