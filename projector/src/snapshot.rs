use core::fmt;

use crate::key::{FrameKey, IdIndexMap, index_ids};
use crate::{Frame, Movie, Rectangle, Slice};

/// An immutable record of one projection: the viewport, the frames, and the rendered slice.
///
/// Snapshots share frame storage with the movie they were captured from. Later movie
/// mutations build new storage, so a snapshot keeps describing the geometry that was on
/// screen when it was taken. Two snapshots (before and after a change) feed
/// [`crate::offset_correction`].
pub struct ProjectionSnapshot<K, C> {
    screen_rect: Rectangle,
    movie: Movie<K, C>,
    slice: Slice,
    rendered: IdIndexMap<K>,
}

impl<K: FrameKey, C> ProjectionSnapshot<K, C> {
    /// Captures `movie` as rendered through `slice`, with `screen_rect` relative to the movie.
    ///
    /// The slice is clamped to the movie's length.
    pub fn capture(movie: &Movie<K, C>, screen_rect: Rectangle, slice: Slice) -> Self {
        let slice = slice.clamp_to(movie.len());
        let rendered = index_ids(
            movie.frames()[slice.as_range()]
                .iter()
                .enumerate()
                .map(|(offset, frame)| (slice.start + offset, &frame.id)),
        );
        Self {
            screen_rect,
            movie: movie.clone(),
            slice,
            rendered,
        }
    }

    pub fn is_rendered(&self, id: &K) -> bool {
        self.rendered.contains_key(id)
    }

    /// Index of `id` in this snapshot's frames.
    pub fn index_of(&self, id: &K) -> Option<usize> {
        match self.rendered.get(id) {
            Some(&index) => Some(index),
            None => self.movie.index_of(id),
        }
    }

    pub fn frame_rect(&self, id: &K) -> Option<Rectangle> {
        let index = self.index_of(id)?;
        self.movie.frame(index).map(|frame| frame.rect)
    }
}

impl<K, C> ProjectionSnapshot<K, C> {
    /// The viewport, relative to the movie.
    pub fn screen_rect(&self) -> Rectangle {
        self.screen_rect
    }

    pub fn slice(&self) -> Slice {
        self.slice
    }

    pub fn movie(&self) -> &Movie<K, C> {
        &self.movie
    }

    pub fn frames(&self) -> &[Frame<K, C>] {
        self.movie.frames()
    }

    pub fn rendered_frames(&self) -> &[Frame<K, C>] {
        &self.movie.frames()[self.slice.as_range()]
    }

    /// The rectangle spanning the whole list.
    pub fn list_rect(&self) -> Rectangle {
        self.movie.rect()
    }

    /// Rendered frames that intersect the viewport.
    pub fn visible_frames(&self) -> impl Iterator<Item = &Frame<K, C>> + '_ {
        let screen_rect = self.screen_rect;
        self.rendered_frames()
            .iter()
            .filter(move |frame| frame.rect.intersects(&screen_rect))
    }
}

impl<K: Clone, C> Clone for ProjectionSnapshot<K, C> {
    fn clone(&self) -> Self {
        Self {
            screen_rect: self.screen_rect,
            movie: self.movie.clone(),
            slice: self.slice,
            rendered: self.rendered.clone(),
        }
    }
}

impl<K, C> fmt::Debug for ProjectionSnapshot<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectionSnapshot")
            .field("screen_rect", &self.screen_rect)
            .field("slice", &self.slice)
            .field("movie", &self.movie)
            .finish_non_exhaustive()
    }
}
