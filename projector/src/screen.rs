use crate::Rectangle;

/// The viewport, in world coordinates and in the movie's coordinates.
///
/// World coordinates are whatever the host measures the viewport in (client space for a
/// browser, terminal rows for a TUI). The movie-relative rect is what the projector works
/// with.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Screen {
    rect_relative_to_world: Rectangle,
    rect_relative_to_movie: Rectangle,
}

impl Screen {
    /// Builds a screen from the viewport's world rectangle and the movie's world top.
    pub fn new(viewport: Rectangle, movie_world_top: f64) -> Self {
        Self {
            rect_relative_to_world: viewport,
            rect_relative_to_movie: viewport.relative_to(movie_world_top),
        }
    }

    pub fn rect_relative_to_world(&self) -> Rectangle {
        self.rect_relative_to_world
    }

    pub fn rect_relative_to_movie(&self) -> Rectangle {
        self.rect_relative_to_movie
    }

    /// World top of the movie this screen was computed against.
    pub fn movie_world_top(&self) -> f64 {
        self.rect_relative_to_world.top() - self.rect_relative_to_movie.top()
    }
}
