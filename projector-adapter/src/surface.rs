use projector::{Rectangle, Screen};

/// Who moved the scroll position behind a raw scroll event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollSource {
    User,
    /// The event echoes a [`ScrollSurface::scroll_by`] or [`ScrollSurface::scroll_to`] call.
    Programmatic,
}

/// The scrolling viewport a list lives in.
///
/// All rectangles are in world coordinates (one shared space for the viewport and the list).
/// The host keeps the surface up to date with the real UI and forwards raw scroll events to
/// the controller, which asks [`Self::classify_scroll`] whether to react.
pub trait ScrollSurface {
    /// The visible area.
    fn viewport(&self) -> Rectangle;

    /// World top of the list container (where the movie's origin sits).
    fn movie_top(&self) -> f64;

    /// Scrolls the content by `delta`; positive moves the viewport further down the list.
    fn scroll_by(&mut self, delta: f64);

    /// Scrolls so that movie offset `movie_offset` sits at the top of the viewport.
    fn scroll_to(&mut self, movie_offset: f64);

    /// Classifies the most recent raw scroll event.
    ///
    /// An effective programmatic scroll produces one echo, as long as the user has not moved
    /// the position since. Hosts call this once per raw event they receive.
    fn classify_scroll(&mut self) -> ScrollSource;

    fn screen(&self) -> Screen {
        Screen::new(self.viewport(), self.movie_top())
    }
}

/// A scroll offset that remembers where its last programmatic move landed.
///
/// A raw scroll event is an echo only while the offset still sits on that target; a user move
/// in between (even one delivered in the same event) makes it a user scroll.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct ScrollPosition {
    offset: f64,
    programmatic_target: Option<f64>,
}

impl ScrollPosition {
    fn set_programmatic(&mut self, offset: f64) {
        let offset = clamp_offset(offset);
        if offset == self.offset {
            return;
        }
        self.offset = offset;
        self.programmatic_target = Some(offset);
    }

    fn set_user(&mut self, offset: f64) {
        let offset = clamp_offset(offset);
        if self.programmatic_target != Some(offset) {
            self.programmatic_target = None;
        }
        self.offset = offset;
    }

    fn classify(&mut self) -> ScrollSource {
        match self.programmatic_target.take() {
            Some(target) if target == self.offset => {
                ptrace!(offset = self.offset, "scroll echo consumed");
                ScrollSource::Programmatic
            }
            _ => ScrollSource::User,
        }
    }
}

fn clamp_offset(offset: f64) -> f64 {
    if offset > 0.0 { offset } else { 0.0 }
}

/// The whole window scrolls; the list sits at a fixed document offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowSurface {
    window_height: f64,
    list_offset: f64,
    scroll: ScrollPosition,
}

impl WindowSurface {
    pub fn new(window_height: f64, list_offset: f64) -> Self {
        Self {
            window_height,
            list_offset,
            scroll: ScrollPosition::default(),
        }
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll.offset
    }

    /// Records a scroll the user made.
    pub fn user_scroll_to(&mut self, scroll_y: f64) {
        self.scroll.set_user(scroll_y);
    }

    pub fn set_window_height(&mut self, window_height: f64) {
        self.window_height = window_height;
    }

    pub fn set_list_offset(&mut self, list_offset: f64) {
        self.list_offset = list_offset;
    }
}

impl ScrollSurface for WindowSurface {
    fn viewport(&self) -> Rectangle {
        Rectangle::new(self.scroll.offset, self.window_height)
    }

    fn movie_top(&self) -> f64 {
        self.list_offset
    }

    fn scroll_by(&mut self, delta: f64) {
        self.scroll.set_programmatic(self.scroll.offset + delta);
    }

    fn scroll_to(&mut self, movie_offset: f64) {
        self.scroll.set_programmatic(self.list_offset + movie_offset);
    }

    fn classify_scroll(&mut self) -> ScrollSource {
        self.scroll.classify()
    }
}

/// A scrolling element; the list sits inside its content at `content_offset`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementSurface {
    element_top: f64,
    height: f64,
    content_offset: f64,
    scroll: ScrollPosition,
}

impl ElementSurface {
    pub fn new(element_top: f64, height: f64, content_offset: f64) -> Self {
        Self {
            element_top,
            height,
            content_offset,
            scroll: ScrollPosition::default(),
        }
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll.offset
    }

    pub fn user_scroll_to(&mut self, scroll_top: f64) {
        self.scroll.set_user(scroll_top);
    }

    /// Updates the element's box after a layout change.
    pub fn set_bounds(&mut self, element_top: f64, height: f64) {
        self.element_top = element_top;
        self.height = height;
    }

    pub fn set_content_offset(&mut self, content_offset: f64) {
        self.content_offset = content_offset;
    }
}

impl ScrollSurface for ElementSurface {
    fn viewport(&self) -> Rectangle {
        Rectangle::new(self.element_top, self.height)
    }

    fn movie_top(&self) -> f64 {
        self.element_top + self.content_offset - self.scroll.offset
    }

    fn scroll_by(&mut self, delta: f64) {
        self.scroll.set_programmatic(self.scroll.offset + delta);
    }

    fn scroll_to(&mut self, movie_offset: f64) {
        self.scroll
            .set_programmatic(self.content_offset + movie_offset);
    }

    fn classify_scroll(&mut self) -> ScrollSource {
        self.scroll.classify()
    }
}
