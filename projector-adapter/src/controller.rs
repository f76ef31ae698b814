use alloc::vec::Vec;

use projector::{
    DriftCorrector, EdgeEvent, EdgeTrigger, Frame, FrameKey, Movie, MovieError,
    ProjectionSnapshot, ProjectorOptions, PulseDriver, RenderPlan, Scheduler, Slice,
    map_old_slice_into_new_movie, measure_slice, offset_correction, project,
};

use crate::key::CacheKey;
use crate::{HeightCache, ScrollSource, ScrollSurface};

/// What a drive pulse produced.
#[derive(Clone, Debug, PartialEq)]
pub struct PulseOutcome {
    /// The slice the host should render now.
    pub plan: RenderPlan,
    /// Edge zones the viewport entered since the previous pulse.
    pub edge_events: Vec<EdgeEvent>,
}

/// What a measurement pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MeasureOutcome {
    pub height_error: f64,
    /// The delta passed to [`ScrollSurface::scroll_by`], or `0` when nothing was scrolled.
    pub scroll_correction: f64,
    /// A new projection was requested from the driver.
    pub reprojection_scheduled: bool,
}

/// A framework-neutral controller for one projected list.
///
/// It owns the list geometry and drives the render loop. The host wires it up as follows:
/// - forward raw scroll and resize events to [`Self::on_scroll`] / [`Self::on_resize`]
/// - call [`Self::on_pulse`] whenever the driver's requested pulse fires, and render the
///   returned plan
/// - after rendering, call [`Self::on_measured`] with a closure that reports how tall each
///   mounted item came out
/// - replace or grow the list with [`Self::set_items`], [`Self::prepend`] and [`Self::append`],
///   then render the returned plan and measure as usual
///
/// Measurements are anchored: when they (or a list change) move the items the user is looking
/// at, the controller scrolls the surface by the same amount so nothing visibly jumps.
#[derive(Debug)]
pub struct Controller<K, C, S, D> {
    options: ProjectorOptions,
    surface: S,
    driver: D,
    movie: Movie<K, C>,
    slice: Slice,
    heights: HeightCache<K>,
    scheduler: Scheduler,
    drift: DriftCorrector,
    edges: EdgeTrigger,
    /// Geometry as of the last projection (or list change), awaiting measurement.
    before: Option<ProjectionSnapshot<K, C>>,
    identity_changed: bool,
    detached: bool,
}

impl<K, C, S, D> Controller<K, C, S, D>
where
    K: FrameKey + CacheKey,
    C: Clone,
    S: ScrollSurface,
    D: PulseDriver,
{
    /// Creates a controller for an empty list.
    pub fn new(options: ProjectorOptions, surface: S, driver: D) -> Self {
        Self {
            movie: Movie::new(options.assumed_height),
            slice: Slice::EMPTY,
            heights: HeightCache::new(),
            scheduler: Scheduler::new(),
            drift: DriftCorrector::new(options.reproject_threshold),
            edges: EdgeTrigger::new(&options),
            before: None,
            identity_changed: false,
            detached: false,
            options,
            surface,
            driver,
        }
    }

    pub fn options(&self) -> &ProjectorOptions {
        &self.options
    }

    pub fn movie(&self) -> &Movie<K, C> {
        &self.movie
    }

    pub fn slice(&self) -> Slice {
        self.slice
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for hosts that keep the surface in sync with the real UI.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn heights(&self) -> &HeightCache<K> {
        &self.heights
    }

    pub fn heights_mut(&mut self) -> &mut HeightCache<K> {
        &mut self.heights
    }

    pub fn is_pulse_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// The slice to render plus the blank space standing in for everything else.
    pub fn render_plan(&self) -> RenderPlan {
        RenderPlan {
            slice: self.slice,
            blank_space: self.movie.blank_space(self.slice),
        }
    }

    /// Handles a raw scroll event. Returns `true` when it was a user scroll.
    ///
    /// Echoes of the controller's own corrections are ignored.
    pub fn on_scroll(&mut self) -> bool {
        if self.detached {
            return false;
        }
        match self.surface.classify_scroll() {
            ScrollSource::Programmatic => false,
            ScrollSource::User => {
                self.scheduler.trigger(&mut self.driver);
                true
            }
        }
    }

    pub fn on_resize(&mut self) {
        if self.detached {
            return;
        }
        self.scheduler.trigger(&mut self.driver);
    }

    /// Runs the recompute for a fired pulse.
    ///
    /// Returns `None` when no recompute was pending, or when a list change still awaits its
    /// measurement (the recompute is requested again once [`Self::on_measured`] ran).
    pub fn on_pulse(&mut self) -> Option<PulseOutcome> {
        if self.detached || !self.scheduler.begin_pulse() {
            return None;
        }
        if self.identity_changed {
            ptrace!("on_pulse: list change awaiting measurement, deferred");
            return None;
        }

        let screen = self.surface.screen();
        let viewport = screen.rect_relative_to_movie();
        self.slice = project(&self.movie, &screen, self.options.buffer_ratio);
        self.before = Some(ProjectionSnapshot::capture(
            &self.movie,
            viewport,
            self.slice,
        ));

        let mut edge_events = Vec::new();
        self.edges.observe(
            self.movie.rect(),
            viewport,
            self.movie.len(),
            |event| edge_events.push(event),
        );

        Some(PulseOutcome {
            plan: self.render_plan(),
            edge_events,
        })
    }

    /// Folds the rendered heights of the mounted items back into the list.
    ///
    /// `measure(index, frame)` reports how tall the mounted item at `index` rendered. When the
    /// list changed, or the heights did, the surface is scrolled to keep the anchor item in
    /// place, and a new projection is requested when the configured threshold says so.
    pub fn on_measured(
        &mut self,
        measure: impl FnMut(usize, &Frame<K, C>) -> f64,
    ) -> Result<MeasureOutcome, MovieError> {
        if self.detached {
            return Ok(MeasureOutcome::default());
        }

        let measured = measure_slice(&self.movie, self.slice, measure);
        let correction = self.drift.correct(&self.movie, measured)?;
        self.heights
            .record(&correction.movie, self.slice.clamp_to(correction.movie.len()).as_range());

        let mut scroll_correction = 0.0;
        let before = self.before.take();
        if self.identity_changed || correction.height_error != 0.0 {
            let viewport = self.surface.screen().rect_relative_to_movie();
            // A re-measure of an already measured slice compares against the current geometry.
            let before = before.unwrap_or_else(|| {
                ProjectionSnapshot::capture(&self.movie, viewport, self.slice)
            });
            let after = ProjectionSnapshot::capture(&correction.movie, viewport, self.slice);
            scroll_correction = offset_correction(&before, &after);
        }
        if scroll_correction != 0.0 {
            pdebug!(
                height_error = correction.height_error,
                scroll_correction,
                "Controller: anchoring scroll"
            );
            self.surface.scroll_by(scroll_correction);
        }

        let reproject = correction.should_reproject(self.identity_changed);
        let height_error = correction.height_error;
        self.movie = correction.movie;
        self.identity_changed = false;
        if reproject {
            self.scheduler.trigger(&mut self.driver);
        }

        Ok(MeasureOutcome {
            height_error,
            scroll_correction,
            reprojection_scheduled: reproject,
        })
    }

    /// Replaces the whole list. Cached heights are reused for ids seen before.
    ///
    /// The returned plan keeps the current index range, clamped to the new length.
    pub fn set_items(
        &mut self,
        items: impl IntoIterator<Item = (K, C)>,
    ) -> Result<RenderPlan, MovieError> {
        let heights = &self.heights;
        let movie = self.movie.layout(items, |id| heights.get(id))?;
        let slice = self.slice.clamp_to(movie.len());
        Ok(self.replace_movie(movie, slice))
    }

    /// Inserts `items` above the current list without moving what the user sees.
    pub fn prepend(
        &mut self,
        items: impl IntoIterator<Item = (K, C)>,
    ) -> Result<RenderPlan, MovieError> {
        let movie = self.movie.prefix_frames(items)?;
        let inserted = Slice::new(0, movie.len() - self.movie.len());
        let slice = map_old_slice_into_new_movie(self.slice, inserted);
        Ok(self.replace_movie(movie, slice))
    }

    pub fn append(
        &mut self,
        items: impl IntoIterator<Item = (K, C)>,
    ) -> Result<RenderPlan, MovieError> {
        let movie = self.movie.append_frames(items)?;
        let inserted = Slice::new(self.movie.len(), movie.len());
        let slice = map_old_slice_into_new_movie(self.slice, inserted);
        Ok(self.replace_movie(movie, slice))
    }

    fn replace_movie(&mut self, movie: Movie<K, C>, slice: Slice) -> RenderPlan {
        if self.detached {
            return self.render_plan();
        }
        if slice.is_empty() {
            // Nothing mounted to anchor to; project straight away.
            self.before = None;
            self.identity_changed = false;
            self.movie = movie;
            self.slice = slice;
            self.scheduler.trigger(&mut self.driver);
            return self.render_plan();
        }

        if self.before.is_none() {
            let viewport = self.surface.screen().rect_relative_to_movie();
            self.before = Some(ProjectionSnapshot::capture(&self.movie, viewport, self.slice));
        }
        pdebug!(
            len = movie.len(),
            start = slice.start,
            end = slice.end,
            "Controller: list changed"
        );
        self.identity_changed = true;
        self.movie = movie;
        self.slice = slice;
        self.render_plan()
    }

    /// Scrolls so the top of item `index` meets the viewport top, and schedules a projection.
    ///
    /// Returns `false` when `index` is out of range.
    pub fn scroll_to_index(&mut self, index: usize) -> bool {
        if self.detached {
            return false;
        }
        let Some(frame) = self.movie.frame(index) else {
            pwarn!(index, len = self.movie.len(), "scroll_to_index: out of range");
            return false;
        };
        self.surface.scroll_to(frame.top());
        self.scheduler.trigger(&mut self.driver);
        true
    }

    /// Stops reacting to events and drops pending work. Further calls are no-ops.
    pub fn detach(&mut self) {
        self.detached = true;
        self.scheduler.cancel();
        self.before = None;
        self.identity_changed = false;
    }
}
