use crate::*;

use alloc::vec::Vec;

use projector::{
    BlankSpace, EdgeEvent, EdgeKind, Frame, Movie, MovieError, ProjectorOptions, PulseDriver,
    Rectangle, ReprojectThreshold, Slice, TriggerCause,
};

#[derive(Debug, Default)]
struct Pulses {
    requested: usize,
}

impl PulseDriver for Pulses {
    fn request_pulse(&mut self) {
        self.requested += 1;
    }
}

type TestController = Controller<u64, u64, WindowSurface, Pulses>;

fn controller(options: ProjectorOptions, window_height: f64) -> TestController {
    Controller::new(
        options,
        WindowSurface::new(window_height, 0.0),
        Pulses::default(),
    )
}

fn items(ids: core::ops::Range<u64>) -> Vec<(u64, u64)> {
    ids.map(|id| (id, id)).collect()
}

fn as_rendered(_: usize, frame: &Frame<u64, u64>) -> f64 {
    frame.height()
}

/// Five 100px items in a 100px window, projected and measured at the top.
fn settled(options: ProjectorOptions) -> TestController {
    let mut c = controller(options, 100.0);
    c.set_items(items(0..5)).unwrap();
    c.on_pulse().unwrap();
    c.on_measured(as_rendered).unwrap();
    c
}

fn user_scroll(c: &mut TestController, scroll_y: f64) -> PulseOutcome {
    c.surface_mut().user_scroll_to(scroll_y);
    assert!(c.on_scroll());
    c.on_pulse().unwrap()
}

#[test]
fn first_items_are_projected_on_the_next_pulse() {
    let mut c = controller(ProjectorOptions::new(100.0), 100.0);
    let plan = c.set_items(items(0..5)).unwrap();
    assert_eq!(plan.slice, Slice::EMPTY);
    assert!(c.is_pulse_pending());
    assert_eq!(c.driver().requested, 1);

    let pulse = c.on_pulse().unwrap();
    assert_eq!(pulse.plan.slice, Slice::new(0, 1));
    assert_eq!(
        pulse.plan.blank_space,
        BlankSpace {
            above: 0.0,
            below: 400.0
        }
    );
    assert_eq!(
        pulse.edge_events,
        [
            EdgeEvent {
                kind: EdgeKind::AtStart,
                cause: TriggerCause::Initial
            },
            EdgeEvent {
                kind: EdgeKind::NearStart,
                cause: TriggerCause::Initial
            },
        ]
    );
    assert!(c.on_pulse().is_none());

    let measured = c.on_measured(as_rendered).unwrap();
    assert_eq!(measured, MeasureOutcome::default());
    assert!(!c.is_pulse_pending());
}

#[test]
fn scroll_events_coalesce_into_one_pulse() {
    let mut c = settled(ProjectorOptions::new(100.0));
    let before = c.driver().requested;

    c.surface_mut().user_scroll_to(40.0);
    assert!(c.on_scroll());
    c.surface_mut().user_scroll_to(150.0);
    assert!(c.on_scroll());
    c.on_resize();
    assert_eq!(c.driver().requested, before + 1);

    let pulse = c.on_pulse().unwrap();
    assert_eq!(pulse.plan.slice, Slice::new(1, 3));
    assert!(pulse.edge_events.is_empty());
}

#[test]
fn prepend_keeps_the_viewport_on_the_same_items() {
    let mut c = settled(ProjectorOptions::new(100.0));
    user_scroll(&mut c, 150.0);
    assert_eq!(c.slice(), Slice::new(1, 3));
    c.on_measured(as_rendered).unwrap();

    let plan = c.prepend(items(100..102)).unwrap();
    assert_eq!(plan.slice, Slice::new(3, 5));
    assert_eq!(
        plan.blank_space,
        BlankSpace {
            above: 300.0,
            below: 200.0
        }
    );

    // A pulse that fires before the measurement does not project.
    c.on_resize();
    assert!(c.on_pulse().is_none());

    let measured = c.on_measured(as_rendered).unwrap();
    assert_eq!(measured.height_error, 0.0);
    assert_eq!(measured.scroll_correction, 200.0);
    assert!(measured.reprojection_scheduled);
    assert_eq!(c.surface().scroll_y(), 350.0);

    // The correction's own scroll event is not a user scroll.
    assert!(!c.on_scroll());

    let pulse = c.on_pulse().unwrap();
    assert_eq!(pulse.plan.slice, Slice::new(3, 5));
}

#[test]
fn measured_drift_above_the_viewport_is_anchored() {
    let mut c = settled(ProjectorOptions::new(100.0).with_buffer_ratio(1.0));
    let pulse = user_scroll(&mut c, 150.0);
    assert_eq!(pulse.plan.slice, Slice::new(0, 4));

    let measured = c
        .on_measured(|i, frame| if i == 0 { 150.0 } else { frame.height() })
        .unwrap();
    assert_eq!(measured.height_error, 50.0);
    assert_eq!(measured.scroll_correction, 50.0);
    assert!(measured.reprojection_scheduled);
    assert_eq!(c.surface().scroll_y(), 200.0);
    assert_eq!(c.movie().frame(1).unwrap().top(), 150.0);
    assert_eq!(c.heights().get(&0), Some(150.0));
    assert_eq!(c.heights().len(), 4);
}

#[test]
fn remeasuring_a_settled_slice_is_anchored() {
    let mut c = settled(ProjectorOptions::new(100.0).with_buffer_ratio(1.0));
    let pulse = user_scroll(&mut c, 250.0);
    assert_eq!(pulse.plan.slice, Slice::new(1, 5));
    assert_eq!(c.on_measured(as_rendered).unwrap(), MeasureOutcome::default());

    // Item 1 sits above the viewport, still mounted, and grows after its content loads.
    let measured = c
        .on_measured(|i, frame| if i == 1 { 150.0 } else { frame.height() })
        .unwrap();
    assert_eq!(measured.height_error, 50.0);
    assert_eq!(measured.scroll_correction, 50.0);
    assert_eq!(c.surface().scroll_y(), 300.0);
    assert_eq!(c.movie().frame(2).unwrap().top(), 250.0);
}

#[test]
fn user_scroll_after_a_correction_is_not_swallowed() {
    let mut c = settled(ProjectorOptions::new(100.0));
    user_scroll(&mut c, 150.0);
    c.on_measured(as_rendered).unwrap();
    c.prepend(items(100..102)).unwrap();
    let measured = c.on_measured(as_rendered).unwrap();
    assert_eq!(measured.scroll_correction, 200.0);
    c.on_pulse().unwrap();

    // The user moved before the correction's echo was delivered; one event covers both.
    c.surface_mut().user_scroll_to(600.0);
    assert!(c.on_scroll());
    assert!(c.is_pulse_pending());
    assert_eq!(c.on_pulse().unwrap().plan.slice, Slice::new(6, 7));
}

#[test]
fn small_errors_wait_for_the_next_scroll_under_assumed_height_threshold() {
    let options =
        ProjectorOptions::new(100.0).with_reproject_threshold(ReprojectThreshold::AssumedHeight);
    let mut c = controller(options, 100.0);
    c.set_items(items(0..5)).unwrap();
    c.on_pulse().unwrap();
    let before = c.driver().requested;

    let measured = c
        .on_measured(|i, frame| if i == 0 { 150.0 } else { frame.height() })
        .unwrap();
    assert_eq!(measured.height_error, 50.0);
    assert_eq!(measured.scroll_correction, 0.0);
    assert!(!measured.reprojection_scheduled);
    assert_eq!(c.driver().requested, before);
    assert_eq!(c.movie().total_height(), 550.0);
}

#[test]
fn cached_heights_survive_a_full_rebuild() {
    let mut c = controller(ProjectorOptions::new(100.0), 100.0);
    c.set_items(items(0..5)).unwrap();
    c.on_pulse().unwrap();
    c.on_measured(|_, _| 60.0).unwrap();

    c.set_items(items(0..8)).unwrap();
    assert_eq!(c.movie().frame(0).unwrap().height(), 60.0);
    assert_eq!(c.movie().frame(1).unwrap().top(), 60.0);
    assert_eq!(c.movie().len(), 8);
}

#[test]
fn append_reports_list_updates_at_the_edges() {
    let mut c = settled(ProjectorOptions::new(100.0));

    let plan = c.append(items(5..7)).unwrap();
    assert_eq!(plan.slice, Slice::new(0, 1));

    let measured = c.on_measured(as_rendered).unwrap();
    assert_eq!(measured.scroll_correction, 0.0);
    assert!(measured.reprojection_scheduled);

    let pulse = c.on_pulse().unwrap();
    assert!(pulse.edge_events.contains(&EdgeEvent {
        kind: EdgeKind::AtStart,
        cause: TriggerCause::ListUpdate
    }));
    assert_eq!(pulse.plan.blank_space.below, 600.0);
}

#[test]
fn failed_list_changes_leave_the_controller_untouched() {
    let mut c = settled(ProjectorOptions::new(100.0));

    let err = c.prepend(items(2..3)).unwrap_err();
    assert_eq!(err, MovieError::DuplicateId { first: 0, index: 3 });
    assert!(c.append(items(4..6)).is_err());
    assert_eq!(c.movie().len(), 5);
    assert_eq!(c.slice(), Slice::new(0, 1));
    assert!(c.on_pulse().is_none());
}

#[test]
fn scroll_to_index_moves_the_surface_and_reprojects() {
    let mut c = Controller::new(
        ProjectorOptions::new(100.0),
        WindowSurface::new(100.0, 50.0),
        Pulses::default(),
    );
    c.set_items(items(0..5)).unwrap();
    c.on_pulse().unwrap();
    c.on_measured(as_rendered).unwrap();

    assert!(c.scroll_to_index(3));
    assert_eq!(c.surface().scroll_y(), 350.0);
    assert!(!c.on_scroll());
    assert_eq!(c.on_pulse().unwrap().plan.slice, Slice::new(3, 4));

    assert!(!c.scroll_to_index(99));
}

#[test]
fn detach_stops_all_reactions() {
    let mut c = settled(ProjectorOptions::new(100.0));
    c.surface_mut().user_scroll_to(200.0);
    assert!(c.on_scroll());

    c.detach();
    assert!(c.is_detached());
    assert!(!c.is_pulse_pending());
    assert!(c.on_pulse().is_none());
    assert!(!c.on_scroll());
    c.on_resize();
    assert!(!c.is_pulse_pending());
    assert!(!c.scroll_to_index(1));
    assert_eq!(
        c.on_measured(|_, _| 1.0).unwrap(),
        MeasureOutcome::default()
    );
}

#[test]
fn window_surface_tracks_its_own_echoes() {
    let mut s = WindowSurface::new(600.0, 120.0);
    assert_eq!(s.viewport(), Rectangle::new(0.0, 600.0));
    assert_eq!(s.movie_top(), 120.0);
    assert_eq!(s.screen().rect_relative_to_movie().top(), -120.0);

    s.scroll_by(50.0);
    assert_eq!(s.scroll_y(), 50.0);
    assert_eq!(s.classify_scroll(), ScrollSource::Programmatic);
    assert_eq!(s.classify_scroll(), ScrollSource::User);

    s.scroll_by(-100.0);
    assert_eq!(s.scroll_y(), 0.0);
    // Already at the top: nothing moves, so no echo is expected.
    s.scroll_by(-10.0);
    assert_eq!(s.classify_scroll(), ScrollSource::Programmatic);
    assert_eq!(s.classify_scroll(), ScrollSource::User);

    s.scroll_to(30.0);
    assert_eq!(s.scroll_y(), 150.0);
    s.user_scroll_to(10.0);
    assert_eq!(s.scroll_y(), 10.0);
}

#[test]
fn echo_is_only_reported_while_the_position_sits_on_the_target() {
    let mut s = WindowSurface::new(100.0, 0.0);
    s.scroll_by(200.0);
    s.user_scroll_to(260.0);
    assert_eq!(s.classify_scroll(), ScrollSource::User);

    // A host mirroring the echo's own position keeps it an echo.
    s.scroll_by(40.0);
    s.user_scroll_to(300.0);
    assert_eq!(s.classify_scroll(), ScrollSource::Programmatic);
    assert_eq!(s.classify_scroll(), ScrollSource::User);

    let mut e = ElementSurface::new(0.0, 100.0, 0.0);
    e.scroll_to(500.0);
    e.user_scroll_to(480.0);
    assert_eq!(e.classify_scroll(), ScrollSource::User);
}

#[test]
fn element_surface_moves_the_list_under_a_fixed_viewport() {
    let mut s = ElementSurface::new(100.0, 400.0, 20.0);
    assert_eq!(s.viewport(), Rectangle::new(100.0, 400.0));
    assert_eq!(s.movie_top(), 120.0);

    s.user_scroll_to(220.0);
    assert_eq!(s.movie_top(), -100.0);
    assert_eq!(s.screen().rect_relative_to_movie().top(), 200.0);
    assert_eq!(s.classify_scroll(), ScrollSource::User);

    s.scroll_to(0.0);
    assert_eq!(s.scroll_top(), 20.0);
    assert_eq!(s.screen().rect_relative_to_movie().top(), 0.0);
    assert_eq!(s.classify_scroll(), ScrollSource::Programmatic);

    s.set_bounds(0.0, 300.0);
    assert_eq!(s.viewport().bottom(), 300.0);
}

#[test]
fn height_cache_can_roundtrip() {
    let mut a = HeightCache::new();
    a.insert(1u64, 10.0);
    a.insert(2, 20.0);
    assert_eq!(a.insert(3, -1.0), None);
    assert_eq!(a.insert(2, 25.0), Some(20.0));
    assert_eq!(a.len(), 2);

    let mut exported = a.export();
    exported.sort_by_key(|&(id, _)| id);
    assert_eq!(exported, [(1, 10.0), (2, 25.0)]);

    let mut b = HeightCache::new();
    b.insert(9u64, 1.0);
    b.import(exported);
    assert_eq!(b.len(), 2);
    assert_eq!(b.get(&2), Some(25.0));
    assert_eq!(b.get(&9), None);

    assert_eq!(b.remove(&1), Some(10.0));
    b.clear();
    assert!(b.is_empty());
}

#[test]
fn height_cache_prunes_ids_missing_from_the_list() {
    let mut cache = HeightCache::new();
    for id in 0u64..6 {
        cache.insert(id, 10.0 * id as f64);
    }

    cache.retain(|_, height| height >= 10.0);
    assert_eq!(cache.len(), 5);
    assert_eq!(cache.get(&0), None);

    let movie = Movie::new(30.0).layout(items(3..8), |_| None).unwrap();
    cache.retain_movie(&movie);
    let mut ids: Vec<u64> = cache.export().into_iter().map(|(id, _)| id).collect();
    ids.sort_unstable();
    assert_eq!(ids, [3, 4, 5]);
    assert_eq!(cache.get(&4), Some(40.0));
}
