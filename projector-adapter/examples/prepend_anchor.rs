// Example: a chat timeline that loads older messages above without jumping.
use projector::{ProjectorOptions, Rectangle};
use projector_adapter::{Controller, ScrollSurface, WindowSurface};

fn main() {
    let mut pulses = 0usize;
    let mut c = Controller::new(
        ProjectorOptions::new(80.0).with_buffer_ratio(0.5),
        WindowSurface::new(400.0, 0.0),
        || pulses += 1,
    );

    c.set_items((1_000..1_050u64).map(|id| (id, format!("message {id}"))))
        .expect("ids are unique");
    let first = c.on_pulse().expect("initial projection");
    println!("initial slice={:?}", first.plan.slice);
    c.on_measured(|_, frame| 40.0 + frame.content.len() as f64)
        .expect("valid heights");

    c.surface_mut().user_scroll_to(600.0);
    c.on_scroll();
    if let Some(pulse) = c.on_pulse() {
        println!("after scroll slice={:?} edges={:?}", pulse.plan.slice, pulse.edge_events);
    }
    c.on_measured(|_, frame| 40.0 + frame.content.len() as f64)
        .expect("valid heights");
    let anchor_view: Rectangle = c.surface().screen().rect_relative_to_movie();

    // Load older messages above the viewport.
    let plan = c
        .prepend((900..1_000u64).map(|id| (id, format!("older {id}"))))
        .expect("ids are unique");
    println!("remapped slice={:?} blank={:?}", plan.slice, plan.blank_space);

    let outcome = c
        .on_measured(|_, frame| 40.0 + frame.content.len() as f64)
        .expect("valid heights");
    println!(
        "scroll_correction={} (viewport was at {}, now at {})",
        outcome.scroll_correction,
        anchor_view.top(),
        c.surface().screen().rect_relative_to_movie().top()
    );
    c.on_scroll();
    if let Some(pulse) = c.on_pulse() {
        println!("reprojected slice={:?}", pulse.plan.slice);
    }

    c.detach();
    drop(c);
    println!("pulses requested: {pulses}");
}
