// Example: fold measured heights back into the movie and keep the viewport steady.
use projector::{
    DriftCorrector, Movie, ProjectionSnapshot, Rectangle, Screen, measure_slice,
    offset_correction, project,
};

fn main() {
    let movie = Movie::new(100.0)
        .layout((0..50u64).map(|id| (id, format!("message #{id}"))), |_| None)
        .expect("ids are unique");

    let mut viewport = Rectangle::new(1_000.0, 400.0);
    let slice = project(&movie, &Screen::new(viewport, 0.0), 1.0);
    let before = ProjectionSnapshot::capture(&movie, viewport, slice);

    // Pretend the host rendered every mounted item at a height proportional to its text.
    let measured = measure_slice(&movie, slice, |_, frame| 4.0 * frame.content.len() as f64);
    let corrected = DriftCorrector::default()
        .correct(&movie, measured)
        .expect("measured heights are valid");
    println!(
        "height_error={} reproject={}",
        corrected.height_error,
        corrected.should_reproject(false)
    );

    let after = ProjectionSnapshot::capture(&corrected.movie, viewport, slice);
    let scroll_by = offset_correction(&before, &after);
    viewport = viewport.translate_by(scroll_by);
    println!("scroll_by={scroll_by} viewport_top={}", viewport.top());

    let next = project(&corrected.movie, &Screen::new(viewport, 0.0), 1.0);
    println!("slice {slice:?} -> {next:?}");
}
