// Example: project a long list onto a viewport and compute the blank space.
use projector::{Movie, Rectangle, Screen, project};

fn main() {
    let movie = Movie::new(40.0)
        .layout((0..100_000u64).map(|id| (id, ())), |_| None)
        .expect("ids are unique");

    // The list starts 120px below the top of the page; the page is scrolled to 8_000px.
    let viewport = Rectangle::new(8_000.0, 600.0);
    let screen = Screen::new(viewport, 120.0);

    let slice = project(&movie, &screen, 0.5);
    let blank = movie.blank_space(slice);
    println!("total_height={}", movie.total_height());
    println!("slice={slice:?} ({} frames mounted)", slice.len());
    println!("blank_space above={} below={}", blank.above, blank.below);
}
