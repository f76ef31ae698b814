use crate::{Movie, Screen, Slice};

/// Selects the frames to render for `screen`, as a half-open slice into `movie.frames()`.
///
/// The render range is the screen's movie-relative rect grown by
/// `screen height * buffer_ratio` above and below. A frame is selected when it overlaps that
/// range with half-open semantics (`bottom > render_top` and `top < render_bottom`), so frames
/// that only touch an edge are left out.
///
/// Edge cases:
/// - An empty movie yields an empty slice.
/// - A screen below the last frame still yields the last frame, so at least one item stays
///   mounted and measurable.
/// - The end search starts after `start`, so a non-empty movie never yields an empty slice.
/// - A negative or non-finite `buffer_ratio` is treated as `0`.
///
/// Frames are monotonic, so both bounds are found by binary search.
pub fn project<K, C>(movie: &Movie<K, C>, screen: &Screen, buffer_ratio: f64) -> Slice {
    let frames = movie.frames();
    if frames.is_empty() {
        return Slice::EMPTY;
    }

    let rect = screen.rect_relative_to_movie();
    let buffer = rect.height() * sanitize_buffer_ratio(buffer_ratio);
    let render_top = rect.top() - buffer;
    let render_bottom = rect.bottom() + buffer;

    let start = frames
        .partition_point(|frame| frame.bottom() <= render_top)
        .min(frames.len() - 1);
    let after = start + 1;
    let end = after + frames[after..].partition_point(|frame| frame.top() < render_bottom);

    ptrace!(render_top, render_bottom, start, end, "project");
    Slice { start, end }
}

fn sanitize_buffer_ratio(buffer_ratio: f64) -> f64 {
    if buffer_ratio.is_finite() && buffer_ratio >= 0.0 {
        buffer_ratio
    } else {
        pwarn!(buffer_ratio, "project: invalid buffer ratio, using 0");
        0.0
    }
}
