use core::cmp::Ordering;

use crate::key::FrameKey;
use crate::{ProjectionSnapshot, Rectangle};

/// The frame chosen to stay visually fixed across a geometry change.
#[derive(Clone, Debug, PartialEq)]
pub struct Anchor<K> {
    pub id: K,
    /// The anchor's top in the earlier snapshot.
    pub top_before: f64,
    /// The anchor's top in the later snapshot.
    pub top_after: f64,
}

impl<K> Anchor<K> {
    /// Scroll delta that keeps the anchor where it was on screen.
    pub fn offset(&self) -> f64 {
        self.top_after - self.top_before
    }
}

/// Picks the frame the user is most likely looking at, among frames rendered in both
/// snapshots.
///
/// Frames whose `prev` rectangle intersects `prev`'s viewport beat frames that do not. Among
/// equals the one whose top is closest to the viewport top wins, and after that the earlier
/// one in `next` order.
pub fn find_anchor<K: FrameKey, C>(
    prev: &ProjectionSnapshot<K, C>,
    next: &ProjectionSnapshot<K, C>,
) -> Option<Anchor<K>> {
    let viewport = prev.screen_rect();
    let mut best: Option<(&K, Rectangle)> = None;

    for frame in next.rendered_frames() {
        if !prev.is_rendered(&frame.id) {
            continue;
        }
        let Some(rect) = prev.frame_rect(&frame.id) else {
            continue;
        };
        let better = match best {
            None => true,
            Some((_, best_rect)) => compare_candidates(&viewport, &rect, &best_rect).is_gt(),
        };
        if better {
            best = Some((&frame.id, rect));
        }
    }

    let (id, before) = best?;
    let after = next.frame_rect(id)?;
    Some(Anchor {
        id: id.clone(),
        top_before: before.top(),
        top_after: after.top(),
    })
}

/// Computes the scroll delta that keeps the anchor frame visually fixed from `prev` to `next`.
///
/// Add the result to the current scroll offset through a programmatic scroll. When the two
/// snapshots have no rendered frame in common there is nothing to anchor to, and the
/// correction is `0`.
pub fn offset_correction<K: FrameKey, C>(
    prev: &ProjectionSnapshot<K, C>,
    next: &ProjectionSnapshot<K, C>,
) -> f64 {
    match find_anchor(prev, next) {
        Some(anchor) => {
            let offset = anchor.offset();
            ptrace!(
                top_before = anchor.top_before,
                top_after = anchor.top_after,
                offset,
                "offset_correction"
            );
            offset
        }
        None => {
            pdebug!("offset_correction: no frame rendered in both snapshots, no correction");
            0.0
        }
    }
}

/// `Greater` when `a` is a better anchor than `b`.
fn compare_candidates(viewport: &Rectangle, a: &Rectangle, b: &Rectangle) -> Ordering {
    let in_view = a.intersects(viewport).cmp(&b.intersects(viewport));
    if in_view != Ordering::Equal {
        return in_view;
    }
    let da = distance(viewport.top(), a.top());
    let db = distance(viewport.top(), b.top());
    db.partial_cmp(&da).unwrap_or(Ordering::Equal)
}

fn distance(a: f64, b: f64) -> f64 {
    if a > b { a - b } else { b - a }
}
