use alloc::vec::Vec;

use crate::{ProjectorOptions, Rectangle};

/// The four edge zones a list reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeKind {
    AtStart,
    NearStart,
    NearEnd,
    AtEnd,
}

/// The geometric test for one zone, evaluated on the list rect and the viewport rect (both in
/// the same coordinate space).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeCondition {
    /// Viewport top is within `distance` of the list top.
    NearTop(f64),
    /// Viewport bottom is within `distance` of the list bottom.
    NearBottom(f64),
    /// Like `NearTop`, with the distance given as a multiple of the viewport height.
    NearTopRatio(f64),
    /// Like `NearBottom`, with the distance given as a multiple of the viewport height.
    NearBottomRatio(f64),
}

impl EdgeCondition {
    pub fn holds(&self, list: Rectangle, viewport: Rectangle) -> bool {
        match *self {
            Self::NearTop(distance) => viewport.top() - list.top() <= distance,
            Self::NearBottom(distance) => list.bottom() - viewport.bottom() <= distance,
            Self::NearTopRatio(ratio) => viewport.top() - list.top() <= ratio * viewport.height(),
            Self::NearBottomRatio(ratio) => {
                list.bottom() - viewport.bottom() <= ratio * viewport.height()
            }
        }
    }
}

/// Why a zone fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriggerCause {
    /// The first observation already found the viewport inside the zone.
    Initial,
    /// The viewport moved from outside the zone to inside it.
    Movement,
    /// The viewport stayed inside the zone while the list length changed.
    ListUpdate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeEvent {
    pub kind: EdgeKind,
    pub cause: TriggerCause,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ZoneState {
    inside: bool,
    list_len: usize,
}

#[derive(Clone, Debug, PartialEq)]
struct Zone {
    kind: EdgeKind,
    condition: EdgeCondition,
    state: Option<ZoneState>,
}

/// Watches the viewport's proximity to the list edges and reports zone entries.
///
/// Hosts typically use `NearEnd`/`NearStart` to load more items. What to load, and when, is
/// up to them; the trigger only reports.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeTrigger {
    zones: Vec<Zone>,
}

impl EdgeTrigger {
    /// Creates a trigger with the four standard zones configured from `options`.
    pub fn new(options: &ProjectorOptions) -> Self {
        Self::with_zones([
            (EdgeKind::AtStart, EdgeCondition::NearTop(options.at_edge_distance)),
            (
                EdgeKind::NearStart,
                EdgeCondition::NearTopRatio(options.near_start_ratio),
            ),
            (
                EdgeKind::NearEnd,
                EdgeCondition::NearBottomRatio(options.near_end_ratio),
            ),
            (EdgeKind::AtEnd, EdgeCondition::NearBottom(options.at_edge_distance)),
        ])
    }

    pub fn with_zones(zones: impl IntoIterator<Item = (EdgeKind, EdgeCondition)>) -> Self {
        Self {
            zones: zones
                .into_iter()
                .map(|(kind, condition)| Zone {
                    kind,
                    condition,
                    state: None,
                })
                .collect(),
        }
    }

    /// Forgets every zone's previous observation; the next one reports `Initial` again.
    pub fn reset(&mut self) {
        for zone in &mut self.zones {
            zone.state = None;
        }
    }

    /// Evaluates every zone and calls `emit` for each one that fired, in zone order.
    pub fn observe(
        &mut self,
        list: Rectangle,
        viewport: Rectangle,
        list_len: usize,
        mut emit: impl FnMut(EdgeEvent),
    ) {
        for zone in &mut self.zones {
            let next = ZoneState {
                inside: zone.condition.holds(list, viewport),
                list_len,
            };
            let cause = find_cause(zone.state, next);
            zone.state = Some(next);
            if let Some(cause) = cause {
                ptrace!(kind = ?zone.kind, cause = ?cause, "EdgeTrigger: zone fired");
                emit(EdgeEvent {
                    kind: zone.kind,
                    cause,
                });
            }
        }
    }
}

fn find_cause(prev: Option<ZoneState>, next: ZoneState) -> Option<TriggerCause> {
    if !next.inside {
        return None;
    }
    match prev {
        None => Some(TriggerCause::Initial),
        Some(prev) if !prev.inside => Some(TriggerCause::Movement),
        Some(prev) if prev.list_len != next.list_len => Some(TriggerCause::ListUpdate),
        Some(_) => None,
    }
}
