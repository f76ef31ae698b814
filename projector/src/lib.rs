//! A headless projection engine for virtualized lists.
//!
//! Long lists are rendered by mounting only the items that intersect the viewport (plus a
//! buffer). This crate owns the math behind that:
//! - a [`Movie`]: every item's vertical extent, estimated until measured
//! - [`project`]: which index range to mount for a given [`Screen`]
//! - drift correction: folding measured heights back into the movie ([`DriftCorrector`])
//! - anchoring: the scroll delta that keeps the item the user is looking at in place when
//!   geometry changes ([`offset_correction`])
//! - a single-flight [`Scheduler`] that bounds recomputes to one per paint pulse
//!
//! It is UI-agnostic. A host layer is expected to provide viewport measurements, rendered
//! item heights and programmatic scrolling. For a ready-made wiring of those, see the
//! `projector-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod drift;
mod edge;
mod error;
mod frame;
mod key;
mod movie;
mod options;
mod projection;
mod rect;
mod remap;
mod scheduler;
mod screen;
mod snapshot;
mod types;


pub use anchor::{Anchor, find_anchor, offset_correction};
pub use drift::{DriftCorrection, DriftCorrector, measure_slice};
pub use edge::{EdgeCondition, EdgeEvent, EdgeKind, EdgeTrigger, TriggerCause};
pub use error::MovieError;
pub use frame::Frame;
pub use key::FrameKey;
pub use movie::{HeightUpdate, Movie};
pub use options::{ProjectorOptions, ReprojectThreshold};
pub use projection::project;
pub use rect::Rectangle;
pub use remap::map_old_slice_into_new_movie;
pub use scheduler::{PulseDriver, ScheduleState, Scheduler};
pub use screen::Screen;
pub use snapshot::ProjectionSnapshot;
pub use types::{BlankSpace, RenderPlan, Slice};
