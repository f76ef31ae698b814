//! Adapter utilities for the `projector` crate.
//!
//! `projector` is UI-agnostic: it computes slices, corrections and schedules, but never touches
//! a scroll container. This crate provides the glue most hosts need:
//!
//! - [`ScrollSurface`]: the scroll container capability, with window and element flavors
//! - [`Controller`]: the render loop (project, render, measure, anchor, re-project)
//! - [`HeightCache`]: measured heights by id, surviving full list rebuilds
//!
//! It stays framework-agnostic; hosts forward their own events and perform their own
//! rendering.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod height_cache;
mod key;
mod surface;

#[cfg(test)]
mod tests;

pub use controller::{Controller, MeasureOutcome, PulseOutcome};
pub use height_cache::HeightCache;
pub use key::CacheKey;
pub use surface::{ElementSurface, ScrollSource, ScrollSurface, WindowSurface};
