#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type HeightMap<K> = HashMap<K, f64>;
#[cfg(not(feature = "std"))]
pub(crate) type HeightMap<K> = BTreeMap<K, f64>;

/// Bounds required to cache a height by item id.
#[cfg(feature = "std")]
#[doc(hidden)]
pub trait CacheKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> CacheKey for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait CacheKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> CacheKey for K {}
