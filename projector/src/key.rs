#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Maps a frame id to its index inside one frame sequence.
#[cfg(feature = "std")]
pub(crate) type IdIndexMap<K> = HashMap<K, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type IdIndexMap<K> = BTreeMap<K, usize>;

/// Bounds required of a frame id.
///
/// With `std` ids are hashed; without it they only need a total order.
#[cfg(feature = "std")]
pub trait FrameKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> FrameKey for K {}

#[cfg(not(feature = "std"))]
pub trait FrameKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> FrameKey for K {}

pub(crate) fn index_ids<'a, K: FrameKey + 'a>(
    ids: impl IntoIterator<Item = (usize, &'a K)>,
) -> IdIndexMap<K> {
    let mut map = IdIndexMap::<K>::new();
    for (index, id) in ids {
        map.insert(id.clone(), index);
    }
    map
}
