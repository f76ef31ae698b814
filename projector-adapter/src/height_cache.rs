use alloc::vec::Vec;

use projector::Movie;

use crate::key::{CacheKey, HeightMap};

/// Measured heights remembered by item id.
///
/// A [`Movie`] only carries heights for the items it currently holds, and a full rebuild starts
/// over from the assumed height. The cache outlives rebuilds: items measured once keep their
/// height when the list is replaced, and the cache can be exported for persistence.
///
/// Entries are never dropped on their own, so ids removed from the list stay cached until
/// [`Self::retain`] or [`Self::retain_movie`] prunes them.
#[derive(Clone, Debug)]
pub struct HeightCache<K> {
    heights: HeightMap<K>,
}

impl<K> Default for HeightCache<K> {
    fn default() -> Self {
        Self {
            heights: HeightMap::new(),
        }
    }
}

impl<K: CacheKey> HeightCache<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn get(&self, id: &K) -> Option<f64> {
        self.heights.get(id).copied()
    }

    /// Stores a measured height. Negative or non-finite heights are ignored.
    pub fn insert(&mut self, id: K, height: f64) -> Option<f64> {
        if !(height.is_finite() && height >= 0.0) {
            pwarn!(height, "HeightCache::insert: invalid height, ignored");
            return None;
        }
        self.heights.insert(id, height)
    }

    pub fn remove(&mut self, id: &K) -> Option<f64> {
        self.heights.remove(id)
    }

    pub fn clear(&mut self) {
        self.heights.clear();
    }

    /// Keeps only the entries for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, f64) -> bool) {
        self.heights.retain(|id, height| keep(id, *height));
        ptrace!(len = self.heights.len(), "HeightCache::retain");
    }

    /// Drops the entries whose id is no longer part of `movie`.
    pub fn retain_movie<C>(&mut self, movie: &Movie<K, C>)
    where
        K: Clone,
    {
        let present: HeightMap<K> = movie
            .frames()
            .iter()
            .map(|frame| (frame.id.clone(), frame.height()))
            .collect();
        self.retain(|id, _| present.contains_key(id));
    }

    /// Iterates over the cached heights without allocating.
    pub fn for_each(&self, mut f: impl FnMut(&K, f64)) {
        for (id, height) in self.heights.iter() {
            f(id, *height);
        }
    }

    /// Exports the cache as a `Vec` (useful for persistence). Order is unspecified.
    pub fn export(&self) -> Vec<(K, f64)>
    where
        K: Clone,
    {
        let mut out = Vec::with_capacity(self.heights.len());
        self.for_each(|id, height| out.push((id.clone(), height)));
        out
    }

    /// Replaces the cache with `entries`.
    pub fn import(&mut self, entries: impl IntoIterator<Item = (K, f64)>) {
        self.heights.clear();
        for (id, height) in entries {
            self.insert(id, height);
        }
        pdebug!(entries = self.heights.len(), "HeightCache::import");
    }

    /// Remembers the current heights of the frames at `indexes` in `movie`.
    pub fn record<C>(&mut self, movie: &Movie<K, C>, indexes: impl IntoIterator<Item = usize>)
    where
        K: Clone,
    {
        for index in indexes {
            if let Some(frame) = movie.frame(index) {
                self.heights.insert(frame.id.clone(), frame.height());
            }
        }
    }
}
