use alloc::vec::Vec;

use crate::key::FrameKey;
use crate::{Frame, HeightUpdate, Movie, MovieError, ReprojectThreshold, Slice};

/// Reconciles measured heights with the heights a movie assumed.
///
/// Run it once per measurement pass, after the host has laid out the rendered slice. The
/// corrected movie must replace the old one before the next projection.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriftCorrector {
    threshold: ReprojectThreshold,
}

/// The outcome of one drift correction pass.
#[derive(Clone, Debug)]
pub struct DriftCorrection<K, C> {
    /// Signed sum of `measured - previous` heights.
    pub height_error: f64,
    /// The corrected movie.
    pub movie: Movie<K, C>,
    reproject: bool,
}

impl<K, C> DriftCorrection<K, C> {
    /// Whether the slice must be projected again.
    ///
    /// A pure geometry shift without an identity change can wait for the next scroll event,
    /// which will use the corrected movie anyway.
    pub fn should_reproject(&self, identity_changed: bool) -> bool {
        identity_changed || self.reproject
    }
}

impl DriftCorrector {
    pub fn new(threshold: ReprojectThreshold) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> ReprojectThreshold {
        self.threshold
    }

    /// Applies heights keyed by frame index. See [`Movie::update_heights`].
    pub fn correct<K: FrameKey, C: Clone>(
        &self,
        movie: &Movie<K, C>,
        measured: impl IntoIterator<Item = (usize, f64)>,
    ) -> Result<DriftCorrection<K, C>, MovieError> {
        let update = movie.update_heights(measured)?;
        Ok(self.finish(movie.assumed_height(), update))
    }

    /// Applies heights keyed by frame id. See [`Movie::update_heights_by_id`].
    pub fn correct_by_id<K: FrameKey, C: Clone>(
        &self,
        movie: &Movie<K, C>,
        measured: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<DriftCorrection<K, C>, MovieError> {
        let update = movie.update_heights_by_id(measured)?;
        Ok(self.finish(movie.assumed_height(), update))
    }

    fn finish<K, C>(&self, assumed_height: f64, update: HeightUpdate<K, C>) -> DriftCorrection<K, C> {
        let reproject = self
            .threshold
            .exceeded_by(update.height_error, assumed_height);
        if update.height_error != 0.0 {
            pdebug!(
                height_error = update.height_error,
                reproject,
                "DriftCorrector: heights corrected"
            );
        }
        DriftCorrection {
            height_error: update.height_error,
            movie: update.movie,
            reproject,
        }
    }
}

/// Queries `measure` for every frame in `slice` and collects `(index, height)` pairs.
///
/// `measure` is the host's "how tall did this mounted item render" query; it is only called
/// for mounted frames.
pub fn measure_slice<K, C>(
    movie: &Movie<K, C>,
    slice: Slice,
    mut measure: impl FnMut(usize, &Frame<K, C>) -> f64,
) -> Vec<(usize, f64)> {
    let slice = slice.clamp_to(movie.len());
    movie.frames()[slice.as_range()]
        .iter()
        .enumerate()
        .map(|(offset, frame)| {
            let index = slice.start + offset;
            (index, measure(index, frame))
        })
        .collect()
}
