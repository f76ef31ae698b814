/// When a non-zero height error should trigger a fresh projection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReprojectThreshold {
    /// Any non-zero error re-projects.
    #[default]
    Always,
    /// Only an error of at least one assumed item height re-projects. Smaller errors cannot
    /// move the slice boundary by more than one item, and the next scroll event will use the
    /// corrected movie anyway.
    AssumedHeight,
}

impl ReprojectThreshold {
    pub fn exceeded_by(self, height_error: f64, assumed_height: f64) -> bool {
        if height_error == 0.0 {
            return false;
        }
        match self {
            Self::Always => true,
            Self::AssumedHeight => {
                let magnitude = if height_error < 0.0 {
                    -height_error
                } else {
                    height_error
                };
                magnitude >= assumed_height
            }
        }
    }
}

/// Configuration for a projected list.
///
/// Every field is public; the `with_*` builders exist for call-chain convenience.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectorOptions {
    /// Height given to items that have not been measured yet.
    pub assumed_height: f64,

    /// Extra render margin above and below the viewport, as a multiple of the viewport height.
    ///
    /// `0` renders exactly the visible items.
    pub buffer_ratio: f64,

    pub reproject_threshold: ReprojectThreshold,

    /// Distance (in the list's units) within which the viewport counts as *at* the start or end
    /// of the list.
    pub at_edge_distance: f64,

    /// Distance from the start, as a multiple of the viewport height, within which the viewport
    /// counts as *near* the start.
    pub near_start_ratio: f64,

    /// Distance from the end, as a multiple of the viewport height, within which the viewport
    /// counts as *near* the end.
    pub near_end_ratio: f64,
}

impl Default for ProjectorOptions {
    fn default() -> Self {
        Self {
            assumed_height: 400.0,
            buffer_ratio: 0.0,
            reproject_threshold: ReprojectThreshold::Always,
            at_edge_distance: 5.0,
            near_start_ratio: 0.25,
            near_end_ratio: 1.75,
        }
    }
}

impl ProjectorOptions {
    pub fn new(assumed_height: f64) -> Self {
        Self {
            assumed_height,
            ..Self::default()
        }
    }

    pub fn with_assumed_height(mut self, assumed_height: f64) -> Self {
        self.assumed_height = assumed_height;
        self
    }

    pub fn with_buffer_ratio(mut self, buffer_ratio: f64) -> Self {
        self.buffer_ratio = buffer_ratio;
        self
    }

    pub fn with_reproject_threshold(mut self, threshold: ReprojectThreshold) -> Self {
        self.reproject_threshold = threshold;
        self
    }

    pub fn with_at_edge_distance(mut self, distance: f64) -> Self {
        self.at_edge_distance = distance;
        self
    }

    pub fn with_edge_ratios(mut self, near_start_ratio: f64, near_end_ratio: f64) -> Self {
        self.near_start_ratio = near_start_ratio;
        self.near_end_ratio = near_end_ratio;
        self
    }
}
