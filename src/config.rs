use crate::error::ConfigError;
use crate::math::{MERGE_DISTANCE, TOLERANCE};

/// Margin used for exterior skeletons unless configured otherwise.
pub const DEFAULT_EXTERIOR_MARGIN: f64 = 5.0;

/// Tuning parameters for skeleton construction.
///
/// Tolerances are relative: the builder multiplies them by the larger side
/// of the input's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkeletonConfig {
    /// Distance up to which the exterior wavefront is simulated.
    pub exterior_margin: f64,
    /// Tolerance of geometric predicates (parallelism, event ordering).
    pub tolerance: f64,
    /// Distance under which wavefront vertices are treated as coincident.
    pub merge_distance: f64,
    /// Upper bound on resolved events; `None` derives one from the input size.
    pub max_events: Option<usize>,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            exterior_margin: DEFAULT_EXTERIOR_MARGIN,
            tolerance: TOLERANCE,
            merge_distance: MERGE_DISTANCE,
            max_events: None,
        }
    }
}

impl SkeletonConfig {
    /// Sets the exterior margin.
    #[must_use]
    pub fn with_exterior_margin(mut self, margin: f64) -> Self {
        self.exterior_margin = margin;
        self
    }

    /// Sets the predicate tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the vertex merge distance.
    #[must_use]
    pub fn with_merge_distance(mut self, merge_distance: f64) -> Self {
        self.merge_distance = merge_distance;
        self
    }

    /// Sets an explicit event budget.
    #[must_use]
    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.max_events = Some(max_events);
        self
    }

    /// Checks that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first invalid parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.exterior_margin.is_finite() || self.exterior_margin <= 0.0 {
            return Err(ConfigError::InvalidMargin {
                value: self.exterior_margin,
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance {
                value: self.tolerance,
            });
        }
        if !self.merge_distance.is_finite() || self.merge_distance < self.tolerance {
            return Err(ConfigError::InvalidMergeDistance {
                value: self.merge_distance,
            });
        }
        Ok(())
    }

    /// Event budget for a boundary with `vertex_count` vertices.
    #[must_use]
    pub fn event_budget(&self, vertex_count: usize) -> usize {
        self.max_events.unwrap_or_else(|| 32 * vertex_count + 256)
    }
}
