mod builder;
mod event;
mod wavefront;

use crate::config::SkeletonConfig;
use crate::error::Result;
use crate::geometry::Polygon2;
use crate::graph::{Direction, SkeletonGraph};

use builder::SkeletonBuilder;

/// Lifecycle of a skeleton construction, reported through `tracing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Wavefront vertices and edge lines exist; no event resolved yet.
    Initialized,
    /// Events are being resolved.
    Running,
    /// Every wavefront loop collapsed.
    Converged,
    /// The exterior wavefront reached the margin and was truncated.
    MarginExceeded,
    /// The graph is sealed and read-only.
    Finalized,
    /// Construction failed; no graph is produced.
    Invalid,
}

/// Computes the interior or exterior straight skeleton of a polygon by
/// simulating its wavefront.
///
/// Every boundary edge moves at unit speed to its left (interior) or right
/// (exterior). Edge events collapse a wavefront edge; split events let a
/// reflex vertex cut an opposite edge and divide its loop. The interior
/// simulation runs until the wavefront vanishes. The exterior one is
/// truncated at [`SkeletonConfig::exterior_margin`], since it never ends.
///
/// The resulting [`SkeletonGraph`] also records the wavefront between
/// events, so offsets can be read from it without re-running the simulation.
#[derive(Debug)]
pub struct StraightSkeleton2D {
    polygon: Polygon2,
    direction: Direction,
    config: SkeletonConfig,
}

impl StraightSkeleton2D {
    /// Creates a skeleton operation with the default configuration.
    #[must_use]
    pub fn new(polygon: Polygon2, direction: Direction) -> Self {
        Self {
            polygon,
            direction,
            config: SkeletonConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SkeletonConfig) -> Self {
        self.config = config;
        self
    }

    /// Executes the simulation, returning the finished graph.
    ///
    /// # Errors
    ///
    /// Returns `SkeletonError::Config` if the configuration is invalid, or
    /// `GeometryError::Degenerate` if the wavefront cannot be advanced (for
    /// example when the event budget is exhausted or an interior loop is left
    /// without events).
    pub fn execute(&self) -> Result<SkeletonGraph> {
        self.config.validate()?;
        SkeletonBuilder::new(&self.polygon, self.direction, &self.config)?.build()
    }
}
