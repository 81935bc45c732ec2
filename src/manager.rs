use tracing::{debug, warn};

use crate::config::SkeletonConfig;
use crate::error::{QueryError, Result, SkeletonError};
use crate::geometry::Polygon2;
use crate::graph::{Direction, SkeletonGraph};
use crate::math::Point2;
use crate::operations::offset::SkeletonOffset2D;
use crate::operations::query::SkeletonInfo;
use crate::operations::skeleton::StraightSkeleton2D;

/// Owns one polygon and both of its skeletons.
///
/// Both skeletons are built up front. A failure in one direction is kept
/// and reported by every query for that direction, while the other
/// direction stays usable. After construction the manager is read-only and
/// can be shared between threads.
#[derive(Debug)]
pub struct SkeletonManager {
    polygon: Polygon2,
    config: SkeletonConfig,
    interior: std::result::Result<SkeletonGraph, SkeletonError>,
    exterior: std::result::Result<SkeletonGraph, SkeletonError>,
}

impl SkeletonManager {
    /// Validates `points` and builds both skeletons with the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns `SkeletonError::Polygon` if the points do not form a simple
    /// polygon.
    pub fn build(points: &[Point2]) -> Result<Self> {
        Self::build_with_config(points, SkeletonConfig::default())
    }

    /// Validates `points` and builds both skeletons with `config`.
    ///
    /// # Errors
    ///
    /// Returns `SkeletonError::Config` for an invalid configuration or
    /// `SkeletonError::Polygon` if the points do not form a simple polygon.
    /// Skeleton construction failures are not returned here; they surface
    /// from the queries of the affected direction.
    pub fn build_with_config(points: &[Point2], config: SkeletonConfig) -> Result<Self> {
        config.validate()?;
        let polygon = Polygon2::with_tolerance(points.to_vec(), config.tolerance)?;

        let build = |direction| {
            let result = StraightSkeleton2D::new(polygon.clone(), direction)
                .with_config(config)
                .execute();
            if let Err(err) = &result {
                warn!(%direction, error = %err, "skeleton unavailable");
            }
            result
        };
        let interior = build(Direction::Interior);
        let exterior = build(Direction::Exterior);

        debug!(
            vertices = polygon.len(),
            interior = interior.is_ok(),
            exterior = exterior.is_ok(),
            "skeleton manager ready"
        );
        Ok(Self {
            polygon,
            config,
            interior,
            exterior,
        })
    }

    /// The validated, counter-clockwise input polygon.
    #[must_use]
    pub fn polygon(&self) -> &Polygon2 {
        &self.polygon
    }

    /// Configuration the skeletons were built with.
    #[must_use]
    pub fn config(&self) -> &SkeletonConfig {
        &self.config
    }

    /// The skeleton for `direction`.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::SkeletonUnavailable` if that skeleton failed to
    /// build.
    pub fn skeleton(&self, direction: Direction) -> Result<&SkeletonGraph> {
        let slot = match direction {
            Direction::Interior => &self.interior,
            Direction::Exterior => &self.exterior,
        };
        slot.as_ref().map_err(|err| {
            QueryError::SkeletonUnavailable {
                direction,
                reason: err.to_string(),
            }
            .into()
        })
    }

    /// Offset polygons at `distance` on the given side.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidDistance` for negative or non-finite
    /// distances and `QueryError::SkeletonUnavailable` if the skeleton for
    /// `direction` failed to build.
    pub fn offset_polygon(&self, distance: f64, direction: Direction) -> Result<Vec<Polygon2>> {
        SkeletonOffset2D::new(self.skeleton(direction)?, distance).execute()
    }

    /// Node positions and skeleton edges on the given side.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::SkeletonUnavailable` if the skeleton for
    /// `direction` failed to build.
    pub fn skeleton_info(&self, direction: Direction) -> Result<SkeletonInfo> {
        Ok(SkeletonInfo::from_graph(self.skeleton(direction)?)?)
    }
}
