mod slice;
mod stitch;

pub use slice::ArcSlice;

use tracing::debug;

use crate::error::{QueryError, Result};
use crate::geometry::Polygon2;
use crate::graph::{Direction, SkeletonGraph};

/// Reads the offset polygons at one distance from a finished skeleton.
///
/// The wavefront snapshot active at `distance` lists the skeleton arcs
/// crossing the offset curve in order; slicing each arc at `distance` gives
/// the offset vertices directly. Interior offsets may split into several
/// polygons and vanish at the collapse time. Exterior offsets are limited to
/// the margin the skeleton was built with; larger distances return the
/// offset at the margin.
#[derive(Debug)]
pub struct SkeletonOffset2D<'a> {
    graph: &'a SkeletonGraph,
    distance: f64,
}

impl<'a> SkeletonOffset2D<'a> {
    /// Creates an offset query on `graph`.
    #[must_use]
    pub fn new(graph: &'a SkeletonGraph, distance: f64) -> Self {
        Self { graph, distance }
    }

    /// Executes the query.
    ///
    /// A distance of zero returns the input polygon. Interior distances at or
    /// beyond the collapse time return an empty list.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidDistance` for negative or non-finite
    /// distances.
    pub fn execute(&self) -> Result<Vec<Polygon2>> {
        let Some(distance) = self.effective_distance()? else {
            return Ok(Vec::new());
        };
        if distance <= 0.0 {
            return Ok(vec![self.graph.contour().clone()]);
        }
        let rings = slice::build(self.graph, distance)?;
        Ok(stitch::connect(
            &rings,
            self.graph.direction(),
            self.graph.tolerance(),
        ))
    }

    /// Slice rings at the query distance, one per wavefront loop, without
    /// cleanup.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidDistance` for negative or non-finite
    /// distances.
    pub fn slices(&self) -> Result<Vec<Vec<ArcSlice>>> {
        match self.effective_distance()? {
            Some(distance) => Ok(slice::build(self.graph, distance)?),
            None => Ok(Vec::new()),
        }
    }

    /// Validates the distance and maps it onto the graph's time range.
    /// `None` means the wavefront no longer exists.
    fn effective_distance(&self) -> Result<Option<f64>> {
        let d = self.distance;
        if !d.is_finite() || d < 0.0 {
            return Err(QueryError::InvalidDistance { value: d }.into());
        }
        let horizon = self.graph.horizon();
        match self.graph.direction() {
            Direction::Interior if d >= horizon - self.graph.tolerance() && d > 0.0 => {
                debug!(distance = d, collapse_time = horizon, "offset beyond collapse time");
                Ok(None)
            }
            Direction::Exterior if d > horizon => {
                debug!(distance = d, margin = horizon, "offset clamped to exterior margin");
                Ok(Some(horizon))
            }
            _ if d > 0.0 => Ok(Some(self.snap_to_event(d))),
            _ => Ok(Some(d)),
        }
    }

    /// Moves `d` onto the latest wavefront change in `[d, d + tolerance]`.
    ///
    /// A loop ending just after `d` still carries the edges that collapse at
    /// its end; slicing it there yields zero-width spikes.
    fn snap_to_event(&self, d: f64) -> f64 {
        let tolerance = self.graph.tolerance();
        self.graph
            .fronts()
            .map(|(_, front)| front)
            .filter(|front| !front.capped && front.t_end >= d && front.t_end - d <= tolerance)
            .map(|front| front.t_end)
            .fold(d, f64::max)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::SkeletonConfig;
    use crate::error::SkeletonError;
    use crate::math::Point2;
    use crate::operations::skeleton::StraightSkeleton2D;
    use approx::assert_relative_eq;

    fn graph(raw: &[(f64, f64)], direction: Direction) -> SkeletonGraph {
        let polygon =
            Polygon2::new(raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()).unwrap();
        StraightSkeleton2D::new(polygon, direction)
            .with_config(SkeletonConfig::default())
            .execute()
            .unwrap()
    }

    const SQUARE: [(f64, f64); 4] = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];

    #[test]
    fn interior_square_offset() {
        let g = graph(&SQUARE, Direction::Interior);
        let out = SkeletonOffset2D::new(&g, 3.0).execute().unwrap();
        assert_eq!(out.len(), 1);
        let poly = &out[0];
        assert_eq!(poly.len(), 4);
        assert_relative_eq!(poly.area(), 16.0, epsilon = 1e-9);
        assert_relative_eq!(poly.points()[0].x, 3.0, epsilon = 1e-9);
        assert_relative_eq!(poly.points()[0].y, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_distance_is_identity() {
        let g = graph(&SQUARE, Direction::Exterior);
        let out = SkeletonOffset2D::new(&g, 0.0).execute().unwrap();
        assert_eq!(out, vec![g.contour().clone()]);
    }

    #[test]
    fn collapsed_interior_is_empty() {
        let g = graph(&SQUARE, Direction::Interior);
        assert!(SkeletonOffset2D::new(&g, 5.0).execute().unwrap().is_empty());
        assert!(SkeletonOffset2D::new(&g, 7.5).execute().unwrap().is_empty());
    }

    #[test]
    fn exterior_square_is_mitered() {
        let g = graph(&SQUARE, Direction::Exterior);
        let out = SkeletonOffset2D::new(&g, 1.0).execute().unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].signed_area() > 0.0);
        assert_relative_eq!(out[0].area(), 144.0, epsilon = 1e-9);
        assert_relative_eq!(out[0].points()[0].x, -1.0, epsilon = 1e-9);
        assert_relative_eq!(out[0].points()[0].y, -1.0, epsilon = 1e-9);
    }

    #[test]
    fn exterior_beyond_margin_is_clamped() {
        let g = graph(&SQUARE, Direction::Exterior);
        let at_margin = SkeletonOffset2D::new(&g, 5.0).execute().unwrap();
        let beyond = SkeletonOffset2D::new(&g, 50.0).execute().unwrap();
        assert_eq!(at_margin.len(), 1);
        assert_relative_eq!(beyond[0].area(), at_margin[0].area(), epsilon = 1e-9);
        assert_relative_eq!(beyond[0].area(), 400.0, epsilon = 1e-9);
    }

    #[test]
    fn negative_distance_is_rejected() {
        let g = graph(&SQUARE, Direction::Interior);
        let err = SkeletonOffset2D::new(&g, -1.0).execute().unwrap_err();
        assert!(matches!(
            err,
            SkeletonError::Query(QueryError::InvalidDistance { .. })
        ));
        assert!(SkeletonOffset2D::new(&g, f64::NAN).execute().is_err());
    }

    #[test]
    fn distance_just_below_an_event_reads_the_next_front() {
        // Two 4x4 lobes joined by a 2x1 neck; the neck closes at t = 0.5.
        let g = graph(
            &[
                (0.0, 0.0),
                (4.0, 0.0),
                (4.0, 1.5),
                (6.0, 1.5),
                (6.0, 0.0),
                (10.0, 0.0),
                (10.0, 4.0),
                (6.0, 4.0),
                (6.0, 2.5),
                (4.0, 2.5),
                (4.0, 4.0),
                (0.0, 4.0),
            ],
            Direction::Interior,
        );
        let near = 0.5 - 0.5 * g.tolerance();
        let offset = SkeletonOffset2D::new(&g, near);
        assert_relative_eq!(offset.snap_to_event(near), 0.5, epsilon = 1e-12);
        assert_relative_eq!(offset.snap_to_event(0.25), 0.25);
        assert_eq!(offset.execute().unwrap().len(), 2);
    }

    #[test]
    fn slices_follow_wavefront_order() {
        let g = graph(&SQUARE, Direction::Interior);
        let rings = SkeletonOffset2D::new(&g, 2.0).slices().unwrap();
        assert_eq!(rings.len(), 1);
        let ring = &rings[0];
        for (i, slice) in ring.iter().enumerate() {
            let next = &ring[(i + 1) % ring.len()];
            assert_eq!(slice.right_edge, next.left_edge);
        }
    }
}
