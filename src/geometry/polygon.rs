use crate::error::PolygonError;
use crate::math::intersect_2d::segments_touch_2d;
use crate::math::polygon_2d::{point_in_polygon, rotate_to_canonical_start, signed_area_2d};
use crate::math::{Point2, TOLERANCE};

/// A simple polygon with counter-clockwise orientation.
///
/// Construction through [`Polygon2::new`] validates the input (at least
/// three finite points, no coincident neighbours, no self-intersection,
/// non-zero area) and reverses clockwise input. Offset results are also
/// returned as `Polygon2`; those are produced by the kernel and are not
/// re-validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2 {
    points: Vec<Point2>,
}

impl Polygon2 {
    /// Validates and normalizes a point sequence using the default tolerance.
    ///
    /// # Errors
    ///
    /// Returns a [`PolygonError`] describing the first violated condition.
    pub fn new(points: Vec<Point2>) -> Result<Self, PolygonError> {
        Self::with_tolerance(points, TOLERANCE)
    }

    /// Validates and normalizes a point sequence.
    ///
    /// `tolerance` is relative to the extent of the point set.
    ///
    /// # Errors
    ///
    /// Returns a [`PolygonError`] describing the first violated condition.
    pub fn with_tolerance(mut points: Vec<Point2>, tolerance: f64) -> Result<Self, PolygonError> {
        let n = points.len();
        if n < 3 {
            return Err(PolygonError::TooFewPoints { count: n });
        }
        if let Some(index) = points.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(PolygonError::NonFinite { index });
        }

        let eps = tolerance * extent(&points).max(1.0);
        for i in 0..n {
            let next = (i + 1) % n;
            if (points[next] - points[i]).norm() <= eps {
                return Err(PolygonError::DuplicatePoint { index: i, next });
            }
        }

        check_simple(&points, eps)?;

        let area = signed_area_2d(&points);
        if area.abs() <= eps * eps {
            return Err(PolygonError::ZeroArea);
        }
        if area < 0.0 {
            points.reverse();
        }
        Ok(Self { points })
    }

    /// Wraps kernel output without validation.
    pub(crate) fn from_points_unchecked(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// The polygon vertices in counter-clockwise order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Consumes the polygon, returning its vertices.
    #[must_use]
    pub fn into_points(self) -> Vec<Point2> {
        self.points
    }

    /// Number of vertices (and edges).
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Number of edges; equal to [`Self::len`] for a closed polygon.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the polygon has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns edge `i` as `(start, end)`; edge `i` runs from vertex `i` to
    /// vertex `i + 1` (cyclically).
    #[must_use]
    pub fn edge(&self, i: usize) -> (Point2, Point2) {
        let n = self.points.len();
        (self.points[i % n], self.points[(i + 1) % n])
    }

    /// Signed area; positive for counter-clockwise polygons.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_2d(&self.points)
    }

    /// Absolute enclosed area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Even-odd containment test.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        point_in_polygon(p, &self.points)
    }

    /// Returns the polygon with reversed vertex order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        Self { points }
    }

    /// Returns the polygon rotated to start at its leftmost-bottommost vertex.
    #[must_use]
    pub fn canonical(&self, eps: f64) -> Self {
        Self {
            points: rotate_to_canonical_start(&self.points, eps),
        }
    }

    /// Largest side of the axis-aligned bounding box.
    #[must_use]
    pub fn extent(&self) -> f64 {
        extent(&self.points)
    }
}

fn extent(points: &[Point2]) -> f64 {
    let mut min = points[0];
    let mut max = points[0];
    for p in points {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (max.x - min.x).max(max.y - min.y)
}

/// Rejects crossings between non-adjacent edges and fold-backs between
/// adjacent ones.
fn check_simple(points: &[Point2], eps: f64) -> Result<(), PolygonError> {
    let n = points.len();
    for i in 0..n {
        let (a0, a1) = (points[i], points[(i + 1) % n]);

        // Adjacent edge folding back over this one.
        let next = (i + 1) % n;
        let b1 = points[(i + 2) % n];
        let da = a1 - a0;
        let db = b1 - a1;
        if da.perp(&db).abs() <= eps * da.norm() * db.norm() && da.dot(&db) < 0.0 {
            return Err(PolygonError::SelfIntersection {
                first: i,
                second: next,
            });
        }

        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (b0, b1) = (points[j], points[(j + 1) % n]);
            if segments_touch_2d(&a0, &a1, &b0, &b1, eps) {
                return Err(PolygonError::SelfIntersection {
                    first: i,
                    second: j,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point2> {
        raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn clockwise_input_is_reversed() {
        let poly = Polygon2::new(pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])).unwrap();
        assert!(poly.signed_area() > 0.0);
        assert_eq!(poly.len(), 4);
    }

    #[test]
    fn reversed_flips_orientation() {
        let poly = Polygon2::new(pts(&[(0.0, 0.0), (2.0, 0.0), (0.0, 2.0)])).unwrap();
        let back = poly.reversed();
        assert!((back.signed_area() + 2.0).abs() < 1e-12);
        assert_eq!(back.edge_count(), 3);
        assert_eq!(back.into_points()[0], Point2::new(0.0, 2.0));
    }

    #[test]
    fn too_few_points() {
        let err = Polygon2::new(pts(&[(0.0, 0.0), (1.0, 0.0)])).unwrap_err();
        assert_eq!(err, PolygonError::TooFewPoints { count: 2 });
    }

    #[test]
    fn duplicate_consecutive_point() {
        let err =
            Polygon2::new(pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 1.0)])).unwrap_err();
        assert_eq!(err, PolygonError::DuplicatePoint { index: 1, next: 2 });
    }

    #[test]
    fn closing_duplicate_is_rejected() {
        let err =
            Polygon2::new(pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (0.0, 0.0)])).unwrap_err();
        assert!(matches!(err, PolygonError::DuplicatePoint { index: 3, next: 0 }));
    }

    #[test]
    fn bow_tie_is_self_intersecting() {
        let err =
            Polygon2::new(pts(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)])).unwrap_err();
        assert!(matches!(err, PolygonError::SelfIntersection { .. }));
    }

    #[test]
    fn spike_is_self_intersecting() {
        let err = Polygon2::new(pts(&[(0.0, 0.0), (4.0, 0.0), (2.0, 0.0), (2.0, 3.0)]))
            .unwrap_err();
        assert!(matches!(err, PolygonError::SelfIntersection { .. }));
    }

    #[test]
    fn collinear_points_have_zero_area() {
        let err = Polygon2::new(pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)])).unwrap_err();
        assert!(matches!(
            err,
            PolygonError::ZeroArea | PolygonError::SelfIntersection { .. }
        ));
    }

    #[test]
    fn non_finite_coordinate() {
        let err = Polygon2::new(pts(&[(0.0, 0.0), (f64::NAN, 0.0), (0.0, 1.0)])).unwrap_err();
        assert_eq!(err, PolygonError::NonFinite { index: 1 });
    }

    #[test]
    fn collinear_middle_point_is_accepted() {
        let poly =
            Polygon2::new(pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]))
                .unwrap();
        assert!((poly.area() - 4.0).abs() < 1e-12);
    }
}
