use super::{Point2, Vector2};
use crate::error::GeometryError;

/// Shoelace area of a closed point loop.
///
/// Counter-clockwise loops are positive. Fewer than three points enclose
/// nothing and yield 0.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let doubled: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum();
    doubled / 2.0
}

/// Copy of a closed loop starting at its [`leftmost_bottom_index`] vertex.
///
/// Offset results are rotated this way so that equal polygons compare equal
/// regardless of where the wavefront walk started.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2], eps: f64) -> Vec<Point2> {
    let mut rotated = points.to_vec();
    if !rotated.is_empty() {
        rotated.rotate_left(leftmost_bottom_index(points, eps));
    }
    rotated
}

/// Index of the vertex with the smallest x, ties (within `eps`) broken by
/// the smallest y. An empty slice yields 0.
#[must_use]
pub fn leftmost_bottom_index(points: &[Point2], eps: f64) -> usize {
    points.iter().enumerate().fold(0, |best, (i, p)| {
        let b = &points[best];
        let left = p.x < b.x - eps;
        let level_and_lower = (p.x - b.x).abs() <= eps && p.y < b.y;
        if left || level_and_lower {
            i
        } else {
            best
        }
    })
}

/// Unit direction of the segment `a → b`.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the segment is shorter than `eps`.
pub fn segment_direction(a: &Point2, b: &Point2, eps: f64) -> Result<Vector2, GeometryError> {
    let d = b - a;
    let len = d.norm();
    if len < eps {
        return Err(GeometryError::Degenerate(format!(
            "segment ({}, {}) -> ({}, {}) is shorter than {eps}",
            a.x, a.y, b.x, b.y
        )));
    }
    Ok(d / len)
}

/// `dir` turned a quarter turn counter-clockwise; for a boundary walked
/// counter-clockwise this points into the polygon.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Crossing-number containment test. Points exactly on the boundary may
/// report either side.
#[must_use]
pub fn point_in_polygon(p: &Point2, points: &[Point2]) -> bool {
    if points.len() < 3 {
        return false;
    }
    let crossings = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .filter(|(a, b)| {
            if (a.y > p.y) == (b.y > p.y) {
                return false;
            }
            let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            p.x < x
        })
        .count();
    crossings % 2 == 1
}
