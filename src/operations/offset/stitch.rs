use crate::geometry::Polygon2;
use crate::graph::Direction;
use crate::math::polygon_2d::signed_area_2d;
use crate::math::Point2;

use super::slice::ArcSlice;

/// Turns slice rings into output polygons.
///
/// Consecutive points closer than `eps` are merged (the ring of a loop about
/// to collapse carries several), fold-back vertices whose edges double back
/// on each other are removed, and rings left with fewer than three points or
/// no area are dropped. Exterior rings are walked clockwise and are
/// reversed. Each polygon starts at its leftmost-bottom vertex, and the list
/// is ordered by that vertex.
#[must_use]
pub fn connect(rings: &[Vec<ArcSlice>], direction: Direction, eps: f64) -> Vec<Polygon2> {
    let mut polygons: Vec<Polygon2> = rings
        .iter()
        .filter_map(|ring| {
            let mut points = strip_fold_backs(dedup_ring(ring.iter().map(|s| s.point), eps), eps);
            if points.len() < 3 || signed_area_2d(&points).abs() <= eps * eps {
                return None;
            }
            if direction == Direction::Exterior {
                points.reverse();
            }
            Some(Polygon2::from_points_unchecked(points).canonical(eps))
        })
        .collect();

    polygons.sort_by(|a, b| {
        let (pa, pb) = (a.points()[0], b.points()[0]);
        pa.x.total_cmp(&pb.x).then(pa.y.total_cmp(&pb.y))
    });
    polygons
}

fn dedup_ring(points: impl Iterator<Item = Point2>, eps: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::new();
    for p in points {
        if out.last().is_some_and(|q| (p - q).norm() <= eps) {
            continue;
        }
        out.push(p);
    }
    while out.len() > 1 && out.first().zip(out.last()).is_some_and(|(a, b)| (a - b).norm() <= eps) {
        out.pop();
    }
    out
}

/// Removes spike tips until no vertex has antiparallel incident edges.
fn strip_fold_backs(mut points: Vec<Point2>, eps: f64) -> Vec<Point2> {
    while points.len() >= 3 {
        let n = points.len();
        let tip = (0..n).find(|&i| {
            let a = points[i] - points[(i + n - 1) % n];
            let b = points[(i + 1) % n] - points[i];
            a.dot(&b) < 0.0 && a.perp(&b).abs() <= eps * a.norm() * b.norm()
        });
        let Some(tip) = tip else {
            break;
        };
        points.remove(tip);
        points = dedup_ring(points.into_iter(), eps);
    }
    points
}
