//! End-to-end tests for the skeleton manager: build, offset and export on
//! hand-checked polygons.

#![allow(clippy::unwrap_used)]

use approx::assert_relative_eq;
use skelset::error::{PolygonError, QueryError};
use skelset::math::Point2;
use skelset::{Direction, Polygon2, SkeletonConfig, SkeletonError, SkeletonManager};

fn points(raw: &[(f64, f64)]) -> Vec<Point2> {
    raw.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}

fn manager(raw: &[(f64, f64)]) -> SkeletonManager {
    SkeletonManager::build(&points(raw)).unwrap()
}

fn total_area(polygons: &[Polygon2]) -> f64 {
    polygons.iter().map(Polygon2::signed_area).sum()
}

const SQUARE: [(f64, f64); 4] = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];

const RECTANGLE: [(f64, f64); 4] = [(0.0, 0.0), (10.0, 0.0), (10.0, 4.0), (0.0, 4.0)];

const L_SHAPE: [(f64, f64); 6] = [
    (0.0, 0.0),
    (6.0, 0.0),
    (6.0, 2.0),
    (2.0, 2.0),
    (2.0, 6.0),
    (0.0, 6.0),
];

/// Two 4x4 lobes joined by a 2x1 neck.
const DUMBBELL: [(f64, f64); 12] = [
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
];

/// Seven bars of width 2 on a common base. Every bar top collapses at t = 1.
const HISTOGRAM: [(f64, f64); 16] = [
    (0.0, 0.0),
    (14.0, 0.0),
    (14.0, 2.0),
    (12.0, 2.0),
    (12.0, 6.0),
    (10.0, 6.0),
    (10.0, 3.0),
    (8.0, 3.0),
    (8.0, 5.0),
    (6.0, 5.0),
    (6.0, 2.0),
    (4.0, 2.0),
    (4.0, 5.0),
    (2.0, 5.0),
    (2.0, 3.0),
    (0.0, 3.0),
];

/// A 10x10 cup with unit walls whose mouth narrows to width 2.
const CUP: [(f64, f64); 12] = [
    (0.0, 0.0),
    (10.0, 0.0),
    (10.0, 10.0),
    (6.0, 10.0),
    (6.0, 9.0),
    (9.0, 9.0),
    (9.0, 1.0),
    (1.0, 1.0),
    (1.0, 9.0),
    (4.0, 9.0),
    (4.0, 10.0),
    (0.0, 10.0),
];

fn rotated(raw: &[(f64, f64)], angle: f64, scale: f64) -> Vec<Point2> {
    let (sin, cos) = angle.sin_cos();
    raw.iter()
        .map(|&(x, y)| {
            Point2::new(
                scale * (cos * x - sin * y) + 3.0,
                scale * (sin * x + cos * y) - 7.0,
            )
        })
        .collect()
}

// =============================================================================
// Interior
// =============================================================================

#[test]
fn square_interior_offset_and_apex() {
    let m = manager(&SQUARE);
    let out = m.offset_polygon(3.0, Direction::Interior).unwrap();
    assert_eq!(out.len(), 1);
    let expected = [(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)];
    for (p, &(x, y)) in out[0].points().iter().zip(&expected) {
        assert_relative_eq!(p.x, x, epsilon = 1e-9);
        assert_relative_eq!(p.y, y, epsilon = 1e-9);
    }

    let info = m.skeleton_info(Direction::Interior).unwrap();
    assert_eq!(info.edges.len(), 4);
    assert!(info
        .edges
        .iter()
        .all(|(_, end)| (end - Point2::new(5.0, 5.0)).norm() < 1e-9));
}

#[test]
fn rectangle_collapses_onto_ridge() {
    let m = manager(&RECTANGLE);
    let graph = m.skeleton(Direction::Interior).unwrap();
    assert_relative_eq!(graph.collapse_time().unwrap(), 2.0, epsilon = 1e-9);

    let out = m.offset_polygon(1.0, Direction::Interior).unwrap();
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out[0].area(), 16.0, epsilon = 1e-9);

    assert!(m.offset_polygon(2.0, Direction::Interior).unwrap().is_empty());

    let info = m.skeleton_info(Direction::Interior).unwrap();
    assert!(info.edges.iter().any(|(a, b)| {
        let (lo, hi) = if a.x < b.x { (a, b) } else { (b, a) };
        (lo - Point2::new(2.0, 2.0)).norm() < 1e-9 && (hi - Point2::new(8.0, 2.0)).norm() < 1e-9
    }));
}

#[test]
fn l_shape_resolves_a_split() {
    let m = manager(&L_SHAPE);
    let graph = m.skeleton(Direction::Interior).unwrap();
    assert!(graph.split_event_count() >= 1);
    assert_relative_eq!(graph.collapse_time().unwrap(), 1.0, epsilon = 1e-9);

    let out = m.offset_polygon(0.5, Direction::Interior).unwrap();
    assert_eq!(out.len(), 1);
    assert_relative_eq!(out[0].area(), 9.0, epsilon = 1e-9);
    assert!(out[0]
        .points()
        .iter()
        .any(|p| (p - Point2::new(1.5, 1.5)).norm() < 1e-9));
}

#[test]
fn dumbbell_splits_into_two_polygons() {
    let m = manager(&DUMBBELL);
    let graph = m.skeleton(Direction::Interior).unwrap();
    assert_eq!(graph.split_event_count(), 1);
    assert_relative_eq!(graph.collapse_time().unwrap(), 2.0, epsilon = 1e-9);

    let before = m.offset_polygon(0.25, Direction::Interior).unwrap();
    assert_eq!(before.len(), 1);

    let after = m.offset_polygon(1.0, Direction::Interior).unwrap();
    assert_eq!(after.len(), 2);
    assert_relative_eq!(after[0].area(), 4.0, epsilon = 1e-9);
    assert_relative_eq!(after[1].area(), 4.0, epsilon = 1e-9);
    assert!(after[0].points()[0].x < after[1].points()[0].x);
    assert_relative_eq!(after[0].points()[0].x, 1.0, epsilon = 1e-9);
    assert_relative_eq!(after[1].points()[0].x, 7.0, epsilon = 1e-9);

    // The neck collapses into a ridge along y = 2.
    let info = m.skeleton_info(Direction::Interior).unwrap();
    assert!(info.edges.iter().any(|(a, b)| {
        let on_axis = (a.y - 2.0).abs() < 1e-9 && (b.y - 2.0).abs() < 1e-9;
        on_axis && ((a.x - b.x).abs() - 3.0).abs() < 1e-9
    }));
}

#[test]
fn offsets_at_event_times_are_simple() {
    for angle in [0.3, 1.1, 2.6] {
        let m = SkeletonManager::build(&rotated(&HISTOGRAM, angle, 1.7)).unwrap();
        let graph = m.skeleton(Direction::Interior).unwrap();
        let horizon = graph.horizon();
        let mut times: Vec<f64> = graph
            .nodes()
            .map(|(_, node)| node.time)
            .filter(|&t| t > 0.0 && t < horizon)
            .collect();
        times.push(horizon / 2.0);
        for d in times {
            for polygon in m.offset_polygon(d, Direction::Interior).unwrap() {
                let check = Polygon2::new(polygon.points().to_vec());
                assert!(check.is_ok(), "angle {angle}, d = {d}: {check:?}");
            }
        }
    }
}

#[test]
fn rebuilding_gives_identical_results() {
    let first = manager(&DUMBBELL);
    let second = manager(&DUMBBELL);
    for direction in [Direction::Interior, Direction::Exterior] {
        assert_eq!(
            first.skeleton_info(direction).unwrap(),
            second.skeleton_info(direction).unwrap()
        );
        for d in [0.3, 0.5, 1.0, 1.7] {
            assert_eq!(
                first.offset_polygon(d, direction).unwrap(),
                second.offset_polygon(d, direction).unwrap()
            );
        }
    }
}

#[test]
fn edge_faces_are_bounded_by_their_arcs() {
    let m = manager(&RECTANGLE);
    let graph = m.skeleton(Direction::Interior).unwrap();
    // The bottom face is a trapezoid: two corner bisectors and the ridge.
    let chain = graph.edge_arcs(0);
    assert_eq!(chain.len(), 3);
    for id in chain {
        let arc = graph.arc(id).unwrap();
        assert!(arc.bounds_edge(0));
    }
    // The short sides only see their corner bisectors.
    assert_eq!(graph.edge_arcs(1).len(), 2);
    assert!(graph.fronts().count() >= 1);
}

#[test]
fn offsets_at_collapse_and_beyond_are_empty() {
    let m = manager(&SQUARE);
    for d in [5.0, 5.5, 1e6] {
        assert!(m.offset_polygon(d, Direction::Interior).unwrap().is_empty());
    }
}

// =============================================================================
// Exterior
// =============================================================================

#[test]
fn square_exterior_is_mitered() {
    let m = manager(&SQUARE);
    let out = m.offset_polygon(2.0, Direction::Exterior).unwrap();
    assert_eq!(out.len(), 1);
    let expected = [(-2.0, -2.0), (12.0, -2.0), (12.0, 12.0), (-2.0, 12.0)];
    for (p, &(x, y)) in out[0].points().iter().zip(&expected) {
        assert_relative_eq!(p.x, x, epsilon = 1e-9);
        assert_relative_eq!(p.y, y, epsilon = 1e-9);
    }
}

#[test]
fn l_shape_exterior_area_grows_quadratically() {
    let m = manager(&L_SHAPE);
    // Mitered offset of an orthogonal polygon: A + P d + 4 d^2.
    for d in [0.5, 1.0, 3.0] {
        let out = m.offset_polygon(d, Direction::Exterior).unwrap();
        assert_eq!(out.len(), 1);
        assert_relative_eq!(out[0].area(), 20.0 + 24.0 * d + 4.0 * d * d, epsilon = 1e-9);
    }
}

#[test]
fn exterior_closes_a_pocket_into_a_hole() {
    let m = manager(&CUP);
    let graph = m.skeleton(Direction::Exterior).unwrap();
    assert!(graph.split_event_count() >= 1);

    let open = m.offset_polygon(0.5, Direction::Exterior).unwrap();
    assert_eq!(open.len(), 1);
    assert_relative_eq!(open[0].area(), 70.0, epsilon = 1e-9);

    // The mouth has closed: a 13x13 outline around a clockwise 5x5 hole.
    let closed = m.offset_polygon(1.5, Direction::Exterior).unwrap();
    assert_eq!(closed.len(), 2);
    assert_relative_eq!(closed[0].signed_area(), 169.0, epsilon = 1e-9);
    assert_relative_eq!(closed[1].signed_area(), -25.0, epsilon = 1e-9);
    assert_relative_eq!(total_area(&closed), 144.0, epsilon = 1e-9);
    assert!(closed[0].contains_point(&closed[1].points()[0]));
}

#[test]
fn exterior_respects_configured_margin() {
    let config = SkeletonConfig::default().with_exterior_margin(1.0);
    let m = SkeletonManager::build_with_config(&points(&SQUARE), config).unwrap();
    let capped = m.offset_polygon(4.0, Direction::Exterior).unwrap();
    assert_relative_eq!(total_area(&capped), 144.0, epsilon = 1e-9);
}

#[test]
fn zero_distance_returns_the_input() {
    let m = manager(&L_SHAPE);
    for direction in [Direction::Interior, Direction::Exterior] {
        let out = m.offset_polygon(0.0, direction).unwrap();
        assert_eq!(out, vec![m.polygon().clone()]);
    }
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn clockwise_input_is_normalized() {
    let mut raw = SQUARE.to_vec();
    raw.reverse();
    let m = manager(&raw);
    assert!(m.polygon().signed_area() > 0.0);
    let out = m.offset_polygon(1.0, Direction::Interior).unwrap();
    assert_relative_eq!(out[0].area(), 64.0, epsilon = 1e-9);
}

#[test]
fn degenerate_input_is_rejected() {
    let cases: [&[(f64, f64)]; 3] = [
        &[(0.0, 0.0), (1.0, 0.0)],
        &[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)],
        &[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
    ];
    for raw in cases {
        let err = SkeletonManager::build(&points(raw)).unwrap_err();
        assert!(matches!(err, SkeletonError::Polygon(_)), "{raw:?}: {err}");
    }
    let err = SkeletonManager::build(&points(&[(0.0, 0.0), (1.0, 0.0)])).unwrap_err();
    assert!(matches!(
        err,
        SkeletonError::Polygon(PolygonError::TooFewPoints { count: 2 })
    ));
}

#[test]
fn invalid_distance_is_rejected() {
    let m = manager(&SQUARE);
    for d in [-0.1, f64::NAN, f64::INFINITY] {
        let err = m.offset_polygon(d, Direction::Exterior).unwrap_err();
        assert!(matches!(
            err,
            SkeletonError::Query(QueryError::InvalidDistance { .. })
        ));
    }
}

#[test]
fn invalid_config_is_rejected() {
    let config = SkeletonConfig::default().with_exterior_margin(f64::NAN);
    let err = SkeletonManager::build_with_config(&points(&SQUARE), config).unwrap_err();
    assert!(matches!(err, SkeletonError::Config(_)));
}

#[test]
fn manager_is_shareable_across_threads() {
    let m = std::sync::Arc::new(manager(&DUMBBELL));
    let handles: Vec<_> = (1..=4)
        .map(|i| {
            let m = std::sync::Arc::clone(&m);
            std::thread::spawn(move || {
                m.offset_polygon(f64::from(i) * 0.3, Direction::Interior)
                    .unwrap()
                    .len()
            })
        })
        .collect();
    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![1, 2, 2, 2]);
}
