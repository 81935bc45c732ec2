use crate::error::GraphError;
use crate::graph::{ArcId, SkeletonGraph};
use crate::math::Point2;

/// Point where an offset curve crosses one skeleton arc.
///
/// The offset curve between two consecutive slices of a ring runs along the
/// offset line of input edge `right_edge` of the first, which is also
/// `left_edge` of the second.
#[derive(Debug, Clone, Copy)]
pub struct ArcSlice {
    /// Arc being crossed.
    pub arc: ArcId,
    /// Crossing point.
    pub point: Point2,
    /// Input edge before the crossing, in wavefront order.
    pub left_edge: usize,
    /// Input edge after the crossing, in wavefront order.
    pub right_edge: usize,
}

/// Cuts every wavefront snapshot active at `distance`, producing one ring of
/// slices per wavefront loop.
///
/// Snapshot arcs are already in wavefront order, so each ring is closed and
/// needs no endpoint matching.
///
/// # Errors
///
/// Returns an error if a snapshot refers to an arc or node missing from the
/// graph.
pub fn build(graph: &SkeletonGraph, distance: f64) -> Result<Vec<Vec<ArcSlice>>, GraphError> {
    graph
        .fronts_at(distance)
        .map(|front| {
            front
                .arcs
                .iter()
                .map(|&id| slice_arc(graph, id, distance))
                .collect::<Result<Vec<_>, GraphError>>()
        })
        .collect()
}

fn slice_arc(graph: &SkeletonGraph, id: ArcId, distance: f64) -> Result<ArcSlice, GraphError> {
    let arc = graph.arc(id)?;
    Ok(ArcSlice {
        arc: id,
        point: graph.arc_point_at(id, distance)?,
        left_edge: arc.left_edge,
        right_edge: arc.right_edge,
    })
}
