use crate::error::GraphError;
use crate::graph::{ArcKind, SkeletonGraph};
use crate::math::Point2;

/// Flat export of a skeleton: every node position and every skeleton edge
/// as a segment.
///
/// `Border` arcs of a capped exterior wavefront and zero-length ridges are
/// left out; the input boundary is not repeated as edges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkeletonInfo {
    /// Node positions in creation order (contour nodes first).
    pub vertices: Vec<Point2>,
    /// Skeleton edges as `(start, end)` in emission order.
    pub edges: Vec<(Point2, Point2)>,
}

impl SkeletonInfo {
    /// Collects the export data from `graph`.
    ///
    /// # Errors
    ///
    /// Returns an error if an arc refers to a node missing from the graph.
    pub fn from_graph(graph: &SkeletonGraph) -> Result<Self, GraphError> {
        let vertices = graph.nodes().map(|(_, node)| node.point).collect();

        let mut edges = Vec::new();
        for (_, arc) in graph.arcs() {
            if arc.kind == ArcKind::Border {
                continue;
            }
            let start = graph.node(arc.start)?.point;
            let end = graph.node(arc.end)?.point;
            if (end - start).norm() <= graph.tolerance() {
                continue;
            }
            edges.push((start, end));
        }
        Ok(Self { vertices, edges })
    }

    /// Total length of all skeleton edges.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.edges.iter().map(|(a, b)| (b - a).norm()).sum()
    }
}
