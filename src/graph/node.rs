use crate::math::Point2;

slotmap::new_key_type! {
    /// Unique identifier for a node in a skeleton graph.
    pub struct NodeId;
}

/// Origin of a skeleton node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// An input polygon vertex at time 0.
    Contour,
    /// A point where a wavefront event was resolved.
    Skeleton,
    /// A vertex of the exterior wavefront truncated at the margin.
    Frame,
}

/// Data associated with a skeleton node.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Position of the node.
    pub point: Point2,
    /// Offset time (distance from the input boundary) at which the node was created.
    pub time: f64,
    /// What created the node.
    pub kind: NodeKind,
}

impl NodeData {
    /// Creates a new node.
    #[must_use]
    pub fn new(point: Point2, time: f64, kind: NodeKind) -> Self {
        Self { point, time, kind }
    }
}
