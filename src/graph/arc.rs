use super::node::NodeId;

slotmap::new_key_type! {
    /// Unique identifier for an arc in a skeleton graph.
    pub struct ArcId;
}

/// Role of a skeleton arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcKind {
    /// Trajectory of a wavefront vertex over a non-empty time interval.
    Bisector,
    /// Instantaneous connection between two nodes created at the same time,
    /// e.g. the center line of a rectangle.
    Ridge,
    /// Synthetic segment joining two frame nodes of a margin-capped wavefront.
    Border,
}

/// Data associated with a skeleton arc.
///
/// A bisector arc is traced by one wavefront vertex: it leaves `start` at
/// `t_start` and reaches `end` at `t_end` with constant velocity. It
/// separates the faces of the two input edges `left_edge` and `right_edge`
/// (the edges before and after the vertex in wavefront order).
#[derive(Debug, Clone)]
pub struct ArcData {
    /// Node the arc starts from.
    pub start: NodeId,
    /// Node the arc ends at.
    pub end: NodeId,
    /// Creation time of `start`.
    pub t_start: f64,
    /// Creation time of `end`.
    pub t_end: f64,
    /// Input edge preceding the tracing vertex.
    pub left_edge: usize,
    /// Input edge following the tracing vertex.
    pub right_edge: usize,
    /// Role of the arc.
    pub kind: ArcKind,
}

impl ArcData {
    /// Returns `true` if the arc separates the face of input edge `edge`.
    #[must_use]
    pub fn bounds_edge(&self, edge: usize) -> bool {
        self.left_edge == edge || self.right_edge == edge
    }
}
