pub mod arc;
pub mod front;
pub mod node;

pub use arc::{ArcData, ArcId, ArcKind};
pub use front::{FrontData, FrontId};
pub use node::{NodeData, NodeId, NodeKind};

use std::fmt;

use slotmap::SlotMap;

use crate::error::GraphError;
use crate::geometry::Polygon2;
use crate::math::Point2;

/// Side of the input boundary a skeleton is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The wavefront shrinks into the polygon.
    Interior,
    /// The wavefront grows away from the polygon, up to a margin.
    Exterior,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interior => f.write_str("interior"),
            Self::Exterior => f.write_str("exterior"),
        }
    }
}

/// A finished straight skeleton.
///
/// Nodes, arcs and wavefront snapshots live in arenas and reference each
/// other through typed IDs. The graph is assembled by the skeleton builder
/// and is read-only afterwards, so one graph can serve any number of
/// concurrent offset queries.
#[derive(Debug, Clone)]
pub struct SkeletonGraph {
    direction: Direction,
    contour: Polygon2,
    tolerance: f64,
    horizon: f64,
    nodes: SlotMap<NodeId, NodeData>,
    arcs: SlotMap<ArcId, ArcData>,
    fronts: SlotMap<FrontId, FrontData>,
    /// Arcs in the order their end nodes were created.
    emitted: Vec<ArcId>,
    edge_events: usize,
    split_events: usize,
}

impl SkeletonGraph {
    /// Creates an empty graph for `contour`. `tolerance` is absolute.
    pub(crate) fn new(direction: Direction, contour: Polygon2, tolerance: f64) -> Self {
        Self {
            direction,
            contour,
            tolerance,
            horizon: 0.0,
            nodes: SlotMap::with_key(),
            arcs: SlotMap::with_key(),
            fronts: SlotMap::with_key(),
            emitted: Vec::new(),
            edge_events: 0,
            split_events: 0,
        }
    }

    // --- Accessors ---

    /// Side of the boundary this skeleton covers.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The normalized input polygon.
    #[must_use]
    pub fn contour(&self) -> &Polygon2 {
        &self.contour
    }

    /// Absolute tolerance used while building the graph.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Largest offset distance the graph describes: the collapse time of an
    /// interior skeleton, or the margin of an exterior one.
    #[must_use]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Time at which the interior wavefront vanished; `None` for exterior graphs.
    #[must_use]
    pub fn collapse_time(&self) -> Option<f64> {
        match self.direction {
            Direction::Interior => Some(self.horizon),
            Direction::Exterior => None,
        }
    }

    /// Number of resolved edge events.
    #[must_use]
    pub fn edge_event_count(&self) -> usize {
        self.edge_events
    }

    /// Number of resolved split events.
    #[must_use]
    pub fn split_event_count(&self) -> usize {
        self.split_events
    }

    /// Returns the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is not part of this graph.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, GraphError> {
        self.nodes
            .get(id)
            .ok_or(GraphError::EntityNotFound("node"))
    }

    /// Returns the arc data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc is not part of this graph.
    pub fn arc(&self, id: ArcId) -> Result<&ArcData, GraphError> {
        self.arcs.get(id).ok_or(GraphError::EntityNotFound("arc"))
    }

    /// Returns the wavefront snapshot, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the front is not part of this graph.
    pub fn front(&self, id: FrontId) -> Result<&FrontData, GraphError> {
        self.fronts
            .get(id)
            .ok_or(GraphError::EntityNotFound("front"))
    }

    /// All nodes.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }

    /// All arcs in emission order (non-decreasing end time).
    pub fn arcs(&self) -> impl Iterator<Item = (ArcId, &ArcData)> {
        self.emitted
            .iter()
            .filter_map(|&id| self.arcs.get(id).map(|arc| (id, arc)))
    }

    /// All wavefront snapshots.
    pub fn fronts(&self) -> impl Iterator<Item = (FrontId, &FrontData)> {
        self.fronts.iter()
    }

    /// Wavefront snapshots describing the boundary at `time`.
    pub fn fronts_at(&self, time: f64) -> impl Iterator<Item = &FrontData> {
        self.fronts
            .values()
            .filter(move |front| front.is_active_at(time))
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of arcs.
    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// The arcs bounding the face swept by input edge `edge`, ordered by
    /// start time.
    #[must_use]
    pub fn edge_arcs(&self, edge: usize) -> Vec<ArcId> {
        let mut chain: Vec<(ArcId, &ArcData)> = self
            .arcs()
            .filter(|(_, arc)| arc.bounds_edge(edge))
            .collect();
        chain.sort_by(|(_, a), (_, b)| {
            a.t_start
                .total_cmp(&b.t_start)
                .then(a.t_end.total_cmp(&b.t_end))
        });
        chain.into_iter().map(|(id, _)| id).collect()
    }

    /// Position of the vertex tracing `id` at `time`, interpolated between
    /// the arc's end nodes.
    ///
    /// # Errors
    ///
    /// Returns an error if the arc or one of its nodes is missing.
    pub fn arc_point_at(&self, id: ArcId, time: f64) -> Result<Point2, GraphError> {
        let arc = self.arc(id)?;
        let start = self.node(arc.start)?.point;
        let end = self.node(arc.end)?.point;
        let span = arc.t_end - arc.t_start;
        if span <= 0.0 {
            return Ok(end);
        }
        let s = ((time - arc.t_start) / span).clamp(0.0, 1.0);
        Ok(start + (end - start) * s)
    }

    // --- Construction (builder only) ---

    pub(crate) fn add_node(&mut self, point: Point2, time: f64, kind: NodeKind) -> NodeId {
        self.nodes.insert(NodeData::new(point, time, kind))
    }

    /// Starts an arc at `start`; its end is set by [`Self::close_arc`].
    pub(crate) fn open_arc(
        &mut self,
        start: NodeId,
        t_start: f64,
        left_edge: usize,
        right_edge: usize,
    ) -> ArcId {
        self.arcs.insert(ArcData {
            start,
            end: start,
            t_start,
            t_end: f64::INFINITY,
            left_edge,
            right_edge,
            kind: ArcKind::Bisector,
        })
    }

    pub(crate) fn close_arc(
        &mut self,
        id: ArcId,
        end: NodeId,
        t_end: f64,
    ) -> Result<(), GraphError> {
        let tolerance = self.tolerance;
        let arc = self
            .arcs
            .get_mut(id)
            .ok_or(GraphError::EntityNotFound("arc"))?;
        if arc.t_end.is_finite() {
            return Err(GraphError::InvalidGraph("arc closed twice".to_owned()));
        }
        arc.end = end;
        arc.t_end = t_end;
        if t_end - arc.t_start <= tolerance {
            arc.kind = ArcKind::Ridge;
        }
        self.emitted.push(id);
        Ok(())
    }

    pub(crate) fn add_border_arc(&mut self, start: NodeId, end: NodeId, time: f64, edge: usize) {
        let id = self.arcs.insert(ArcData {
            start,
            end,
            t_start: time,
            t_end: time,
            left_edge: edge,
            right_edge: edge,
            kind: ArcKind::Border,
        });
        self.emitted.push(id);
    }

    pub(crate) fn open_front(&mut self, arcs: Vec<ArcId>, t_start: f64) -> FrontId {
        self.fronts.insert(FrontData {
            arcs,
            t_start,
            t_end: f64::INFINITY,
            capped: false,
        })
    }

    pub(crate) fn close_front(
        &mut self,
        id: FrontId,
        t_end: f64,
        capped: bool,
    ) -> Result<(), GraphError> {
        let front = self
            .fronts
            .get_mut(id)
            .ok_or(GraphError::EntityNotFound("front"))?;
        front.t_end = t_end;
        front.capped = capped;
        Ok(())
    }

    pub(crate) fn record_edge_event(&mut self) {
        self.edge_events += 1;
    }

    pub(crate) fn record_split_event(&mut self) {
        self.split_events += 1;
    }

    /// Seals the graph. Every arc and front must be closed.
    pub(crate) fn finalize(&mut self, horizon: f64) -> Result<(), GraphError> {
        if self.arcs.values().any(|arc| !arc.t_end.is_finite()) {
            return Err(GraphError::InvalidGraph("unterminated skeleton arc".to_owned()));
        }
        if self.fronts.values().any(|front| !front.t_end.is_finite()) {
            return Err(GraphError::InvalidGraph("unterminated wavefront".to_owned()));
        }
        // Snapshots that never lasted carry no geometry.
        self.fronts
            .retain(|_, front| front.capped || front.t_end > front.t_start);
        self.horizon = horizon;
        Ok(())
    }
}
