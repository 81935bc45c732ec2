use tracing::{debug, trace, warn};

use super::event::{EventKind, EventQueue};
use super::wavefront::{
    EdgeLine, LoopData, LoopId, MotionError, VertexId, Wavefront, WavefrontVertex,
};
use super::BuildState;
use crate::config::SkeletonConfig;
use crate::error::{GeometryError, GraphError, Result};
use crate::geometry::Polygon2;
use crate::graph::{ArcId, Direction, NodeId, NodeKind, SkeletonGraph};
use crate::math::Point2;

/// A vertex about to join the wavefront at the current time.
///
/// `prev` and `next` are live vertices of the same loop; the pending vertex
/// is linked between them once its neighbourhood is settled.
#[derive(Debug, Clone, Copy)]
struct Pending {
    node: NodeId,
    point: Point2,
    left_edge: usize,
    right_edge: usize,
    prev: VertexId,
    next: VertexId,
}

/// Kinetic simulation producing one [`SkeletonGraph`].
pub(crate) struct SkeletonBuilder {
    graph: SkeletonGraph,
    front: Wavefront,
    queue: EventQueue,
    boundary: Vec<Point2>,
    state: BuildState,
    now: f64,
    horizon: f64,
    eps: f64,
    budget: usize,
    resolved: usize,
}

impl SkeletonBuilder {
    pub fn new(polygon: &Polygon2, direction: Direction, config: &SkeletonConfig) -> Result<Self> {
        let scale = polygon.extent().max(1.0);
        let eps = config.tolerance * scale;
        let merge = config.merge_distance * scale;

        let n = polygon.len();
        let (boundary, sources): (Vec<Point2>, Vec<usize>) = match direction {
            Direction::Interior => (polygon.points().to_vec(), (0..n).collect()),
            Direction::Exterior => {
                // Walking the loop clockwise puts the outside on the left.
                // Reversed edge i is input edge n - 2 - i (mod n).
                let mut points = polygon.points().to_vec();
                points.reverse();
                (points, (0..n).map(|i| (2 * n - 2 - i) % n).collect())
            }
        };
        let edges = (0..n)
            .map(|i| EdgeLine::through(&boundary[i], &boundary[(i + 1) % n], sources[i], eps))
            .collect::<std::result::Result<Vec<_>, GeometryError>>()?;

        let horizon = match direction {
            Direction::Interior => f64::INFINITY,
            Direction::Exterior => config.exterior_margin,
        };

        Ok(Self {
            graph: SkeletonGraph::new(direction, polygon.clone(), eps),
            front: Wavefront::new(edges, config.tolerance, eps, merge),
            queue: EventQueue::new(),
            boundary,
            state: BuildState::Initialized,
            now: 0.0,
            horizon,
            eps,
            budget: config.event_budget(n),
            resolved: 0,
        })
    }

    /// Runs the simulation to completion and returns the sealed graph.
    pub fn build(mut self) -> Result<SkeletonGraph> {
        let direction = self.graph.direction();
        debug!(
            %direction,
            vertices = self.boundary.len(),
            budget = self.budget,
            "building straight skeleton"
        );

        let outcome = self
            .initialize()
            .and_then(|()| self.run())
            .and_then(|()| self.seal());
        if let Err(err) = outcome {
            self.transition(BuildState::Invalid);
            warn!(%direction, error = %err, "skeleton construction failed");
            return Err(err);
        }

        debug!(
            %direction,
            nodes = self.graph.node_count(),
            arcs = self.graph.arc_count(),
            edge_events = self.graph.edge_event_count(),
            split_events = self.graph.split_event_count(),
            horizon = self.graph.horizon(),
            unresolved = self.queue.len(),
            "skeleton finalized"
        );
        Ok(self.graph)
    }

    fn transition(&mut self, state: BuildState) {
        debug!(from = ?self.state, to = ?state, "build state");
        self.state = state;
    }

    // --- Setup ---

    fn initialize(&mut self) -> Result<()> {
        let n = self.boundary.len();
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let left = (i + n - 1) % n;
            let (velocity, reflex) = self.front.motion(left, i)?;
            let point = self.boundary[i];
            let node = self.graph.add_node(point, 0.0, NodeKind::Contour);
            let arc = self.open_arc(node, left, i)?;
            ids.push(self.front.vertices.insert(WavefrontVertex {
                origin: point,
                birth: 0.0,
                velocity,
                left_edge: left,
                right_edge: i,
                prev: VertexId::default(),
                next: VertexId::default(),
                reflex,
                arc,
                loop_id: LoopId::default(),
                generation: 0,
            }));
        }
        for i in 0..n {
            let vertex = self.front.vertex_mut(ids[i])?;
            vertex.prev = ids[(i + n - 1) % n];
            vertex.next = ids[(i + 1) % n];
        }
        self.open_loop(ids[0])
    }

    /// Opens an arc at `node` for a vertex between wavefront edges `left`
    /// and `right`, labelled with the input edges they come from.
    fn open_arc(&mut self, node: NodeId, left: usize, right: usize) -> Result<ArcId> {
        let left = self.front.edge(left)?.source;
        let right = self.front.edge(right)?.source;
        Ok(self.graph.open_arc(node, self.now, left, right))
    }

    /// Records the loop containing `seed` as a new wavefront snapshot and
    /// schedules the next event of each member.
    fn open_loop(&mut self, seed: VertexId) -> Result<()> {
        let members = self.front.members(seed)?;
        let arcs = members
            .iter()
            .map(|&id| self.front.vertex(id).map(|v| v.arc))
            .collect::<std::result::Result<Vec<_>, GraphError>>()?;
        let front = self.graph.open_front(arcs, self.now);
        let loop_id = self.front.loops.insert(LoopData { front, seed });

        for &id in &members {
            let vertex = self.front.vertex_mut(id)?;
            vertex.loop_id = loop_id;
            vertex.generation += 1;
        }
        for &id in &members {
            if let Some(event) = self.front.next_event(id, &members, self.now)? {
                self.queue.push(event);
            }
        }
        trace!(time = self.now, members = members.len(), "opened wavefront loop");
        Ok(())
    }

    fn close_loop(&mut self, loop_id: LoopId) -> Result<()> {
        if let Some(data) = self.front.loops.remove(loop_id) {
            self.graph.close_front(data.front, self.now, false)?;
        }
        Ok(())
    }

    // --- Event loop ---

    fn run(&mut self) -> Result<()> {
        self.transition(BuildState::Running);
        loop {
            let front = &self.front;
            let Some(event) = self
                .queue
                .pop_batch(self.eps, self.horizon, |e| front.is_live(e))
            else {
                break;
            };

            self.resolved += 1;
            if self.resolved > self.budget {
                return Err(GeometryError::Degenerate(format!(
                    "event budget of {} exhausted",
                    self.budget
                ))
                .into());
            }
            self.now = self.now.max(event.time);

            match event.kind {
                EventKind::Edge => self.resolve_edge(event.vertex)?,
                EventKind::Split { segment_start } => {
                    self.resolve_split(event.vertex, segment_start)?;
                }
            }
        }

        if self.front.loops.is_empty() {
            self.transition(BuildState::Converged);
            return Ok(());
        }
        match self.graph.direction() {
            Direction::Interior => Err(GeometryError::Degenerate(format!(
                "{} wavefront loops remain without pending events",
                self.front.loops.len()
            ))
            .into()),
            Direction::Exterior => {
                self.transition(BuildState::MarginExceeded);
                self.cap()
            }
        }
    }

    fn resolve_edge(&mut self, v_id: VertexId) -> Result<()> {
        let t = self.now;
        let vertex = self.front.vertex(v_id)?;
        let (w_id, loop_id) = (vertex.next, vertex.loop_id);
        let point = nalgebra::center(&vertex.position_at(t), &self.front.position(w_id, t)?);
        trace!(time = t, x = point.x, y = point.y, "edge event");

        self.close_loop(loop_id)?;
        self.graph.record_edge_event();

        let (start, end) = self.front.coincident_run(v_id, w_id, &point, t)?;
        let node = self.graph.add_node(point, t, NodeKind::Skeleton);
        let Some(pending) = self.remove_run(start, end, node, point)? else {
            trace!(time = t, "wavefront loop collapsed");
            return Ok(());
        };
        if let Some(id) = self.settle(pending)? {
            self.open_loop(id)?;
        }
        Ok(())
    }

    fn resolve_split(&mut self, v_id: VertexId, a_id: VertexId) -> Result<()> {
        let t = self.now;
        let vertex = self.front.vertex(v_id)?.clone();
        let segment = self.front.vertex(a_id)?;
        let (b_id, edge) = (segment.next, segment.right_edge);
        if segment.loop_id != vertex.loop_id || a_id == v_id || b_id == v_id {
            return Err(GraphError::InvalidGraph(
                "split target is not an opposite edge of the same loop".to_owned(),
            )
            .into());
        }

        let point = vertex.position_at(t);
        trace!(time = t, x = point.x, y = point.y, "split event");
        self.close_loop(vertex.loop_id)?;
        self.graph.record_split_event();

        let node = self.graph.add_node(point, t, NodeKind::Skeleton);
        self.front.vertices.remove(v_id);
        self.graph.close_arc(vertex.arc, node, t)?;

        // The split edge now bounds both halves.
        let first = Pending {
            node,
            point,
            left_edge: vertex.left_edge,
            right_edge: edge,
            prev: vertex.prev,
            next: b_id,
        };
        let second = Pending {
            node,
            point,
            left_edge: edge,
            right_edge: vertex.right_edge,
            prev: a_id,
            next: vertex.next,
        };
        let first = self.settle(first)?;
        let second = self.settle(second)?;
        for id in [first, second].into_iter().flatten() {
            self.open_loop(id)?;
        }
        Ok(())
    }

    /// Removes the run `start..=end`, ending its arcs at `node`. Returns the
    /// vertex replacing the run, or `None` if the run was the whole loop.
    fn remove_run(
        &mut self,
        start: VertexId,
        end: VertexId,
        node: NodeId,
        point: Point2,
    ) -> Result<Option<Pending>> {
        let first = self.front.vertex(start)?;
        let last = self.front.vertex(end)?;
        let whole = last.next == start;
        let pending = Pending {
            node,
            point,
            left_edge: first.left_edge,
            right_edge: last.right_edge,
            prev: first.prev,
            next: last.next,
        };

        let mut id = start;
        loop {
            let vertex = self.take_vertex(id)?;
            self.graph.close_arc(vertex.arc, node, self.now)?;
            if id == end {
                break;
            }
            id = vertex.next;
        }
        Ok((!whole).then_some(pending))
    }

    /// Inserts `pending` into the wavefront once its neighbourhood is valid.
    ///
    /// Neighbours already at the pending point are absorbed, a loop reduced
    /// to two vertices closes along a ridge, and a vertex between two
    /// head-on parallel edges slides to the nearer neighbour first. Returns
    /// the inserted vertex, or `None` if the loop vanished.
    fn settle(&mut self, mut pending: Pending) -> Result<Option<VertexId>> {
        let t = self.now;
        let merge = self.front.merge_distance();
        loop {
            if (self.front.position(pending.prev, t)? - pending.point).norm() <= merge {
                let prev_id = pending.prev;
                let prev = self.take_vertex(prev_id)?;
                self.graph.close_arc(prev.arc, pending.node, t)?;
                if prev_id == pending.next {
                    return Ok(None);
                }
                pending.left_edge = prev.left_edge;
                pending.prev = prev.prev;
                continue;
            }
            if (self.front.position(pending.next, t)? - pending.point).norm() <= merge {
                let next = self.take_vertex(pending.next)?;
                self.graph.close_arc(next.arc, pending.node, t)?;
                pending.right_edge = next.right_edge;
                pending.next = next.next;
                continue;
            }

            if pending.prev == pending.next {
                // Two vertices left on a pair of coincident offset lines.
                let other = self.take_vertex(pending.prev)?;
                let end = self
                    .graph
                    .add_node(other.position_at(t), t, NodeKind::Skeleton);
                self.graph.close_arc(other.arc, end, t)?;
                self.add_ridge(&pending, end)?;
                trace!(time = t, "wavefront loop closed along a ridge");
                return Ok(None);
            }

            match self.front.motion(pending.left_edge, pending.right_edge) {
                Ok((velocity, reflex)) => {
                    let arc = self.open_arc(pending.node, pending.left_edge, pending.right_edge)?;
                    let id = self.front.vertices.insert(WavefrontVertex {
                        origin: pending.point,
                        birth: t,
                        velocity,
                        left_edge: pending.left_edge,
                        right_edge: pending.right_edge,
                        prev: pending.prev,
                        next: pending.next,
                        reflex,
                        arc,
                        loop_id: LoopId::default(),
                        generation: 0,
                    });
                    self.front.vertex_mut(pending.prev)?.next = id;
                    self.front.vertex_mut(pending.next)?.prev = id;
                    return Ok(Some(id));
                }
                Err(MotionError::Antiparallel(_)) => {
                    let to_prev = self.front.position(pending.prev, t)?;
                    let to_next = self.front.position(pending.next, t)?;
                    let prev_gap = (to_prev - pending.point).norm();
                    let next_gap = (to_next - pending.point).norm();
                    let target = if prev_gap <= next_gap {
                        to_prev
                    } else {
                        to_next
                    };
                    let node = self.graph.add_node(target, t, NodeKind::Skeleton);
                    self.add_ridge(&pending, node)?;
                    trace!(
                        time = t,
                        x = target.x,
                        y = target.y,
                        "vertex slid along parallel edges"
                    );
                    pending.node = node;
                    pending.point = target;
                }
                Err(err @ MotionError::Graph(_)) => return Err(err.into()),
            }
        }
    }

    fn add_ridge(&mut self, pending: &Pending, end: NodeId) -> Result<()> {
        let ridge = self.open_arc(pending.node, pending.left_edge, pending.right_edge)?;
        self.graph.close_arc(ridge, end, self.now)?;
        Ok(())
    }

    fn take_vertex(&mut self, id: VertexId) -> Result<WavefrontVertex> {
        Ok(self
            .front
            .vertices
            .remove(id)
            .ok_or(GraphError::EntityNotFound("wavefront vertex"))?)
    }

    // --- Termination ---

    /// Truncates every live loop at the exterior margin.
    fn cap(&mut self) -> Result<()> {
        let t = self.horizon;
        self.now = t;
        let loops: Vec<LoopData> = self.front.loops.drain().map(|(_, data)| data).collect();
        for data in loops {
            self.graph.close_front(data.front, t, true)?;
            let members = self.front.members(data.seed)?;

            let mut frame = Vec::with_capacity(members.len());
            for &id in &members {
                let vertex = self.take_vertex(id)?;
                let node = self
                    .graph
                    .add_node(vertex.position_at(t), t, NodeKind::Frame);
                self.graph.close_arc(vertex.arc, node, t)?;
                frame.push((node, self.front.edge(vertex.right_edge)?.source));
            }
            for (i, &(node, source)) in frame.iter().enumerate() {
                let (next, _) = frame[(i + 1) % frame.len()];
                self.graph.add_border_arc(node, next, t, source);
            }
        }
        Ok(())
    }

    fn seal(&mut self) -> Result<()> {
        let horizon = match self.graph.direction() {
            Direction::Interior => self.now,
            Direction::Exterior => self.horizon,
        };
        self.graph.finalize(horizon)?;
        self.transition(BuildState::Finalized);
        Ok(())
    }
}
