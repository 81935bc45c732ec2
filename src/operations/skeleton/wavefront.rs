use slotmap::SlotMap;

use super::event::{Event, EventKind};
use crate::error::{GeometryError, GraphError, SkeletonError};
use crate::graph::{ArcId, FrontId};
use crate::math::bisector_2d::{is_reflex, vertex_velocity};
use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::{Point2, Vector2};

slotmap::new_key_type! {
    /// Identifier of a live wavefront vertex.
    pub(crate) struct VertexId;
    /// Identifier of a live wavefront loop.
    pub(crate) struct LoopId;
}

/// Supporting line of one boundary edge at time 0.
///
/// At time `t` the wavefront edge lies on the parallel line moved by `t`
/// along `normal`.
#[derive(Debug, Clone)]
pub(crate) struct EdgeLine {
    pub origin: Point2,
    pub direction: Vector2,
    pub normal: Vector2,
    /// Index of the input polygon edge this line comes from.
    pub source: usize,
}

impl EdgeLine {
    pub fn through(a: &Point2, b: &Point2, source: usize, eps: f64) -> Result<Self, GeometryError> {
        let direction = segment_direction(a, b, eps)?;
        Ok(Self {
            origin: *a,
            direction,
            normal: left_normal(&direction),
            source,
        })
    }

    /// Signed distance of `p` ahead of the line after it travelled for `time`.
    pub fn distance_ahead(&self, p: &Point2, time: f64) -> f64 {
        (p - self.origin).dot(&self.normal) - time
    }

    /// Coordinate of `p` along the line direction.
    pub fn project(&self, p: &Point2) -> f64 {
        (p - self.origin).dot(&self.direction)
    }
}

/// A vertex of the moving wavefront.
///
/// The vertex sits between wavefront edges `left_edge` and `right_edge`
/// (indices into [`Wavefront::edges`]) and moves with constant velocity
/// from `origin`, where it was born at `birth`.
#[derive(Debug, Clone)]
pub(crate) struct WavefrontVertex {
    pub origin: Point2,
    pub birth: f64,
    pub velocity: Vector2,
    pub left_edge: usize,
    pub right_edge: usize,
    pub prev: VertexId,
    pub next: VertexId,
    pub reflex: bool,
    /// Skeleton arc traced by this vertex.
    pub arc: ArcId,
    pub loop_id: LoopId,
    /// Bumped whenever the vertex is rescheduled; queued events carrying an
    /// older generation are stale.
    pub generation: u32,
}

impl WavefrontVertex {
    pub fn position_at(&self, time: f64) -> Point2 {
        self.origin + self.velocity * (time - self.birth)
    }
}

/// Bookkeeping for one live loop.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LoopData {
    /// Snapshot recording this loop in the graph.
    pub front: FrontId,
    /// Any member; loops are replaced as a whole on every event, so the seed
    /// outlives the loop.
    pub seed: VertexId,
}

/// The live kinetic state: edge lines, vertices and loops.
#[derive(Debug)]
pub(crate) struct Wavefront {
    pub edges: Vec<EdgeLine>,
    pub vertices: SlotMap<VertexId, WavefrontVertex>,
    pub loops: SlotMap<LoopId, LoopData>,
    /// Dimensionless tolerance for directions and speeds.
    tolerance: f64,
    /// Absolute tolerance for distances and times.
    eps: f64,
    /// Distance under which vertices coincide.
    merge: f64,
}

impl Wavefront {
    pub fn new(edges: Vec<EdgeLine>, tolerance: f64, eps: f64, merge: f64) -> Self {
        Self {
            edges,
            vertices: SlotMap::with_key(),
            loops: SlotMap::with_key(),
            tolerance,
            eps,
            merge,
        }
    }

    pub fn merge_distance(&self) -> f64 {
        self.merge
    }

    pub fn vertex(&self, id: VertexId) -> Result<&WavefrontVertex, GraphError> {
        self.vertices
            .get(id)
            .ok_or(GraphError::EntityNotFound("wavefront vertex"))
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut WavefrontVertex, GraphError> {
        self.vertices
            .get_mut(id)
            .ok_or(GraphError::EntityNotFound("wavefront vertex"))
    }

    pub fn edge(&self, index: usize) -> Result<&EdgeLine, GraphError> {
        self.edges
            .get(index)
            .ok_or(GraphError::EntityNotFound("wavefront edge"))
    }

    pub fn position(&self, id: VertexId, time: f64) -> Result<Point2, GraphError> {
        Ok(self.vertex(id)?.position_at(time))
    }

    /// Returns `true` if `event` still describes the current state of its vertex.
    pub fn is_live(&self, event: &Event) -> bool {
        let vertex_ok = self
            .vertices
            .get(event.vertex)
            .is_some_and(|v| v.generation == event.generation);
        match event.kind {
            EventKind::Edge => vertex_ok,
            EventKind::Split { segment_start } => {
                vertex_ok && self.vertices.contains_key(segment_start)
            }
        }
    }

    /// Members of the loop containing `seed`, in wavefront order.
    pub fn members(&self, seed: VertexId) -> Result<Vec<VertexId>, GraphError> {
        let mut members = vec![seed];
        let mut id = self.vertex(seed)?.next;
        while id != seed {
            if members.len() > self.vertices.len() {
                return Err(GraphError::InvalidGraph(
                    "wavefront loop does not close".to_owned(),
                ));
            }
            members.push(id);
            id = self.vertex(id)?.next;
        }
        Ok(members)
    }

    /// Velocity and reflex flag of a vertex joining `left` and `right`.
    pub fn motion(&self, left: usize, right: usize) -> Result<(Vector2, bool), MotionError> {
        let (l, r) = (self.edge(left)?, self.edge(right)?);
        let velocity = vertex_velocity(&l.normal, &r.normal, self.tolerance)?;
        Ok((velocity, is_reflex(&l.direction, &r.direction, self.tolerance)))
    }

    /// Extends the run `first..=last` over neighbours lying within the merge
    /// distance of `point` at `time`. Returns the new `(first, last)`.
    pub fn coincident_run(
        &self,
        first: VertexId,
        last: VertexId,
        point: &Point2,
        time: f64,
    ) -> Result<(VertexId, VertexId), GraphError> {
        let (mut start, mut end) = (first, last);
        loop {
            let prev = self.vertex(start)?.prev;
            if prev == end || (self.position(prev, time)? - point).norm() > self.merge {
                break;
            }
            start = prev;
        }
        loop {
            let next = self.vertex(end)?.next;
            if next == start || (self.position(next, time)? - point).norm() > self.merge {
                break;
            }
            end = next;
        }
        Ok((start, end))
    }

    /// Earliest event of vertex `id` after `now`, if any.
    pub fn next_event(
        &self,
        id: VertexId,
        members: &[VertexId],
        now: f64,
    ) -> Result<Option<Event>, GraphError> {
        let vertex = self.vertex(id)?;
        let edge = self.edge_event_time(id, now)?;
        let split = if vertex.reflex {
            self.split_event(id, members, now)?
        } else {
            None
        };

        let (time, kind) = match (edge, split) {
            (Some(te), Some((ts, segment_start))) if ts <= te + self.eps => {
                (ts, EventKind::Split { segment_start })
            }
            (Some(te), _) => (te, EventKind::Edge),
            (None, Some((ts, segment_start))) => (ts, EventKind::Split { segment_start }),
            (None, None) => return Ok(None),
        };
        Ok(Some(Event {
            time,
            vertex: id,
            generation: vertex.generation,
            kind,
        }))
    }

    /// Time at which the wavefront edge from `id` to its successor vanishes.
    pub fn edge_event_time(&self, id: VertexId, now: f64) -> Result<Option<f64>, GraphError> {
        let v = self.vertex(id)?;
        if v.next == id {
            return Ok(None);
        }
        let w = self.vertex(v.next)?;
        let line = self.edge(v.right_edge)?;
        let length = line.project(&w.position_at(now)) - line.project(&v.position_at(now));
        let rate = (w.velocity - v.velocity).dot(&line.direction);
        if rate >= -self.tolerance {
            return Ok(None);
        }
        Ok(Some(now + length.max(0.0) / -rate))
    }

    /// Earliest time reflex vertex `id` hits a wavefront edge of its loop,
    /// with the vertex starting that edge.
    pub fn split_event(
        &self,
        id: VertexId,
        members: &[VertexId],
        now: f64,
    ) -> Result<Option<(f64, VertexId)>, GraphError> {
        let v = self.vertex(id)?;
        let here = v.position_at(now);
        let mut best: Option<(f64, VertexId)> = None;

        for &a_id in members {
            let a = self.vertex(a_id)?;
            let b_id = a.next;
            if a_id == id || b_id == id {
                continue;
            }
            if a.right_edge == v.left_edge || a.right_edge == v.right_edge {
                continue;
            }
            let line = self.edge(a.right_edge)?;
            let approach = 1.0 - v.velocity.dot(&line.normal);
            if approach <= self.tolerance {
                continue;
            }
            let ahead = line.distance_ahead(&here, now);
            if ahead < -self.eps {
                continue;
            }
            let t = now + ahead.max(0.0) / approach;
            if best.is_some_and(|(bt, _)| t >= bt) {
                continue;
            }

            let b = self.vertex(b_id)?;
            let hit = line.project(&v.position_at(t));
            let from = line.project(&a.position_at(t));
            let to = line.project(&b.position_at(t));
            if hit < from - self.merge || hit > to + self.merge {
                continue;
            }
            best = Some((t, a_id));
        }
        Ok(best)
    }
}

/// Failure to derive a vertex motion: either a lookup failed or the two
/// edges are antiparallel.
#[derive(Debug)]
pub(crate) enum MotionError {
    Graph(GraphError),
    Antiparallel(GeometryError),
}

impl From<GraphError> for MotionError {
    fn from(err: GraphError) -> Self {
        Self::Graph(err)
    }
}

impl From<GeometryError> for MotionError {
    fn from(err: GeometryError) -> Self {
        Self::Antiparallel(err)
    }
}

impl From<MotionError> for SkeletonError {
    fn from(err: MotionError) -> Self {
        match err {
            MotionError::Graph(err) => err.into(),
            MotionError::Antiparallel(err) => err.into(),
        }
    }
}
