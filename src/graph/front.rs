use super::arc::ArcId;

slotmap::new_key_type! {
    /// Unique identifier for a wavefront snapshot in a skeleton graph.
    pub struct FrontId;
}

/// One closed wavefront loop as it existed between two events.
///
/// During `[t_start, t_end)` the loop consists of exactly the vertices
/// tracing `arcs`, in wavefront order: consecutive arcs are joined by a
/// wavefront edge lying on the offset line of their shared input edge.
#[derive(Debug, Clone)]
pub struct FrontData {
    /// Tracing arcs in wavefront order.
    pub arcs: Vec<ArcId>,
    /// Time the loop came into existence.
    pub t_start: f64,
    /// Time the loop was changed by an event, or the margin if capped.
    pub t_end: f64,
    /// `true` if the loop was still alive when the exterior margin was reached.
    pub capped: bool,
}

impl FrontData {
    /// Returns `true` if the loop is the wavefront at `time`.
    #[must_use]
    pub fn is_active_at(&self, time: f64) -> bool {
        self.t_start <= time && (time < self.t_end || (self.capped && time >= self.t_end))
    }
}
