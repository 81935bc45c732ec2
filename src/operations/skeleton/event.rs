use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use super::wavefront::VertexId;

/// Topological change a wavefront vertex runs into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EventKind {
    /// The wavefront edge between the vertex and its successor shrinks to
    /// zero length.
    Edge,
    /// The reflex vertex reaches the wavefront edge that starts at
    /// `segment_start`.
    Split { segment_start: VertexId },
}

/// A pending event, valid while `vertex` still carries `generation`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Event {
    pub time: f64,
    pub vertex: VertexId,
    pub generation: u32,
    pub kind: EventKind,
}

impl Event {
    /// Among events at the same time, splits resolve first: a reflex vertex
    /// arriving at an edge endpoint is the more specific description.
    fn rank(&self) -> u8 {
        match self.kind {
            EventKind::Split { .. } => 0,
            EventKind::Edge => 1,
        }
    }
}

#[derive(Debug)]
struct Entry {
    time: OrderedFloat<f64>,
    sequence: u64,
    event: Event,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Min-priority queue of events ordered by `(time, insertion sequence)`.
///
/// Entries are never removed eagerly: an event becomes stale when its
/// vertex disappears or is rescheduled, and stale entries are skipped when
/// popped.
#[derive(Debug, Default)]
pub(crate) struct EventQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    sequence: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        let entry = Entry {
            time: OrderedFloat(event.time),
            sequence: self.sequence,
            event,
        };
        self.sequence += 1;
        self.heap.push(Reverse(entry));
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pops the next live event no later than `limit`.
    ///
    /// All live events within `eps` of the earliest one are considered
    /// simultaneous; the one with the best rank (then lowest sequence) is
    /// returned and the others are put back with their original sequence.
    pub fn pop_batch<F>(&mut self, eps: f64, limit: f64, is_live: F) -> Option<Event>
    where
        F: Fn(&Event) -> bool,
    {
        let first = loop {
            let Reverse(head) = self.heap.peek()?;
            if head.time.0 > limit {
                return None;
            }
            let Reverse(entry) = self.heap.pop()?;
            if is_live(&entry.event) {
                break entry;
            }
        };

        let cutoff = (first.time.0 + eps).min(limit);
        let mut batch = vec![first];
        while let Some(Reverse(head)) = self.heap.peek() {
            if head.time.0 > cutoff {
                break;
            }
            let Some(Reverse(entry)) = self.heap.pop() else {
                break;
            };
            if is_live(&entry.event) {
                batch.push(entry);
            }
        }

        let best = batch
            .iter()
            .enumerate()
            .min_by_key(|(_, entry)| (entry.event.rank(), entry.sequence))
            .map_or(0, |(i, _)| i);
        let chosen = batch.swap_remove(best);
        for entry in batch {
            self.heap.push(Reverse(entry));
        }
        Some(chosen.event)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn ids(n: usize) -> Vec<VertexId> {
        let mut map: SlotMap<VertexId, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn edge(time: f64, vertex: VertexId) -> Event {
        Event {
            time,
            vertex,
            generation: 0,
            kind: EventKind::Edge,
        }
    }

    #[test]
    fn pops_in_time_order() {
        let v = ids(3);
        let mut queue = EventQueue::new();
        queue.push(edge(3.0, v[0]));
        queue.push(edge(1.0, v[1]));
        queue.push(edge(2.0, v[2]));
        let order: Vec<f64> = std::iter::from_fn(|| queue.pop_batch(0.0, f64::INFINITY, |_| true))
            .map(|e| e.time)
            .collect();
        assert_eq!(order, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn ties_follow_insertion_order() {
        let v = ids(2);
        let mut queue = EventQueue::new();
        queue.push(edge(1.0, v[1]));
        queue.push(edge(1.0, v[0]));
        let first = queue.pop_batch(1e-9, f64::INFINITY, |_| true).unwrap();
        assert_eq!(first.vertex, v[1]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn split_wins_within_tolerance() {
        let v = ids(2);
        let mut queue = EventQueue::new();
        queue.push(edge(1.0, v[0]));
        queue.push(Event {
            time: 1.0 + 1e-12,
            vertex: v[1],
            generation: 0,
            kind: EventKind::Split {
                segment_start: v[0],
            },
        });
        let first = queue.pop_batch(1e-9, f64::INFINITY, |_| true).unwrap();
        assert!(matches!(first.kind, EventKind::Split { .. }));
        let second = queue.pop_batch(1e-9, f64::INFINITY, |_| true).unwrap();
        assert_eq!(second.kind, EventKind::Edge);
    }

    #[test]
    fn stale_events_are_skipped() {
        let v = ids(2);
        let mut queue = EventQueue::new();
        queue.push(edge(1.0, v[0]));
        queue.push(edge(2.0, v[1]));
        let live = v[1];
        let first = queue.pop_batch(0.0, f64::INFINITY, |e| e.vertex == live).unwrap();
        assert_eq!(first.vertex, live);
        assert!(queue.pop_batch(0.0, f64::INFINITY, |e| e.vertex == live).is_none());
    }

    #[test]
    fn events_past_the_limit_stay_queued() {
        let v = ids(1);
        let mut queue = EventQueue::new();
        queue.push(edge(6.0, v[0]));
        assert!(queue.pop_batch(0.0, 5.0, |_| true).is_none());
        assert_eq!(queue.len(), 1);
    }
}
