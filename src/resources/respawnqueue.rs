//! Logical respawn scheduler.
//!
//! Depleted nodes are not brought back by wall-clock timers. Instead each
//! depletion pushes a [`RespawnTicket`] keyed by its fire time onto a min-heap,
//! and the owner polls [`RespawnQueue::pop_due`] with the current simulation
//! time (normally [`WorldTime::elapsed`]). Advancing that time is the only way
//! tickets fire, which keeps respawns deterministic under test.
//!
//! Tickets with equal fire times pop in scheduling order.
//!
//! [`WorldTime::elapsed`]: crate::resources::worldtime::WorldTime

use raylib::prelude::Vector3;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::resources::resourcekinds::KindId;

/// A scheduled re-creation of a depleted node.
#[derive(Debug, Clone, Copy)]
pub struct RespawnTicket {
    pub kind: KindId,
    /// Where the depleted node stood; the new node reuses it.
    pub position: Vector3,
    /// Simulation time (seconds) at which the ticket fires.
    pub fire_at: f32,
    seq: u64,
}

impl PartialEq for RespawnTicket {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RespawnTicket {}

impl PartialOrd for RespawnTicket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RespawnTicket {
    // Reversed so the std max-heap yields the earliest ticket first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .total_cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of pending respawn tickets.
#[derive(Debug, Default, Clone)]
pub struct RespawnQueue {
    heap: BinaryHeap<RespawnTicket>,
    next_seq: u64,
}

impl RespawnQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to reappear at `position` once time reaches `fire_at`.
    pub fn schedule(&mut self, kind: KindId, position: Vector3, fire_at: f32) -> RespawnTicket {
        let ticket = RespawnTicket {
            kind,
            position,
            fire_at,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.heap.push(ticket);
        ticket
    }

    /// Remove and return the earliest ticket whose fire time is `<= now`.
    pub fn pop_due(&mut self, now: f32) -> Option<RespawnTicket> {
        if self.heap.peek()?.fire_at <= now {
            self.heap.pop()
        } else {
            None
        }
    }

    /// Fire time of the earliest pending ticket.
    pub fn next_fire_at(&self) -> Option<f32> {
        self.heap.peek().map(|t| t.fire_at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending ticket. Returns how many were cancelled.
    pub fn clear(&mut self) -> usize {
        let cancelled = self.heap.len();
        self.heap.clear();
        cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Vector3 {
        Vector3::new(0.0, 0.0, 0.0)
    }

    #[test]
    fn test_nothing_due_before_fire_time() {
        let mut q = RespawnQueue::new();
        q.schedule(KindId(0), origin(), 30.0);
        assert!(q.pop_due(29.99).is_none());
        assert_eq!(q.len(), 1);
        let t = q.pop_due(30.0).unwrap();
        assert_eq!(t.kind, KindId(0));
        assert!(q.is_empty());
    }

    #[test]
    fn test_pops_in_fire_time_order() {
        let mut q = RespawnQueue::new();
        q.schedule(KindId(2), origin(), 45.0);
        q.schedule(KindId(0), origin(), 30.0);
        q.schedule(KindId(1), origin(), 40.0);
        assert_eq!(q.next_fire_at(), Some(30.0));

        let order: Vec<KindId> = std::iter::from_fn(|| q.pop_due(100.0))
            .map(|t| t.kind)
            .collect();
        assert_eq!(order, vec![KindId(0), KindId(1), KindId(2)]);
    }

    #[test]
    fn test_equal_fire_times_pop_fifo() {
        let mut q = RespawnQueue::new();
        for i in 0..5 {
            q.schedule(KindId(i), origin(), 10.0);
        }
        let order: Vec<u16> = std::iter::from_fn(|| q.pop_due(10.0))
            .map(|t| t.kind.0)
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_ticket_keeps_position() {
        let mut q = RespawnQueue::new();
        q.schedule(KindId(0), Vector3::new(3.0, 0.0, -7.5), 1.0);
        let t = q.pop_due(1.0).unwrap();
        assert_eq!(t.position.x, 3.0);
        assert_eq!(t.position.z, -7.5);
    }

    #[test]
    fn test_clear_cancels_everything() {
        let mut q = RespawnQueue::new();
        q.schedule(KindId(0), origin(), 1.0);
        q.schedule(KindId(1), origin(), 2.0);
        assert_eq!(q.clear(), 2);
        assert!(q.pop_due(f32::MAX).is_none());
        assert_eq!(q.next_fire_at(), None);
    }
}
