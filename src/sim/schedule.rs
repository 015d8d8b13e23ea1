//! Simulation-time event queue
//!
//! Deferred effects are queued with a delay in milliseconds and drained from
//! `update`, so they pause with the game and never outlive a reset.

/// A queued event with its due time
#[derive(Debug, Clone)]
struct Pending<E> {
    due_ms: f32,
    seq: u64,
    event: E,
}

/// Ordered queue of delayed events
#[derive(Debug, Clone)]
pub struct Schedule<E> {
    now_ms: f32,
    next_seq: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for Schedule<E> {
    fn default() -> Self {
        Self {
            now_ms: 0.0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }
}

impl<E> Schedule<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` to fire `delay_ms` from now
    pub fn at(&mut self, delay_ms: f32, event: E) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Pending {
            due_ms: self.now_ms + delay_ms.max(0.0),
            seq,
            event,
        });
    }

    /// Advance the clock and return every event now due, earliest first.
    /// Events due at the same time fire in insertion order.
    pub fn advance(&mut self, dt_ms: f32) -> Vec<E> {
        self.now_ms += dt_ms.max(0.0);
        let now = self.now_ms;

        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now);
        self.pending = rest;

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|p| p.event).collect()
    }

    /// Drop every pending event
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
