//! Virtual-clock timer queue standing in for the browser event loop.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::fmt;
use std::time::Duration;

use super::page::Page;

/// Deferred work run as a later turn of the page's event loop.
pub type TimerCallback = Box<dyn FnOnce(&mut Page)>;

/// Handle returned by [`Page::set_timeout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Pending timers ordered by deadline, then by scheduling order.
///
/// Cancelled timers leave a stale heap entry behind which is skipped when it
/// reaches the front.
#[derive(Default)]
pub struct TimerQueue {
    now: Duration,
    next_seq: u64,
    heap: BinaryHeap<Reverse<(Duration, u64)>>,
    callbacks: HashMap<u64, TimerCallback>,
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.callbacks.len())
            .finish()
    }
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since page load.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of timers still waiting to fire.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn schedule(&mut self, delay: Duration, callback: TimerCallback) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((self.now + delay, seq)));
        self.callbacks.insert(seq, callback);
        TimerId(seq)
    }

    /// A fresh id with nothing scheduled behind it.
    pub(crate) fn spent_id(&mut self) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        TimerId(seq)
    }

    /// Cancel a pending timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.callbacks.remove(&id.0).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.callbacks.contains_key(&id.0)
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse((_, seq))) = self.heap.peek() {
            if self.callbacks.contains_key(seq) {
                break;
            }
            self.heap.pop();
        }
    }

    /// Deadline of the earliest live timer.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.heap.peek().map(|Reverse((due, _))| *due)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its deadline.
    pub(crate) fn pop_due(&mut self, until: Duration) -> Option<TimerCallback> {
        loop {
            let Reverse((due, seq)) = *self.heap.peek()?;
            if due > until {
                return None;
            }
            self.heap.pop();
            if let Some(callback) = self.callbacks.remove(&seq) {
                self.now = self.now.max(due);
                return Some(callback);
            }
        }
    }

    pub(crate) fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Drop every pending timer without running it.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.callbacks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> TimerCallback {
        Box::new(|_page: &mut Page| {})
    }

    #[test]
    fn test_orders_by_deadline_then_sequence() {
        let mut queue = TimerQueue::new();
        queue.schedule(Duration::from_millis(500), noop());
        let first = queue.schedule(Duration::from_millis(100), noop());
        queue.schedule(Duration::from_millis(100), noop());
        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(100)));
        assert!(queue.pop_due(Duration::from_millis(100)).is_some());
        assert!(!queue.is_pending(first));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.now(), Duration::from_millis(100));
    }

    #[test]
    fn test_cancelled_timers_are_skipped() {
        let mut queue = TimerQueue::new();
        let id = queue.schedule(Duration::from_millis(10), noop());
        queue.schedule(Duration::from_millis(20), noop());
        assert!(queue.cancel(id));
        assert!(!queue.cancel(id));
        assert_eq!(queue.next_deadline(), Some(Duration::from_millis(20)));
    }

    #[test]
    fn test_pop_due_respects_limit() {
        let mut queue = TimerQueue::new();
        queue.schedule(Duration::from_millis(300), noop());
        assert!(queue.pop_due(Duration::from_millis(299)).is_none());
        assert_eq!(queue.now(), Duration::ZERO);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }
}
