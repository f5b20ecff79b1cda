//! Cooperative single-threaded timer queue
//!
//! Continuations are scheduled against simulated time and delivered in due
//! order. Ties fire in the order they were scheduled. Nothing runs until the
//! owner pops it, so there is no real concurrency here.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;

/// Cancellation token for a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Entry<E> {
    due: Duration,
    seq: u64,
    event: E,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    // Reversed so the max-heap pops the earliest (due, seq) first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-heap of delayed events over simulated time
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Entry<E>>,
    cancelled: HashSet<u64>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
            cancelled: HashSet::new(),
        }
    }

    /// Current simulated time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `event` to fire `delay` from now
    pub fn schedule(&mut self, delay: Duration, event: E) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            due: self.now + delay,
            seq,
            event,
        });
        TimerHandle(seq)
    }

    /// Invalidate a pending event. Cancelling a fired or unknown handle is a no-op.
    pub fn cancel(&mut self, handle: TimerHandle) {
        if self.queue.iter().any(|e| e.seq == handle.0) {
            self.cancelled.insert(handle.0);
        }
    }

    /// Drop every pending event
    pub fn clear(&mut self) {
        self.queue.clear();
        self.cancelled.clear();
    }

    /// Number of live (not cancelled) pending events
    pub fn pending(&self) -> usize {
        self.queue.len() - self.cancelled.len()
    }

    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Due time of the next live event
    pub fn next_due(&mut self) -> Option<Duration> {
        self.skip_cancelled();
        self.queue.peek().map(|e| e.due)
    }

    /// Pop the next live event due at or before `until`, moving the clock to
    /// its due time
    pub fn pop_due(&mut self, until: Duration) -> Option<E> {
        self.skip_cancelled();
        if self.queue.peek().is_some_and(|e| e.due <= until) {
            let entry = self.queue.pop()?;
            self.now = self.now.max(entry.due);
            Some(entry.event)
        } else {
            None
        }
    }

    /// Move the clock forward without delivering anything
    pub fn advance_to(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    fn skip_cancelled(&mut self) {
        while let Some(top) = self.queue.peek() {
            if self.cancelled.remove(&top.seq) {
                self.queue.pop();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(ms(300), "c");
        s.schedule(ms(100), "a");
        s.schedule(ms(200), "b");

        assert_eq!(s.pop_due(ms(1000)), Some("a"));
        assert_eq!(s.now(), ms(100));
        assert_eq!(s.pop_due(ms(1000)), Some("b"));
        assert_eq!(s.pop_due(ms(1000)), Some("c"));
        assert_eq!(s.pop_due(ms(1000)), None);
    }

    #[test]
    fn test_ties_are_fifo() {
        let mut s = Scheduler::new();
        for i in 0..5 {
            s.schedule(ms(50), i);
        }
        let order: Vec<i32> = std::iter::from_fn(|| s.pop_due(ms(50))).collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_not_delivered_before_due() {
        let mut s = Scheduler::new();
        s.schedule(ms(75), ());
        assert_eq!(s.pop_due(ms(74)), None);
        assert_eq!(s.pop_due(ms(75)), Some(()));
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut s = Scheduler::new();
        s.advance_to(ms(500));
        s.schedule(ms(100), 1);
        assert_eq!(s.next_due(), Some(ms(600)));
    }

    #[test]
    fn test_cancel() {
        let mut s = Scheduler::new();
        let a = s.schedule(ms(10), "a");
        s.schedule(ms(20), "b");
        s.cancel(a);
        assert_eq!(s.pending(), 1);
        assert_eq!(s.pop_due(ms(100)), Some("b"));

        // Cancelling after delivery does nothing
        s.cancel(a);
        assert!(s.is_idle());
    }

    #[test]
    fn test_clear() {
        let mut s = Scheduler::new();
        s.schedule(ms(10), 1);
        s.schedule(ms(20), 2);
        s.clear();
        assert!(s.is_idle());
        assert_eq!(s.pop_due(ms(100)), None);
    }
}
