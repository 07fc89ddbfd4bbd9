//! Timer scheduler
//!
//! A `TimerQueue` holds the pending timers of one widget. Each timer carries a
//! payload describing what should happen when it fires; the owner advances
//! the queue's virtual clock and handles payloads one at a time:
//!
//! ```
//! use vitrine_animation::TimerQueue;
//!
//! #[derive(Debug, PartialEq)]
//! enum Step { ShowImage, Advance }
//!
//! let mut timers = TimerQueue::new();
//! let show = timers.schedule(3000, Step::ShowImage);
//! timers.schedule(6000, Step::Advance);
//!
//! assert_eq!(timers.pop_due(3000), Some(Step::ShowImage));
//! assert!(!timers.is_pending(show));
//! assert_eq!(timers.pop_due(5000), None);
//! assert_eq!(timers.now(), 5000);
//! ```
//!
//! Handlers may schedule further timers while the owner is draining; those
//! fire within the same advance if they fall due before its target time.

use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeMap;

/// Milliseconds on the virtual clock
pub type Millis = u64;

new_key_type! {
    /// Handle to a scheduled timer
    pub struct TimerId;
}

struct TimerEntry<E> {
    deadline: Millis,
    seq: u64,
    payload: E,
}

/// Pending one-shot timers ordered by deadline, then scheduling order
pub struct TimerQueue<E> {
    timers: SlotMap<TimerId, TimerEntry<E>>,
    order: BTreeMap<(Millis, u64), TimerId>,
    now: Millis,
    next_seq: u64,
}

impl<E> TimerQueue<E> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            order: BTreeMap::new(),
            now: 0,
            next_seq: 0,
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Millis {
        self.now
    }

    /// Schedule `payload` to fire `delay` ms from now
    pub fn schedule(&mut self, delay: Millis, payload: E) -> TimerId {
        let deadline = self.now.saturating_add(delay);
        let seq = self.next_seq;
        self.next_seq += 1;

        let id = self.timers.insert(TimerEntry {
            deadline,
            seq,
            payload,
        });
        self.order.insert((deadline, seq), id);
        id
    }

    /// Cancel a pending timer, returning its payload
    ///
    /// Cancelling a timer that already fired or was cancelled is a no-op.
    pub fn cancel(&mut self, id: TimerId) -> Option<E> {
        let entry = self.timers.remove(id)?;
        self.order.remove(&(entry.deadline, entry.seq));
        Some(entry.payload)
    }

    /// Cancel the timer held in `slot`, if any, and clear the slot
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take() {
            self.cancel(id);
        }
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
        self.order.clear();
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Deadline of a pending timer
    pub fn deadline(&self, id: TimerId) -> Option<Millis> {
        self.timers.get(id).map(|e| e.deadline)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Millis> {
        self.order.keys().next().map(|(deadline, _)| *deadline)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Pop the next timer due at or before `until`
    ///
    /// The clock moves to the popped timer's deadline. When nothing is due the
    /// clock moves to `until` and `None` is returned. The clock never moves
    /// backwards.
    pub fn pop_due(&mut self, until: Millis) -> Option<E> {
        let due = self
            .order
            .first_key_value()
            .filter(|((deadline, _), _)| *deadline <= until)
            .map(|(key, id)| (*key, *id));

        match due {
            Some((key, id)) => {
                self.order.remove(&key);
                let entry = self.timers.remove(id)?;
                self.now = self.now.max(entry.deadline);
                Some(entry.payload)
            }
            None => {
                self.now = self.now.max(until);
                None
            }
        }
    }
}

impl<E> Default for TimerQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for TimerQueue<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.timers.len())
            .field("next_deadline", &self.next_deadline())
            .finish()
    }
}
