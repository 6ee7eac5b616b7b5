// Copyright 2025 the Stagerail Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtual-time timer queue.
//!
//! Deadlines are absolute [`Duration`]s on whatever monotonic clock the owner uses.
//! Nothing fires on its own: the owner calls [`TimerQueue::pop_due`] with the current time and
//! handles each expired entry. Entries are kept in a flat vector; the queues this crate needs
//! hold at most a handful of timers.

use alloc::vec::Vec;
use core::time::Duration;

/// Handle to a scheduled timer.
///
/// Handles are never reused within a queue, so a cancelled or fired handle can not alias a
/// later timer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: Duration,
    payload: T,
}

/// A queue of pending timers carrying a payload each.
#[derive(Clone)]
pub struct TimerQueue<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> core::fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("pending", &self.entries.len())
            .field("next_deadline", &self.next_deadline())
            .finish_non_exhaustive()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Schedule `payload` to expire at `deadline`.
    pub fn schedule(&mut self, deadline: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            deadline,
            payload,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// True if `id` is still pending.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    ///
    /// Equal deadlines expire in scheduling order.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerId, T)> {
        let mut best: Option<usize> = None;
        for (i, e) in self.entries.iter().enumerate() {
            if e.deadline > now {
                continue;
            }
            match best {
                Some(j)
                    if (self.entries[j].deadline, self.entries[j].id) <= (e.deadline, e.id) => {}
                _ => best = Some(i),
            }
        }
        let entry = self.entries.remove(best?);
        Some((entry.id, entry.payload))
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
