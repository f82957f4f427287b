// Copyright 2025 the Tactile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cancellable deferred tasks on host-driven time.
//!
//! The engine never blocks and never owns a clock: deferred transitions are
//! entries in a [`TimerQueue`] that the host polls with its own monotonic
//! milliseconds ([`TimerQueue::drain_due`]). Every entry is addressed by a
//! [`TimerHandle`]; cancellation is idempotent, so cancelling a handle that
//! already fired (or was already cancelled) is a no-op, never an error.
//!
//! ```rust
//! use tactile_activation::timer::TimerQueue;
//!
//! let mut timers: TimerQueue<&str> = TimerQueue::new();
//! let a = timers.schedule(100, "apply");
//! let b = timers.schedule(50, "clear");
//!
//! assert!(timers.cancel(a));
//! assert!(!timers.cancel(a)); // idempotent
//!
//! assert_eq!(timers.drain_due(60), vec!["clear"]);
//! assert!(!timers.is_pending(b));
//! assert!(timers.is_empty());
//! ```

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Handle for one scheduled task.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// Owned table of deferred tasks ordered by deadline.
///
/// Entries fire in `(deadline, insertion)` order. The queue is single-owner
/// and single-threaded; there is no preemption between [`TimerQueue::schedule`],
/// [`TimerQueue::cancel`], and [`TimerQueue::drain_due`] calls, so no entry
/// can fire stale: a cancelled handle is removed before it could ever be
/// drained.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    /// Pending entries keyed by (deadline, sequence) for stable firing order.
    entries: BTreeMap<(u64, u64), (TimerHandle, T)>,
    /// Reverse index for O(log n) cancellation by handle.
    by_handle: HashMap<TimerHandle, (u64, u64)>,
    next_seq: u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            by_handle: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `task` to fire once `now >= deadline_ms`.
    pub fn schedule(&mut self, deadline_ms: u64, task: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        let handle = TimerHandle(seq);
        self.entries.insert((deadline_ms, seq), (handle, task));
        self.by_handle.insert(handle, (deadline_ms, seq));
        handle
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was still pending. Cancelling a handle that
    /// already fired or was already cancelled does nothing and returns
    /// `false`.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.by_handle.remove(&handle) {
            Some(key) => {
                let removed = self.entries.remove(&key);
                debug_assert!(removed.is_some(), "handle index out of sync with entries");
                true
            }
            None => false,
        }
    }

    /// Pop every task whose deadline has been reached, in firing order.
    pub fn drain_due(&mut self, now_ms: u64) -> Vec<T> {
        let mut due = Vec::new();
        while let Some((&key, _)) = self.entries.first_key_value() {
            if key.0 > now_ms {
                break;
            }
            let (handle, task) = self.entries.remove(&key).expect("first key just observed");
            self.by_handle.remove(&handle);
            due.push(task);
        }
        due
    }

    /// Whether `handle` refers to a still-pending task.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.by_handle.contains_key(&handle)
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.by_handle.clear();
    }
}
