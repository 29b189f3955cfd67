//! Timed event scheduler.
//!
//! A [`Scheduler`] holds one-shot payloads that become due after a delay.
//! It never runs anything on its own: the owner pops due payloads and
//! dispatches them on its own (single) thread. Each payload is handed out
//! at most once, never before its due time, and never after it has been
//! cancelled.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use crate::clock::Clock;

/// Identifies one scheduled entry. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug)]
struct Pending<T> {
    due: DateTime<Utc>,
    payload: T,
}

/// One-shot delayed payloads with explicit cancel handles.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    pending: BTreeMap<TimerHandle, Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Schedules `payload` to become due `delay` after `clock.now()`.
    /// Negative delays are treated as zero.
    pub fn schedule(&mut self, delay: TimeDelta, payload: T, clock: &dyn Clock) -> TimerHandle {
        let delay = delay.max(TimeDelta::zero());
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.insert(
            handle,
            Pending {
                due: clock.now() + delay,
                payload,
            },
        );
        handle
    }

    /// Cancels a pending entry. Returns `false` (and does nothing) if the
    /// entry already fired or was already cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        self.pending.remove(&handle).is_some()
    }

    /// Cancels every pending entry, returning how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        dropped
    }

    /// Returns `true` if `handle` has neither fired nor been cancelled.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest due time among pending entries.
    #[must_use]
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.values().map(|p| p.due).min()
    }

    /// Removes and returns the earliest entry due at or before `now`.
    /// Entries due at the same instant come out in scheduling order.
    pub fn pop_due(&mut self, now: DateTime<Utc>) -> Option<(TimerHandle, T)> {
        let handle = self
            .pending
            .iter()
            .filter(|(_, p)| p.due <= now)
            .min_by_key(|(handle, p)| (p.due, **handle))
            .map(|(handle, _)| *handle)?;
        self.pending
            .remove(&handle)
            .map(|pending| (handle, pending.payload))
    }
}
