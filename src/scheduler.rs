//! Scheduler
//!
//! A virtual-time timer queue. Timers carry an event and a scope; the owner
//! pulls due timers out one at a time with [`Scheduler::pop_due`] and handles
//! each before asking for the next, so a handler can cancel a competing timer
//! before it fires.

use std::time::Duration;

use slotmap::{SlotMap, new_key_type};
use tracing::debug;

new_key_type! {
    /// Scheduled timer key
    pub struct TimerKey;
}

#[derive(Debug, Clone)]
struct Timer<S, E> {
    due: Duration,
    interval: Option<Duration>,
    scope: S,
    seq: u64,
    event: E,
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<S, E> {
    /// Key of the timer. Still valid for repeating timers.
    pub key: TimerKey,

    /// Scope the timer was scheduled in
    pub scope: S,

    /// Event carried by the timer
    pub event: E,

    /// Virtual time at which it fired
    pub at: Duration,
}

/// Virtual-time timer queue.
#[derive(Debug, Clone)]
pub struct Scheduler<S, E> {
    now: Duration,
    next_seq: u64,
    timers: SlotMap<TimerKey, Timer<S, E>>,
}

impl<S, E> Default for Scheduler<S, E> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            timers: SlotMap::with_key(),
        }
    }
}

impl<S, E> Scheduler<S, E>
where
    S: Clone + PartialEq,
    E: Clone,
{
    /// Create an empty scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a one-shot timer `delay` from now.
    pub fn after(&mut self, delay: Duration, scope: S, event: E) -> TimerKey {
        self.insert(delay, None, scope, event)
    }

    /// Schedule a repeating timer, first firing `interval` from now.
    ///
    /// A zero interval is bumped to one millisecond so the queue always advances.
    pub fn every(&mut self, interval: Duration, scope: S, event: E) -> TimerKey {
        let interval = interval.max(Duration::from_millis(1));

        self.insert(interval, Some(interval), scope, event)
    }

    /// Cancel a timer. Returns `true` if it was still pending.
    pub fn cancel(&mut self, key: TimerKey) -> bool {
        self.timers.remove(key).is_some()
    }

    /// Cancel every timer in a scope. Returns how many were cancelled.
    pub fn cancel_scope(&mut self, scope: &S) -> usize {
        let before = self.timers.len();

        self.timers.retain(|_, timer| timer.scope != *scope);

        let cancelled = before - self.timers.len();

        if cancelled > 0 {
            debug!(cancelled, "cancelled scoped timers");
        }

        cancelled
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Whether a timer is still scheduled.
    pub fn is_pending(&self, key: TimerKey) -> bool {
        self.timers.contains_key(key)
    }

    /// Whether any timer is scheduled.
    pub fn has_pending(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Number of scheduled timers.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no timer is scheduled.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Due time of the earliest timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.values().map(|timer| timer.due).min()
    }

    /// Remove and return the earliest timer due at or before `until`.
    ///
    /// Ties are broken by scheduling order. The clock moves to the timer's due
    /// time. Repeating timers are rescheduled one interval later under the same
    /// key before being returned.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired<S, E>> {
        let (key, due) = self
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= until)
            .min_by_key(|(_, timer)| (timer.due, timer.seq))
            .map(|(key, timer)| (key, timer.due))?;

        self.now = self.now.max(due);

        let seq = self.take_seq();
        let timer = self.timers.get_mut(key)?;

        let fired = Fired {
            key,
            scope: timer.scope.clone(),
            event: timer.event.clone(),
            at: due,
        };

        match timer.interval {
            Some(interval) => {
                timer.due = due + interval;
                timer.seq = seq;
            }
            None => {
                self.timers.remove(key);
            }
        }

        Some(fired)
    }

    /// Move the clock forward to `to` without firing anything.
    ///
    /// Call after draining [`Self::pop_due`]. The clock never goes backwards.
    pub fn settle(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    fn insert(&mut self, delay: Duration, interval: Option<Duration>, scope: S, event: E) -> TimerKey {
        let seq = self.take_seq();

        self.timers.insert(Timer {
            due: self.now + delay,
            interval,
            scope,
            seq,
            event,
        })
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;

        seq
    }
}
