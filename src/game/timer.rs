//! Scheduled callbacks with cancel-by-handle
//!
//! The game never sleeps. It schedules [`TimerEvent`]s on a [`TimerService`]
//! and the front end pops the due ones after advancing the queue's clock.
//! Time is a `Duration` since an arbitrary origin, so tests and the simulator
//! can run on virtual time.

use crate::core::{CardId, TimerHandle};
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Turn a pending card face down again
    HideCard(CardId),
    /// Refresh the elapsed-time display
    Tick,
}

/// Timer scheduling as seen by the round and the session
pub trait TimerService {
    /// Current time on this service's clock
    fn now(&self) -> Duration;

    /// Fire `event` once, `delay` from now
    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle;

    /// Drop a pending timer; returns false if it already fired or was cancelled
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Scheduled {
    deadline: Duration,
    event: TimerEvent,
}

/// Single-threaded timer queue
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_handle: u64,
    pending: FxHashMap<TimerHandle, Scheduled>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward; time never runs backwards
    pub fn advance_to(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Remove and return the earliest timer due at the current time
    ///
    /// Ties fire in scheduling order. Call repeatedly until `None` so that a
    /// handler cancelling another due timer is respected.
    pub fn pop_due(&mut self) -> Option<(TimerHandle, TimerEvent)> {
        let handle = self
            .pending
            .iter()
            .filter(|(_, s)| s.deadline <= self.now)
            .min_by_key(|(handle, s)| (s.deadline, **handle))
            .map(|(handle, _)| *handle)?;

        self.pending.remove(&handle).map(|s| (handle, s.event))
    }

    /// Earliest pending deadline
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.values().map(|s| s.deadline).min()
    }

    /// Time left until the earliest pending deadline, zero if already due
    #[must_use]
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(self.now))
    }

    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl TimerService for TimerQueue {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration, event: TimerEvent) -> TimerHandle {
        let handle = TimerHandle::new(self.next_handle);
        self.next_handle += 1;
        self.pending.insert(
            handle,
            Scheduled {
                deadline: self.now + delay,
                event,
            },
        );
        tracing::trace!(handle = handle.raw(), ?event, ?delay, "timer scheduled");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let removed = self.pending.remove(&handle).is_some();
        if removed {
            tracing::trace!(handle = handle.raw(), "timer cancelled");
        }
        removed
    }
}

/// Wall-clock source for real-time front ends
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    #[must_use]
    pub fn start() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Time since the clock started
    #[must_use]
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}
