//! Tick scheduling.
//!
//! The simulation has no timer of its own. Callers poll it with a [`Clock`]
//! and a [`Ticker`] decides whether a tick is due. At most one tick runs per
//! poll, and a late poll never triggers a burst of catch-up ticks.

use std::{
    cell::Cell,
    time::{Duration, Instant},
};

/// A source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The system's monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Creates a clock frozen at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Decides when the next tick is due.
///
/// A disarmed ticker never fires. Once armed, the first poll anchors the
/// schedule and each later poll fires if at least one interval has passed
/// since the last anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticker {
    interval: Duration,
    armed: bool,
    next_due: Option<Instant>,
}

impl Ticker {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            armed: false,
            next_due: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Changes the interval and re-anchors the schedule at the next poll.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        self.next_due = None;
    }

    pub fn arm(&mut self) {
        if !self.armed {
            self.armed = true;
            self.next_due = None;
        }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.next_due = None;
    }

    /// Returns `true` if a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.armed {
            return false;
        }
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            Some(_) => false,
            None => {
                self.next_due = Some(now + self.interval);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn armed() -> (Ticker, ManualClock) {
        let mut ticker = Ticker::new(INTERVAL);
        ticker.arm();
        (ticker, ManualClock::new())
    }

    #[test]
    fn disarmed_never_fires() {
        let mut ticker = Ticker::new(INTERVAL);
        let clock = ManualClock::new();
        for _ in 0..5 {
            clock.advance(INTERVAL);
            assert!(!ticker.poll(clock.now()));
        }
    }

    #[test]
    fn fires_once_per_interval() {
        let (mut ticker, clock) = armed();
        assert!(!ticker.poll(clock.now()));

        clock.advance(Duration::from_millis(99));
        assert!(!ticker.poll(clock.now()));

        clock.advance(Duration::from_millis(1));
        assert!(ticker.poll(clock.now()));
        assert!(!ticker.poll(clock.now()));

        clock.advance(INTERVAL);
        assert!(ticker.poll(clock.now()));
    }

    #[test]
    fn late_polls_do_not_catch_up() {
        let (mut ticker, clock) = armed();
        ticker.poll(clock.now());

        clock.advance(INTERVAL * 10);
        assert!(ticker.poll(clock.now()));
        assert!(!ticker.poll(clock.now()));
    }

    #[test]
    fn rearming_restarts_the_schedule() {
        let (mut ticker, clock) = armed();
        ticker.poll(clock.now());
        ticker.disarm();

        clock.advance(INTERVAL);
        ticker.arm();
        assert!(!ticker.poll(clock.now()));
        assert!(ticker.is_armed());
    }

    #[test]
    fn new_interval_applies_from_next_poll() {
        let (mut ticker, clock) = armed();
        ticker.poll(clock.now());

        ticker.set_interval(Duration::from_millis(10));
        assert!(!ticker.poll(clock.now()));
        clock.advance(Duration::from_millis(10));
        assert!(ticker.poll(clock.now()));
    }
}
