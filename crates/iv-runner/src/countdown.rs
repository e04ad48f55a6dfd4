//! One countdown type for both the preparation and the recording phase.

use std::time::{Duration, Instant};

/// A countdown over `duration` that yields `on_expiry` exactly once.
///
/// Remaining time is always `duration - (now - started)`, so a late or
/// skipped poll never stretches the countdown.
#[derive(Debug, Clone)]
pub struct Countdown<E> {
    duration: Duration,
    started: Option<Instant>,
    on_expiry: E,
    fired: bool,
}

impl<E: Clone> Countdown<E> {
    #[must_use]
    pub const fn new(duration: Duration, on_expiry: E) -> Self {
        Self {
            duration,
            started: None,
            on_expiry,
            fired: false,
        }
    }

    /// Build and start in one step.
    #[must_use]
    pub const fn started(duration: Duration, on_expiry: E, now: Instant) -> Self {
        Self {
            duration,
            started: Some(now),
            on_expiry,
            fired: false,
        }
    }

    /// (Re)start from `now`.
    pub const fn start(&mut self, now: Instant) {
        self.started = Some(now);
        self.fired = false;
    }

    /// Stop without firing.
    pub const fn cancel(&mut self) {
        self.started = None;
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started.is_some() && !self.fired
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.started {
            Some(_) if self.fired => Duration::ZERO,
            Some(started) => self
                .duration
                .saturating_sub(now.saturating_duration_since(started)),
            None => self.duration,
        }
    }

    /// Whole seconds left, rounded up (what a display shows).
    #[must_use]
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        let remaining = self.remaining(now);
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    /// The expiry event, the first time this is polled at or past zero.
    pub fn poll(&mut self, now: Instant) -> Option<E> {
        if !self.is_running() || !self.remaining(now).is_zero() {
            return None;
        }
        self.fired = true;
        Some(self.on_expiry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Ev {
        Done,
    }

    #[test]
    fn fires_once_at_zero() {
        let t0 = Instant::now();
        let mut c = Countdown::started(Duration::from_secs(10), Ev::Done, t0);
        assert_eq!(c.poll(t0 + Duration::from_secs(9)), None);
        assert_eq!(c.poll(t0 + Duration::from_secs(10)), Some(Ev::Done));
        assert_eq!(c.poll(t0 + Duration::from_secs(11)), None);
        assert!(!c.is_running());
    }

    #[test]
    fn late_poll_still_fires() {
        let t0 = Instant::now();
        let mut c = Countdown::started(Duration::from_secs(3), Ev::Done, t0);
        assert_eq!(c.poll(t0 + Duration::from_secs(60)), Some(Ev::Done));
    }

    #[test]
    fn cancelled_never_fires() {
        let t0 = Instant::now();
        let mut c = Countdown::started(Duration::from_secs(1), Ev::Done, t0);
        c.cancel();
        assert_eq!(c.poll(t0 + Duration::from_secs(5)), None);
        assert_eq!(c.remaining(t0), Duration::from_secs(1));
    }

    #[test]
    fn unstarted_does_not_run() {
        let mut c = Countdown::new(Duration::ZERO, Ev::Done);
        assert!(!c.is_running());
        assert_eq!(c.poll(Instant::now()), None);
        c.start(Instant::now());
        assert_eq!(c.poll(Instant::now()), Some(Ev::Done));
    }

    #[rstest]
    #[case(0, 10)]
    #[case(1, 10)]
    #[case(1_000, 9)]
    #[case(9_500, 1)]
    #[case(10_000, 0)]
    #[case(12_000, 0)]
    fn remaining_secs_rounds_up(#[case] elapsed_ms: u64, #[case] expected: u64) {
        let t0 = Instant::now();
        let c = Countdown::started(Duration::from_secs(10), Ev::Done, t0);
        assert_eq!(c.remaining_secs(t0 + Duration::from_millis(elapsed_ms)), expected);
    }
}
