use std::time::{Duration, Instant};

/// Throttle that decouples the logical tick rate from the host repaint rate
///
/// Fires once at least one interval has passed since the last fire. The
/// remainder of the elapsed time is carried over so the average rate stays
/// on target even when the host repaints at an unrelated cadence.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    interval: Duration,
    then: Option<Instant>,
}

impl FrameLimiter {
    /// Create limiter for a target rate in frames per second.
    /// Rates whose interval overflows a `Duration` fire only once.
    pub fn new(fps: f64) -> Self {
        Self {
            interval: Duration::try_from_secs_f64(1.0 / fps).unwrap_or(Duration::MAX),
            then: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Attempt to fire at `now`, returns true if a tick should run
    pub fn try_fire(&mut self, now: Instant) -> bool {
        let Some(then) = self.then else {
            self.then = Some(now);
            return true;
        };

        let elapsed = now.saturating_duration_since(then);
        if elapsed < self.interval {
            return false;
        }

        let carry = elapsed.as_nanos() % self.interval.as_nanos().max(1);
        self.then = Some(now - Duration::from_nanos(carry as u64));
        true
    }

    /// Treat `now` as the time of the last fire
    pub fn mark(&mut self, now: Instant) {
        self.then = Some(now);
    }

    /// Forget the last fire so the next attempt fires immediately
    pub fn reset(&mut self) {
        self.then = None;
    }
}
