use std::time::{Duration, Instant};

/// Minimal frame clock - tracks wall-clock delta between repaints
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Delta since the last tick in seconds, advancing the clock to `now`
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }

    /// Get delta time since last tick and advance clock
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    /// Reset clock to current time
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Averages repaint deltas and reports frames per second once per second
#[derive(Debug, Default)]
pub struct FrameRateMeter {
    frames: u32,
    elapsed: f32,
}

impl FrameRateMeter {
    const WINDOW: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame; returns the rate when a full window has elapsed
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed < Self::WINDOW.as_secs_f32() {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(fps)
    }
}
