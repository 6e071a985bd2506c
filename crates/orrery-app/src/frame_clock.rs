//! Variable-rate frame clock.
//!
//! The orbital update consumes the real wall-clock delta between frames. A
//! long stall (window dragged, laptop lid closed, debugger break) would
//! otherwise fling every planet forward in one step, so the delta is clamped.

use std::time::Instant;

use tracing::debug;

/// Weight of the newest sample in the FPS moving average.
const FPS_SMOOTHING: f64 = 0.1;

pub struct FrameClock {
    previous: Instant,
    max_delta: f64,
    frame_count: u64,
    total_time: f64,
    fps: f64,
}

impl FrameClock {
    /// `max_delta` in seconds; 0 or less disables the clamp.
    pub fn new(max_delta: f64) -> Self {
        Self::starting_at(Instant::now(), max_delta)
    }

    fn starting_at(now: Instant, max_delta: f64) -> Self {
        Self {
            previous: now,
            max_delta,
            frame_count: 0,
            total_time: 0.0,
            fps: 0.0,
        }
    }

    /// Seconds since the previous tick, clamped.
    pub fn tick(&mut self) -> f64 {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> f64 {
        let raw = now.saturating_duration_since(self.previous).as_secs_f64();
        self.previous = now;
        self.record(raw)
    }

    fn record(&mut self, raw: f64) -> f64 {
        let dt = clamp_delta(raw, self.max_delta);
        if dt < raw {
            debug!(
                "Frame delta {:.1}ms clamped to {:.1}ms",
                raw * 1000.0,
                dt * 1000.0
            );
        }
        if raw > 0.0 {
            let sample = 1.0 / raw;
            self.fps = if self.frame_count == 0 {
                sample
            } else {
                self.fps + (sample - self.fps) * FPS_SMOOTHING
            };
        }
        self.frame_count += 1;
        self.total_time += dt;
        dt
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of clamped deltas.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

/// Clamp a raw delta to `[0, max]`. Non-finite input becomes 0.
pub fn clamp_delta(raw: f64, max: f64) -> f64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    if max > 0.0 { raw.min(max) } else { raw }
}
