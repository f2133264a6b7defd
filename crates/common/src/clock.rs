//! Clock and frame timing utilities.
//!
//! Every HandCue timestamp is integer milliseconds on a session clock whose
//! epoch is the moment the session started. This module provides:
//! - The session clock used by live landmark sources to stamp frames
//! - The frame-rate meter fed by every processed frame

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Milliseconds since session start.
pub type TimestampMs = u64;

/// A session clock that provides monotonic millisecond timestamps relative
/// to a fixed epoch (the moment the session started).
#[derive(Debug, Clone)]
pub struct SessionClock {
    /// The instant the session started.
    epoch: Instant,

    /// Wall-clock time at epoch (RFC 3339 string).
    epoch_wall: String,
}

impl SessionClock {
    /// Create a new session clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Milliseconds elapsed since session start.
    pub fn now_ms(&self) -> TimestampMs {
        TimestampMs::try_from(self.epoch.elapsed().as_millis()).unwrap_or(TimestampMs::MAX)
    }

    /// Wall-clock time at session start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }
}

/// Instantaneous frame-rate estimate from the interval between two frames.
///
/// Out-of-order or duplicate timestamps keep the previous reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameRateMeter {
    last_tick_ms: Option<TimestampMs>,
    fps: f64,
}

impl FrameRateMeter {
    /// Create a meter reading 0 fps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `now_ms` and return the current estimate.
    ///
    /// The first tick only sets the baseline.
    pub fn tick(&mut self, now_ms: TimestampMs) -> f64 {
        if let Some(last) = self.last_tick_ms {
            if now_ms > last {
                let elapsed = (now_ms - last) as f64;
                self.fps = round_to(1_000.0 / elapsed, 1);
            }
        }
        self.last_tick_ms = Some(now_ms);
        self.fps
    }

    /// Latest estimate.
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Back to 0 fps with no baseline.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Round `value` to `decimals` places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = SessionClock::start();
        // Should be very small but non-negative
        assert!(clock.now_ms() < 1_000);
        assert!(!clock.epoch_wall().is_empty());
    }

    #[test]
    fn test_first_tick_reads_zero() {
        let mut meter = FrameRateMeter::new();
        assert_eq!(meter.tick(1_000), 0.0);
    }

    #[test]
    fn test_fps_from_interval() {
        let mut meter = FrameRateMeter::new();
        meter.tick(0);
        assert_eq!(meter.tick(33), 30.3);
        assert_eq!(meter.tick(49), 62.5);
    }

    #[test]
    fn test_non_positive_interval_keeps_previous() {
        let mut meter = FrameRateMeter::new();
        meter.tick(100);
        assert_eq!(meter.tick(120), 50.0);
        assert_eq!(meter.tick(120), 50.0);
        assert_eq!(meter.tick(90), 50.0);
        // Baseline moved to 90 despite keeping the reading.
        assert_eq!(meter.tick(190), 10.0);
    }

    #[test]
    fn test_reset() {
        let mut meter = FrameRateMeter::new();
        meter.tick(0);
        meter.tick(10);
        meter.reset();
        assert_eq!(meter.fps(), 0.0);
        assert_eq!(meter.tick(500), 0.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.505, 2), 0.51);
        assert_eq!(round_to(30.303, 1), 30.3);
        assert_eq!(round_to(0.7, 2), 0.7);
    }
}
