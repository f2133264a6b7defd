//! Swipe detection over a sliding window of wrist positions.
//!
//! Tracking only runs while the hand is held open. Each open-palm frame adds
//! a wrist sample; samples older than the wave window are evicted first. Once
//! enough samples remain, the net horizontal travel between the oldest and
//! newest sample decides the swipe direction. A cooldown after each emission
//! keeps one continuous wave from firing on every frame.

use std::collections::VecDeque;

use handcue_common::clock::TimestampMs;
use handcue_common::config::EngineConfig;
use handcue_hand_model::gesture::{GestureEvent, GestureLabel};
use handcue_hand_model::landmark::{Landmark, WRIST};
use serde::{Deserialize, Serialize};

/// One wrist observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    pub wrist_x: f64,
    pub captured_at_ms: TimestampMs,
}

/// Swipe detection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub window_ms: u64,
    pub threshold: f64,
    pub cooldown_ms: u64,
    pub full_confidence_travel: f64,
    pub min_samples: usize,
}

impl From<&EngineConfig> for SwipeConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            window_ms: config.wave_window_ms,
            threshold: config.wave_threshold,
            cooldown_ms: config.wave_cooldown_ms,
            full_confidence_travel: config.wave_full_confidence_travel,
            min_samples: config.wave_min_samples,
        }
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// Time-bounded wrist buffer plus swipe cooldown.
#[derive(Debug, Clone, Default)]
pub struct MotionWindow {
    config: SwipeConfig,
    samples: VecDeque<MotionSample>,
    /// Time of the last emitted swipe; `None` is the zeroed cooldown.
    last_swipe_ms: Option<TimestampMs>,
}

impl MotionWindow {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            samples: VecDeque::new(),
            last_swipe_ms: None,
        }
    }

    /// Rebuild a window from previously captured state.
    pub fn from_parts(
        config: SwipeConfig,
        samples: impl IntoIterator<Item = MotionSample>,
        last_swipe_ms: Option<TimestampMs>,
    ) -> Self {
        Self {
            config,
            samples: samples.into_iter().collect(),
            last_swipe_ms,
        }
    }

    /// Feed one frame's landmarks with the pose classified for that frame.
    ///
    /// Returns a swipe event when the window shows enough lateral travel
    /// and the cooldown has elapsed.
    pub fn observe(
        &mut self,
        landmarks: &[Landmark],
        static_label: GestureLabel,
        now_ms: TimestampMs,
    ) -> Option<GestureEvent> {
        if static_label != GestureLabel::OpenPalm {
            self.clear_samples();
            return None;
        }
        let wrist = landmarks.get(WRIST)?;

        let window_ms = self.config.window_ms;
        self.samples
            .retain(|s| now_ms.saturating_sub(s.captured_at_ms) <= window_ms);
        self.samples.push_back(MotionSample {
            wrist_x: wrist.x,
            captured_at_ms: now_ms,
        });

        if self.samples.len() < self.config.min_samples {
            return None;
        }

        let oldest = self.samples.front()?;
        let newest = self.samples.back()?;
        let delta = newest.wrist_x - oldest.wrist_x;
        if delta.abs() < self.config.threshold {
            return None;
        }

        if let Some(last) = self.last_swipe_ms {
            if now_ms.saturating_sub(last) < self.config.cooldown_ms {
                return None;
            }
        }

        let label = if delta > 0.0 {
            GestureLabel::SwipeRight
        } else {
            GestureLabel::SwipeLeft
        };
        let confidence = (delta.abs() / self.config.full_confidence_travel).min(1.0);
        self.last_swipe_ms = Some(now_ms);

        tracing::debug!(
            label = %label,
            delta,
            samples = self.samples.len(),
            "swipe detected"
        );

        Some(GestureEvent::new(label, confidence, now_ms))
    }

    /// Drop buffered samples; the cooldown survives.
    pub fn clear_samples(&mut self) {
        self.samples.clear();
    }

    /// Drop samples and forget the last swipe.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.last_swipe_ms = None;
    }

    pub fn samples(&self) -> impl Iterator<Item = &MotionSample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time of the last emitted swipe, `None` when the cooldown is zeroed
    /// (no swipe yet, or after a reset).
    pub fn last_swipe_ms(&self) -> Option<TimestampMs> {
        self.last_swipe_ms
    }
}
