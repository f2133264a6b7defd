//! Gesture labels and the events the engine emits.

use handcue_common::clock::{round_to, TimestampMs};
use serde::{Deserialize, Serialize};

/// Closed set of gestures the engine can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureLabel {
    OpenPalm,
    Fist,
    Point,
    Scissors,
    SwipeLeft,
    SwipeRight,
    #[default]
    Unknown,
}

impl GestureLabel {
    pub const ALL: [GestureLabel; 7] = [
        Self::OpenPalm,
        Self::Fist,
        Self::Point,
        Self::Scissors,
        Self::SwipeLeft,
        Self::SwipeRight,
        Self::Unknown,
    ];

    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenPalm => "open_palm",
            Self::Fist => "fist",
            Self::Point => "point",
            Self::Scissors => "scissors",
            Self::SwipeLeft => "swipe_left",
            Self::SwipeRight => "swipe_right",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable name for presentation.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenPalm => "Open Palm",
            Self::Fist => "Fist",
            Self::Point => "Point",
            Self::Scissors => "Scissors",
            Self::SwipeLeft => "Swipe Left",
            Self::SwipeRight => "Swipe Right",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified gesture at a point in time.
///
/// Confidence is clamped to `[0, 1]` and rounded to two decimals on
/// construction; fields are read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    label: GestureLabel,
    confidence: f64,
    #[serde(rename = "t")]
    timestamp_ms: TimestampMs,
}

impl GestureEvent {
    pub fn new(label: GestureLabel, confidence: f64, timestamp_ms: TimestampMs) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            round_to(confidence.clamp(0.0, 1.0), 2)
        };
        Self {
            label,
            confidence,
            timestamp_ms,
        }
    }

    /// The `Unknown` sentinel with zero confidence.
    pub fn unknown(timestamp_ms: TimestampMs) -> Self {
        Self::new(GestureLabel::Unknown, 0.0, timestamp_ms)
    }

    pub fn label(&self) -> GestureLabel {
        self.label
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn timestamp_ms(&self) -> TimestampMs {
        self.timestamp_ms
    }
}

impl Default for GestureEvent {
    fn default() -> Self {
        Self::unknown(0)
    }
}
