//! Per-detector-result hand frames and their JSONL recording format.
//!
//! A recording is one [`HandFrame`] per line. Lines starting with `#` carry
//! the [`RecordingHeader`] or comments and are skipped by the parser.

use handcue_common::clock::TimestampMs;
use serde::{Deserialize, Serialize};

use crate::landmark::{Handedness, Landmark, HAND_LANDMARK_COUNT, WRIST};

/// Current recording schema version.
pub const RECORDING_SCHEMA_VERSION: &str = "1.0";

/// One detector result: zero or one hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    /// Session milliseconds at which the detector produced this result.
    #[serde(rename = "t")]
    pub captured_at_ms: TimestampMs,

    /// Detector handedness label, when supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handedness: Option<Handedness>,

    /// Skeleton joints; empty when no hand was detected.
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

impl HandFrame {
    /// A frame carrying a detected hand.
    pub fn new(
        captured_at_ms: TimestampMs,
        landmarks: Vec<Landmark>,
        handedness: Option<Handedness>,
    ) -> Self {
        Self {
            captured_at_ms,
            handedness,
            landmarks,
        }
    }

    /// A frame in which the detector found no hand.
    pub fn no_hand(captured_at_ms: TimestampMs) -> Self {
        Self {
            captured_at_ms,
            handedness: None,
            landmarks: Vec::new(),
        }
    }

    /// Whether the detector reported any hand at all.
    pub fn has_hand(&self) -> bool {
        !self.landmarks.is_empty()
    }

    /// Whether every skeleton joint is present.
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() >= HAND_LANDMARK_COUNT
    }

    /// Handedness, defaulting to right when the detector gave none.
    pub fn handedness_or_default(&self) -> Handedness {
        self.handedness.unwrap_or_default()
    }

    /// The wrist joint, if present.
    pub fn wrist(&self) -> Option<&Landmark> {
        self.landmarks.get(WRIST)
    }
}

/// Metadata written as the first line of a recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingHeader {
    /// Schema version for forward compatibility.
    pub schema_version: String,

    /// Wall-clock time at session start (RFC 3339).
    pub epoch_wall: String,

    /// Free-form description of what produced the frames.
    pub source: String,
}

impl RecordingHeader {
    pub fn new(epoch_wall: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            schema_version: RECORDING_SCHEMA_VERSION.to_string(),
            epoch_wall: epoch_wall.into(),
            source: source.into(),
        }
    }
}

/// Parse frames from JSONL content (one JSON object per line).
pub fn parse_frames(jsonl: &str) -> Result<Vec<HandFrame>, serde_json::Error> {
    jsonl
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}

/// Extract the recording header, if the content starts with one.
pub fn parse_header(jsonl: &str) -> Option<RecordingHeader> {
    jsonl
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .and_then(|line| line.strip_prefix('#'))
        .and_then(|rest| serde_json::from_str(rest.trim()).ok())
}
