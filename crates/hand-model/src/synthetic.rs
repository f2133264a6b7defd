//! Synthetic hand skeletons.
//!
//! Builds anatomically ordered 21-point skeletons for a chosen set of
//! extended digits. Extended fingers put the tip well above the PIP joint,
//! curled fingers fold the tip back below it, and the thumb tip moves
//! outward (or inward) along x relative to its IP joint, mirrored for the
//! left hand.

use handcue_common::clock::TimestampMs;

use crate::frame::HandFrame;
use crate::landmark::{Handedness, Landmark, HAND_LANDMARK_COUNT};

/// Horizontal offsets of each finger column from the wrist, index to pinky.
const FINGER_COLUMNS: [f64; 4] = [0.02, 0.05, 0.08, 0.11];

/// Builder for a synthetic hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticHand {
    /// `[thumb, index, middle, ring, pinky]`.
    pub extended: [bool; 5],
    pub handedness: Handedness,
    pub wrist_x: f64,
    pub wrist_y: f64,
}

impl SyntheticHand {
    /// A hand with the given digits extended, wrist at the lower middle.
    pub fn with_fingers(extended: [bool; 5]) -> Self {
        Self {
            extended,
            handedness: Handedness::Right,
            wrist_x: 0.5,
            wrist_y: 0.8,
        }
    }

    pub fn open_palm() -> Self {
        Self::with_fingers([true; 5])
    }

    pub fn fist() -> Self {
        Self::with_fingers([false; 5])
    }

    pub fn point() -> Self {
        Self::with_fingers([false, true, false, false, false])
    }

    pub fn scissors() -> Self {
        Self::with_fingers([false, true, true, false, false])
    }

    pub fn handedness(mut self, handedness: Handedness) -> Self {
        self.handedness = handedness;
        self
    }

    pub fn at(mut self, wrist_x: f64, wrist_y: f64) -> Self {
        self.wrist_x = wrist_x;
        self.wrist_y = wrist_y;
        self
    }

    /// The full 21-point skeleton.
    pub fn landmarks(&self) -> Vec<Landmark> {
        // Right hands open toward -x in the image, left hands toward +x.
        let side = match self.handedness {
            Handedness::Right => 1.0,
            Handedness::Left => -1.0,
        };
        let wx = self.wrist_x;
        let wy = self.wrist_y;
        let point = |dx: f64, dy: f64| Landmark::new(wx + side * dx, wy + dy, 0.0);

        let mut out = Vec::with_capacity(HAND_LANDMARK_COUNT);
        out.push(point(0.0, 0.0));

        // Thumb: CMC, MCP, IP, TIP.
        out.push(point(-0.04, -0.03));
        out.push(point(-0.08, -0.07));
        out.push(point(-0.11, -0.11));
        if self.extended[0] {
            out.push(point(-0.15, -0.14));
        } else {
            out.push(point(-0.08, -0.12));
        }

        // Fingers: MCP, PIP, DIP, TIP.
        for (column, &extended) in FINGER_COLUMNS.iter().zip(&self.extended[1..]) {
            out.push(point(*column, -0.15));
            out.push(point(*column, -0.22));
            if extended {
                out.push(point(*column, -0.27));
                out.push(point(*column, -0.32));
            } else {
                out.push(point(*column, -0.19));
                out.push(point(*column, -0.16));
            }
        }

        out
    }

    /// A frame carrying this hand.
    pub fn frame(&self, captured_at_ms: TimestampMs) -> HandFrame {
        HandFrame::new(captured_at_ms, self.landmarks(), Some(self.handedness))
    }
}
