//! HandCue Hand Model
//!
//! Defines the data contracts shared by the gesture engine and its drivers:
//! - **Landmarks:** The 21-joint hand skeleton produced by an external detector
//! - **Frames:** One detector result, with handedness and capture time
//! - **Gestures:** The closed label set and immutable gesture events
//! - **Synthetic:** Skeleton builder for tests and generated recordings
//!
//! All coordinates are normalized to `[0.0, 1.0]` image space, origin top-left.

pub mod frame;
pub mod gesture;
pub mod landmark;
pub mod synthetic;

pub use frame::*;
pub use gesture::*;
pub use landmark::*;
pub use synthetic::SyntheticHand;
