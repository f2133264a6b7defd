//! HandCue Gesture Core — the gesture inference engine
//!
//! Turns a per-frame stream of hand landmarks into discrete gesture events:
//! - **Pose:** Rule-based static classification from joint geometry
//! - **Motion:** Windowed wrist tracking that detects swipes on an open palm
//! - **Arbiter:** Picks motion over pose, debounces, keeps the rolling history
//! - **Engine:** Start/stop lifecycle, frame-rate tracking, serializable state
//! - **Session:** Drives the engine from an injected landmark source
//!
//! Every step is synchronous and completes within the call that delivers a
//! frame. Only the [`recording`] module touches the filesystem.

pub mod arbiter;
pub mod engine;
pub mod motion;
pub mod pose;
pub mod recording;
pub mod session;

pub use arbiter::GestureArbiter;
pub use engine::{transition, EngineState, EngineStatus, GestureEngine};
pub use motion::MotionWindow;
pub use pose::PoseClassifier;
pub use session::{LandmarkSource, Session};
