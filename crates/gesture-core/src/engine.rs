//! Engine lifecycle and the serializable engine state.
//!
//! [`GestureEngine`] owns the three state pools (arbiter, swipe window,
//! frame-rate meter) and gates frame processing behind `start`/`stop`.
//! [`EngineState`] is the same state as plain data, and [`transition`] is the
//! pure `(state, frame) -> (state, event)` form of a single step.

use handcue_common::clock::{FrameRateMeter, TimestampMs};
use handcue_common::config::EngineConfig;
use handcue_hand_model::frame::HandFrame;
use handcue_hand_model::gesture::GestureEvent;
use serde::{Deserialize, Serialize};

use crate::arbiter::{GestureArbiter, History};
use crate::motion::{MotionSample, MotionWindow, SwipeConfig};

/// Presentation hint describing what the engine is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineStatus {
    #[default]
    Idle,
    AwaitingPermission,
    Error,
    Running,
}

impl EngineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingPermission => "awaiting-permission",
            Self::Error => "error",
            Self::Running => "running",
        }
    }
}

impl std::fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one processed frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub current: GestureEvent,
    pub emitted: Option<GestureEvent>,
    pub fps: f64,
}

/// Everything a presentation layer needs after a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineView {
    pub current: GestureEvent,
    pub history: Vec<GestureEvent>,
    pub fps: f64,
    pub running: bool,
    pub status: EngineStatus,
}

/// The complete mutable state of the engine as plain data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineState {
    pub current: GestureEvent,
    pub history: Vec<GestureEvent>,
    pub motion_samples: Vec<MotionSample>,
    pub last_swipe_ms: Option<TimestampMs>,
    pub frame_rate: FrameRateMeter,
}

/// Frame-driven gesture engine.
#[derive(Debug, Clone)]
pub struct GestureEngine {
    config: EngineConfig,
    arbiter: GestureArbiter,
    frame_rate: FrameRateMeter,
    running: bool,
    status: EngineStatus,
}

impl GestureEngine {
    /// Create an idle engine. Call [`start`](Self::start) before feeding frames.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            arbiter: GestureArbiter::new(&config),
            config,
            frame_rate: FrameRateMeter::new(),
            running: false,
            status: EngineStatus::Idle,
        }
    }

    /// Create an idle engine with default parameters.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Rebuild a running engine from captured state.
    pub fn from_state(config: EngineConfig, state: EngineState) -> Self {
        let motion = MotionWindow::from_parts(
            SwipeConfig::from(&config),
            state.motion_samples,
            state.last_swipe_ms,
        );
        let mut history = History::new(config.history_capacity);
        // Stored most recent first; replay oldest first.
        for event in state.history.into_iter().rev() {
            history.push(event);
        }
        Self {
            arbiter: GestureArbiter::from_parts(&config, motion, state.current, history),
            config,
            frame_rate: state.frame_rate,
            running: true,
            status: EngineStatus::Running,
        }
    }

    /// Reset to the zero state and begin accepting frames.
    pub fn start(&mut self) {
        self.reset_state();
        self.running = true;
        self.status = EngineStatus::Running;
        tracing::info!("gesture engine started");
    }

    /// Stop accepting frames and clear every state pool.
    pub fn stop(&mut self) {
        self.halt(EngineStatus::Idle);
        tracing::info!("gesture engine stopped");
    }

    /// Stop with a non-idle status, e.g. after the landmark source failed.
    pub fn halt(&mut self, status: EngineStatus) {
        self.reset_state();
        self.running = false;
        self.status = status;
    }

    fn reset_state(&mut self) {
        self.arbiter.reset();
        self.frame_rate.reset();
    }

    /// Process one frame. Frames delivered while stopped are ignored.
    pub fn process(&mut self, frame: &HandFrame) -> Option<FrameOutcome> {
        if !self.running {
            tracing::debug!(t = frame.captured_at_ms, "frame ignored, engine not running");
            return None;
        }

        let resolution = self.arbiter.process(frame);
        let fps = self.frame_rate.tick(frame.captured_at_ms);

        Some(FrameOutcome {
            current: resolution.current,
            emitted: resolution.emitted,
            fps,
        })
    }

    /// Snapshot of the presentation-facing outputs.
    pub fn view(&self) -> EngineView {
        EngineView {
            current: *self.arbiter.current(),
            history: self.arbiter.history().to_vec(),
            fps: self.frame_rate.fps(),
            running: self.running,
            status: self.status,
        }
    }

    /// Capture the mutable state as plain data.
    pub fn state(&self) -> EngineState {
        let motion = self.arbiter.motion();
        EngineState {
            current: *self.arbiter.current(),
            history: self.arbiter.history().to_vec(),
            motion_samples: motion.samples().copied().collect(),
            last_swipe_ms: motion.last_swipe_ms(),
            frame_rate: self.frame_rate,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn current(&self) -> &GestureEvent {
        self.arbiter.current()
    }

    pub fn history(&self) -> &History {
        self.arbiter.history()
    }

    pub fn fps(&self) -> f64 {
        self.frame_rate.fps()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn status(&self) -> EngineStatus {
        self.status
    }
}

/// Advance `state` by one frame.
///
/// Returns the next state and the event that entered the history, if any.
pub fn transition(
    config: &EngineConfig,
    state: EngineState,
    frame: &HandFrame,
) -> (EngineState, Option<GestureEvent>) {
    let mut engine = GestureEngine::from_state(config.clone(), state);
    let emitted = engine.process(frame).and_then(|outcome| outcome.emitted);
    (engine.state(), emitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use handcue_hand_model::gesture::GestureLabel;
    use handcue_hand_model::synthetic::SyntheticHand;

    fn swipe_frames() -> Vec<HandFrame> {
        [(0.30, 1_000), (0.34, 1_200), (0.45, 1_400)]
            .iter()
            .map(|&(x, t)| SyntheticHand::open_palm().at(x, 0.8).frame(t))
            .collect()
    }

    #[test]
    fn test_new_engine_is_idle() {
        let mut engine = GestureEngine::with_defaults();
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert!(engine.process(&SyntheticHand::fist().frame(0)).is_none());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_start_then_process() {
        let mut engine = GestureEngine::with_defaults();
        engine.start();
        let first = engine.process(&SyntheticHand::fist().frame(0)).unwrap();
        assert_eq!(first.current.label(), GestureLabel::Fist);
        assert_eq!(first.fps, 0.0);

        let second = engine.process(&SyntheticHand::fist().frame(40)).unwrap();
        assert_eq!(second.fps, 25.0);
        assert!(second.emitted.is_none());

        let view = engine.view();
        assert!(view.running);
        assert_eq!(view.status, EngineStatus::Running);
        assert_eq!(view.history.len(), 1);
    }

    #[test]
    fn test_stop_resets_every_pool() {
        let mut engine = GestureEngine::with_defaults();
        engine.start();
        for frame in swipe_frames() {
            engine.process(&frame);
        }
        assert!(engine.state().last_swipe_ms.is_some());

        engine.stop();
        assert_eq!(engine.state(), EngineState::default());
        assert!(!engine.is_running());
        assert_eq!(engine.status(), EngineStatus::Idle);
    }

    #[test]
    fn test_restart_replays_identically() {
        let mut engine = GestureEngine::with_defaults();
        engine.start();
        let first: Vec<_> = swipe_frames()
            .iter()
            .filter_map(|f| engine.process(f))
            .collect();

        engine.stop();
        engine.start();
        let second: Vec<_> = swipe_frames()
            .iter()
            .filter_map(|f| engine.process(f))
            .collect();

        assert_eq!(first, second);
        assert_eq!(
            second.last().unwrap().emitted.unwrap().label(),
            GestureLabel::SwipeRight
        );
    }

    #[test]
    fn test_short_skeleton_with_low_min_landmarks_is_unknown() {
        let config = EngineConfig {
            min_landmarks: 5,
            ..EngineConfig::default()
        };
        let landmarks = SyntheticHand::open_palm().landmarks()[..10].to_vec();
        let frame = HandFrame::new(0, landmarks, None);

        let mut engine = GestureEngine::new(config.clone());
        engine.start();
        let outcome = engine.process(&frame).unwrap();
        assert_eq!(outcome.current.label(), GestureLabel::Unknown);
        assert!(outcome.emitted.is_none());

        let (state, event) = transition(&config, EngineState::default(), &frame);
        assert!(event.is_none());
        assert_eq!(state.current.label(), GestureLabel::Unknown);
    }

    #[test]
    fn test_halt_records_status() {
        let mut engine = GestureEngine::with_defaults();
        engine.start();
        engine.halt(EngineStatus::AwaitingPermission);
        assert!(!engine.is_running());
        assert_eq!(engine.view().status.as_str(), "awaiting-permission");
    }

    #[test]
    fn test_transition_matches_engine() {
        let config = EngineConfig::default();
        let mut state = EngineState::default();
        let mut emitted = Vec::new();
        for frame in swipe_frames() {
            let (next, event) = transition(&config, state, &frame);
            state = next;
            emitted.extend(event);
        }
        let labels: Vec<_> = emitted.iter().map(|e| e.label()).collect();
        assert_eq!(labels, vec![GestureLabel::OpenPalm, GestureLabel::SwipeRight]);
        assert_eq!(state.history[0].label(), GestureLabel::SwipeRight);
        assert_eq!(state.last_swipe_ms, Some(1_400));
        assert_eq!(state.motion_samples.len(), 3);
        assert_eq!(state.frame_rate.fps(), 5.0);
    }

    #[test]
    fn test_state_serializes() {
        let mut engine = GestureEngine::with_defaults();
        engine.start();
        for frame in swipe_frames() {
            engine.process(&frame);
        }
        let state = engine.state();
        let json = serde_json::to_string(&state).unwrap();
        let back: EngineState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);

        let restored = GestureEngine::from_state(EngineConfig::default(), back);
        assert_eq!(restored.history().to_vec(), engine.history().to_vec());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&EngineStatus::AwaitingPermission).unwrap(),
            "\"awaiting-permission\""
        );
        assert_eq!(EngineStatus::Running.to_string(), "running");
    }
}
