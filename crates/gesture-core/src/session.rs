//! Driving the engine from an external landmark source.
//!
//! The detector (camera plus vision pipeline) is injected as a
//! [`LandmarkSource`]. A [`Session`] pulls frames from it in arrival order
//! and hands each one to the engine exactly once. Source failures never reach
//! the engine as errors: they stop the session and are reflected in the
//! engine status.

use std::collections::VecDeque;

use handcue_common::clock::SessionClock;
use handcue_common::config::EngineConfig;
use handcue_common::error::{HandcueError, HandcueResult};
use handcue_hand_model::frame::{HandFrame, RecordingHeader};
use handcue_hand_model::gesture::GestureEvent;
use handcue_hand_model::landmark::{Handedness, Landmark};

use crate::engine::{EngineStatus, EngineView, FrameOutcome, GestureEngine};

/// A producer of hand frames.
pub trait LandmarkSource {
    /// Next detector result. `Ok(None)` means the stream has ended.
    ///
    /// A frame with no landmarks means no hand was found.
    fn next_frame(&mut self) -> HandcueResult<Option<HandFrame>>;

    /// Short description for logs.
    fn describe(&self) -> String {
        "landmark source".to_string()
    }
}

/// Replays frames that were captured earlier.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    header: Option<RecordingHeader>,
    frames: VecDeque<HandFrame>,
}

impl ReplaySource {
    pub fn from_frames(frames: impl IntoIterator<Item = HandFrame>) -> Self {
        Self {
            header: None,
            frames: frames.into_iter().collect(),
        }
    }

    pub fn with_header(mut self, header: RecordingHeader) -> Self {
        self.header = Some(header);
        self
    }

    pub fn header(&self) -> Option<&RecordingHeader> {
        self.header.as_ref()
    }

    /// Frames not yet delivered.
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for ReplaySource {
    fn next_frame(&mut self) -> HandcueResult<Option<HandFrame>> {
        Ok(self.frames.pop_front())
    }

    fn describe(&self) -> String {
        match &self.header {
            Some(header) => format!("replay of {}", header.source),
            None => "replay".to_string(),
        }
    }
}

/// Raw output of a live detector call: landmarks and optional handedness.
pub type DetectorResult = (Vec<Landmark>, Option<Handedness>);

/// Wraps a detector callback and stamps its results with session time.
pub struct DetectorSource<F> {
    detect: F,
    clock: SessionClock,
}

impl<F> DetectorSource<F>
where
    F: FnMut() -> HandcueResult<Option<DetectorResult>>,
{
    pub fn new(detect: F, clock: SessionClock) -> Self {
        Self { detect, clock }
    }
}

impl<F> LandmarkSource for DetectorSource<F>
where
    F: FnMut() -> HandcueResult<Option<DetectorResult>>,
{
    fn next_frame(&mut self) -> HandcueResult<Option<HandFrame>> {
        let result = (self.detect)()?;
        let now_ms = self.clock.now_ms();
        Ok(result.map(|(landmarks, handedness)| HandFrame::new(now_ms, landmarks, handedness)))
    }

    fn describe(&self) -> String {
        format!("live detector since {}", self.clock.epoch_wall())
    }
}

/// Result of pulling one frame through a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionStep {
    /// A frame was processed.
    Frame(FrameOutcome),
    /// The source has no more frames.
    Ended,
    /// The source failed; the engine was halted.
    Failed(String),
}

/// Counters collected while a session runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSummary {
    pub frames: u64,
    pub hand_frames: u64,
    pub transitions: Vec<GestureEvent>,
    pub error: Option<String>,
    pub final_view: Option<EngineView>,
}

/// Owns a source and an engine and moves frames between them.
pub struct Session<S> {
    source: S,
    engine: GestureEngine,
    summary: SessionSummary,
}

impl<S: LandmarkSource> Session<S> {
    /// Create a session and start its engine.
    pub fn new(source: S, config: EngineConfig) -> Self {
        let mut engine = GestureEngine::new(config);
        engine.start();
        tracing::info!(source = %source.describe(), "session started");
        Self {
            source,
            engine,
            summary: SessionSummary::default(),
        }
    }

    /// Pull and process a single frame.
    pub fn step(&mut self) -> SessionStep {
        if !self.engine.is_running() {
            return SessionStep::Ended;
        }

        match self.source.next_frame() {
            Ok(Some(frame)) => {
                self.summary.frames += 1;
                if frame.has_hand() {
                    self.summary.hand_frames += 1;
                }
                match self.engine.process(&frame) {
                    Some(outcome) => {
                        if let Some(event) = outcome.emitted {
                            self.summary.transitions.push(event);
                        }
                        SessionStep::Frame(outcome)
                    }
                    None => SessionStep::Ended,
                }
            }
            Ok(None) => SessionStep::Ended,
            Err(e) => {
                let status = match e {
                    HandcueError::PermissionDenied { .. } => EngineStatus::AwaitingPermission,
                    _ => EngineStatus::Error,
                };
                tracing::warn!(error = %e, status = %status, "landmark source failed");
                let message = e.to_string();
                // Keep the outputs the presentation layer last saw, minus running.
                let mut view = self.engine.view();
                self.engine.halt(status);
                view.running = false;
                view.status = status;
                self.summary.final_view = Some(view);
                self.summary.error = Some(message.clone());
                SessionStep::Failed(message)
            }
        }
    }

    /// Run until the source ends or fails, calling `on_frame` after every
    /// processed frame.
    pub fn run<F>(mut self, mut on_frame: F) -> SessionSummary
    where
        F: FnMut(&FrameOutcome),
    {
        loop {
            match self.step() {
                SessionStep::Frame(outcome) => on_frame(&outcome),
                SessionStep::Ended | SessionStep::Failed(_) => break,
            }
        }
        self.finish()
    }

    /// Stop the engine and return the collected summary.
    pub fn finish(mut self) -> SessionSummary {
        if self.summary.final_view.is_none() {
            self.summary.final_view = Some(self.engine.view());
        }
        if self.engine.is_running() {
            self.engine.stop();
        }
        tracing::info!(
            frames = self.summary.frames,
            transitions = self.summary.transitions.len(),
            "session finished"
        );
        self.summary
    }

    pub fn engine(&self) -> &GestureEngine {
        &self.engine
    }
}
