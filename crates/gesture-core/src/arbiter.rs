//! Per-frame arbitration between pose and motion, plus the event history.

use std::collections::VecDeque;

use handcue_common::config::EngineConfig;
use handcue_hand_model::frame::HandFrame;
use handcue_hand_model::gesture::{GestureEvent, GestureLabel};

use crate::motion::{MotionWindow, SwipeConfig};
use crate::pose::PoseClassifier;

/// Most-recent-first ring of gesture events with a fixed capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    entries: VecDeque<GestureEvent>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Insert at the front, dropping the oldest entry on overflow.
    pub fn push(&mut self, event: GestureEvent) {
        self.entries.push_front(event);
        self.entries.truncate(self.capacity);
    }

    /// The most recent entry.
    pub fn latest(&self) -> Option<&GestureEvent> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GestureEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries as a vector, most recent first.
    pub fn to_vec(&self) -> Vec<GestureEvent> {
        self.entries.iter().copied().collect()
    }
}

/// Result of arbitrating one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The authoritative gesture for this frame.
    pub current: GestureEvent,
    /// Set when `current` was a transition and entered the history.
    pub emitted: Option<GestureEvent>,
}

/// Runs the classifier and the swipe detector on each frame and decides
/// which result stands.
#[derive(Debug, Clone)]
pub struct GestureArbiter {
    classifier: PoseClassifier,
    motion: MotionWindow,
    current: GestureEvent,
    history: History,
}

impl GestureArbiter {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            classifier: PoseClassifier::new(config),
            motion: MotionWindow::new(SwipeConfig::from(config)),
            current: GestureEvent::unknown(0),
            history: History::new(config.history_capacity),
        }
    }

    /// Rebuild an arbiter around existing state.
    pub fn from_parts(
        config: &EngineConfig,
        motion: MotionWindow,
        current: GestureEvent,
        history: History,
    ) -> Self {
        Self {
            classifier: PoseClassifier::new(config),
            motion,
            current,
            history,
        }
    }

    /// Resolve one frame.
    ///
    /// Motion wins over pose when both are available. The history only
    /// grows when the label changes to something other than `Unknown`.
    pub fn process(&mut self, frame: &HandFrame) -> Resolution {
        let now_ms = frame.captured_at_ms;

        if !frame.has_hand() {
            self.motion.clear_samples();
            self.current = GestureEvent::unknown(now_ms);
            return Resolution {
                current: self.current,
                emitted: None,
            };
        }

        let pose = self.classifier.classify_frame(frame);
        let swipe = self.motion.observe(&frame.landmarks, pose.label(), now_ms);
        let resolved = swipe.unwrap_or(pose);

        let previous = self.current.label();
        let emitted = if resolved.label() != previous && resolved.label() != GestureLabel::Unknown
        {
            self.history.push(resolved);
            tracing::debug!(
                from = %previous,
                to = %resolved.label(),
                confidence = resolved.confidence(),
                t = now_ms,
                "gesture transition"
            );
            Some(resolved)
        } else {
            None
        };

        self.current = resolved;
        Resolution {
            current: resolved,
            emitted,
        }
    }

    /// Back to the zero state: `Unknown`, empty history, no cooldown.
    pub fn reset(&mut self) {
        self.motion.reset();
        self.current = GestureEvent::unknown(0);
        self.history.clear();
    }

    pub fn current(&self) -> &GestureEvent {
        &self.current
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn motion(&self) -> &MotionWindow {
        &self.motion
    }
}
