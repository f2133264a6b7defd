//! Static pose classification.
//!
//! Each digit is tested for extension against its own reference joint:
//! fingers compare tip and PIP heights, the thumb compares tip and IP along x
//! (mirrored between hands). The resulting five-digit pattern is matched
//! against the rules below, first match wins:
//!
//! 1. All five extended: **OpenPalm**
//! 2. Index to pinky curled (thumb free): **Fist**
//! 3. Only index among the fingers: **Point**
//! 4. Index and middle, ring and pinky curled: **Scissors**
//! 5. Anything else: **Unknown**

use handcue_common::clock::TimestampMs;
use handcue_common::config::EngineConfig;
use handcue_hand_model::frame::HandFrame;
use handcue_hand_model::gesture::{GestureEvent, GestureLabel};
use handcue_hand_model::landmark::{
    Handedness, Landmark, FINGER_TIP_PIP, HAND_LANDMARK_COUNT, THUMB_IP, THUMB_TIP,
};

/// Confidence reported for a recognised point pose.
const POINT_CONFIDENCE: f64 = 0.7;

/// Confidence reported for a recognised scissors pose.
const SCISSORS_CONFIDENCE: f64 = 0.8;

/// Extension state of each digit, `[thumb, index, middle, ring, pinky]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FingerStates(pub [bool; 5]);

impl FingerStates {
    pub fn thumb(&self) -> bool {
        self.0[0]
    }

    pub fn index(&self) -> bool {
        self.0[1]
    }

    pub fn middle(&self) -> bool {
        self.0[2]
    }

    pub fn ring(&self) -> bool {
        self.0[3]
    }

    pub fn pinky(&self) -> bool {
        self.0[4]
    }

    /// Number of extended digits, thumb included.
    pub fn extended_count(&self) -> usize {
        self.0.iter().filter(|&&e| e).count()
    }

    /// Compact `T I M R P` rendering, `-` for curled digits.
    pub fn pattern(&self) -> String {
        self.0
            .iter()
            .zip(['T', 'I', 'M', 'R', 'P'])
            .map(|(&e, c)| if e { c } else { '-' })
            .collect()
    }
}

/// Stateless rule-based pose classifier.
#[derive(Debug, Clone)]
pub struct PoseClassifier {
    extension_margin: f64,
    min_landmarks: usize,
}

impl PoseClassifier {
    /// Create a classifier from engine parameters.
    ///
    /// `min_landmarks` never drops below a full skeleton.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            extension_margin: config.extension_margin,
            min_landmarks: config.min_landmarks.max(HAND_LANDMARK_COUNT),
        }
    }

    /// Create a classifier with default parameters.
    pub fn with_defaults() -> Self {
        Self::new(&EngineConfig::default())
    }

    /// Landmarks a skeleton needs before it is classified.
    pub fn min_landmarks(&self) -> usize {
        self.min_landmarks
    }

    /// Per-digit extension, or `None` when the skeleton is incomplete.
    pub fn finger_states(
        &self,
        landmarks: &[Landmark],
        handedness: Handedness,
    ) -> Option<FingerStates> {
        if landmarks.len() < self.min_landmarks {
            return None;
        }

        let margin = self.extension_margin;
        let tip = landmarks[THUMB_TIP];
        let ip = landmarks[THUMB_IP];
        let thumb = match handedness {
            Handedness::Right => tip.x < ip.x - margin,
            Handedness::Left => tip.x > ip.x + margin,
        };

        let mut states = [thumb, false, false, false, false];
        for (slot, (tip, pip)) in states[1..].iter_mut().zip(FINGER_TIP_PIP) {
            // Smaller y is higher in the image.
            *slot = landmarks[tip].y < landmarks[pip].y - margin;
        }

        Some(FingerStates(states))
    }

    /// Classify one skeleton at time `now_ms`.
    ///
    /// Incomplete skeletons yield the `Unknown` sentinel.
    pub fn classify(
        &self,
        landmarks: &[Landmark],
        handedness: Handedness,
        now_ms: TimestampMs,
    ) -> GestureEvent {
        match self.finger_states(landmarks, handedness) {
            Some(states) => {
                let (label, confidence) = match_pose(&states);
                GestureEvent::new(label, confidence, now_ms)
            }
            None => GestureEvent::unknown(now_ms),
        }
    }

    /// Classify a frame at its capture time, right hand when unlabeled.
    pub fn classify_frame(&self, frame: &HandFrame) -> GestureEvent {
        self.classify(
            &frame.landmarks,
            frame.handedness_or_default(),
            frame.captured_at_ms,
        )
    }
}

impl Default for PoseClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Rule table. The order is part of the contract.
fn match_pose(states: &FingerStates) -> (GestureLabel, f64) {
    let count = states.extended_count() as f64;
    let fingers_curled = !states.index() && !states.middle() && !states.ring() && !states.pinky();

    if states.0.iter().all(|&e| e) {
        (GestureLabel::OpenPalm, (count / 5.0).min(1.0))
    } else if fingers_curled {
        (GestureLabel::Fist, 1.0 - count / 5.0)
    } else if states.index() && !states.middle() && !states.ring() && !states.pinky() {
        (GestureLabel::Point, POINT_CONFIDENCE)
    } else if states.index() && states.middle() && !states.ring() && !states.pinky() {
        (GestureLabel::Scissors, SCISSORS_CONFIDENCE)
    } else {
        (GestureLabel::Unknown, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use handcue_hand_model::landmark::{INDEX_PIP, INDEX_TIP};
    use handcue_hand_model::synthetic::SyntheticHand;
    use proptest::prelude::*;

    fn classify(hand: SyntheticHand) -> GestureEvent {
        PoseClassifier::with_defaults().classify(&hand.landmarks(), hand.handedness, 100)
    }

    #[test]
    fn test_open_right_hand() {
        let event = classify(SyntheticHand::open_palm());
        assert_eq!(event.label(), GestureLabel::OpenPalm);
        assert_eq!(event.confidence(), 1.0);
        assert_eq!(event.timestamp_ms(), 100);
    }

    #[test]
    fn test_open_left_hand_uses_mirrored_thumb() {
        let left = SyntheticHand::open_palm().handedness(Handedness::Left);
        assert_eq!(classify(left).label(), GestureLabel::OpenPalm);

        // The left skeleton read as a right hand loses its thumb.
        let event = PoseClassifier::with_defaults().classify(
            &left.landmarks(),
            Handedness::Right,
            0,
        );
        assert_eq!(event.label(), GestureLabel::Unknown);
    }

    #[test]
    fn test_only_index_up_is_point() {
        let event = classify(SyntheticHand::point());
        assert_eq!(event.label(), GestureLabel::Point);
        assert_eq!(event.confidence(), 0.7);
    }

    #[test]
    fn test_point_ignores_thumb() {
        let hand = SyntheticHand::with_fingers([true, true, false, false, false]);
        assert_eq!(classify(hand).label(), GestureLabel::Point);
    }

    #[test]
    fn test_scissors() {
        let event = classify(SyntheticHand::scissors());
        assert_eq!(event.label(), GestureLabel::Scissors);
        assert_eq!(event.confidence(), 0.8);
    }

    #[test]
    fn test_fist_confidence_depends_on_thumb() {
        assert_eq!(classify(SyntheticHand::fist()).confidence(), 1.0);
        let thumb_out = SyntheticHand::with_fingers([true, false, false, false, false]);
        let event = classify(thumb_out);
        assert_eq!(event.label(), GestureLabel::Fist);
        assert_eq!(event.confidence(), 0.8);
    }

    #[test]
    fn test_unmatched_pattern_is_unknown() {
        let hand = SyntheticHand::with_fingers([false, false, true, true, true]);
        let event = classify(hand);
        assert_eq!(event.label(), GestureLabel::Unknown);
        assert_eq!(event.confidence(), 0.0);
    }

    #[test]
    fn test_margin_absorbs_jitter() {
        let mut landmarks = SyntheticHand::point().landmarks();
        // Tip only 0.01 above the PIP: inside the margin, not extended.
        landmarks[INDEX_TIP].y = landmarks[INDEX_PIP].y - 0.01;
        let states = PoseClassifier::with_defaults()
            .finger_states(&landmarks, Handedness::Right)
            .unwrap();
        assert!(!states.index());
    }

    #[test]
    fn test_classify_frame_defaults_to_right() {
        let mut frame = SyntheticHand::open_palm().frame(250);
        frame.handedness = None;
        let event = PoseClassifier::with_defaults().classify_frame(&frame);
        assert_eq!(event.label(), GestureLabel::OpenPalm);
        assert_eq!(event.timestamp_ms(), 250);
    }

    #[test]
    fn test_pattern_rendering() {
        assert_eq!(FingerStates([true, true, false, false, true]).pattern(), "TI--P");
    }

    proptest! {
        #[test]
        fn short_skeleton_is_unknown_with_low_min_landmarks(
            min_landmarks in 0usize..HAND_LANDMARK_COUNT,
            len in 0usize..HAND_LANDMARK_COUNT,
        ) {
            let config = EngineConfig { min_landmarks, ..EngineConfig::default() };
            let classifier = PoseClassifier::new(&config);
            prop_assert_eq!(classifier.min_landmarks(), HAND_LANDMARK_COUNT);

            let landmarks = SyntheticHand::open_palm().landmarks()[..len].to_vec();
            prop_assert!(classifier.finger_states(&landmarks, Handedness::Left).is_none());
            let event = classifier.classify(&landmarks, Handedness::Right, 10);
            prop_assert_eq!(event.label(), GestureLabel::Unknown);
        }

        #[test]
        fn short_skeleton_is_unknown(len in 0usize..HAND_LANDMARK_COUNT, t in 0u64..1_000_000) {
            let landmarks = SyntheticHand::open_palm().landmarks()[..len].to_vec();
            let event = PoseClassifier::with_defaults().classify(&landmarks, Handedness::Right, t);
            prop_assert_eq!(event.label(), GestureLabel::Unknown);
            prop_assert_eq!(event.confidence(), 0.0);
        }

        #[test]
        fn all_extended_is_full_confidence_open_palm(
            x in 0.2f64..0.8,
            y in 0.4f64..0.9,
            left in any::<bool>(),
        ) {
            let handedness = if left { Handedness::Left } else { Handedness::Right };
            let hand = SyntheticHand::open_palm().handedness(handedness).at(x, y);
            let event = classify(hand);
            prop_assert_eq!(event.label(), GestureLabel::OpenPalm);
            prop_assert_eq!(event.confidence(), 1.0);
        }

        #[test]
        fn curled_fingers_are_fist_regardless_of_thumb(thumb in any::<bool>(), x in 0.2f64..0.8) {
            let hand = SyntheticHand::with_fingers([thumb, false, false, false, false]).at(x, 0.8);
            prop_assert_eq!(classify(hand).label(), GestureLabel::Fist);
        }

        #[test]
        fn classifier_never_panics_on_arbitrary_points(
            coords in proptest::collection::vec((0.0f64..1.0, 0.0f64..1.0), 21..30),
        ) {
            let landmarks: Vec<Landmark> =
                coords.into_iter().map(|(x, y)| Landmark::new(x, y, 0.0)).collect();
            let event = PoseClassifier::with_defaults().classify(&landmarks, Handedness::Right, 0);
            prop_assert!((0.0..=1.0).contains(&event.confidence()));
        }
    }
}
