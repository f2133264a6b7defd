use std::path::PathBuf;

use handcue_common::config::EngineConfig;
use handcue_gesture_core::engine::EngineStatus;
use handcue_gesture_core::recording::open_replay;
use handcue_gesture_core::session::Session;
use handcue_hand_model::gesture::GestureLabel;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("frames.jsonl")
}

#[test]
fn fixture_replay_emits_expected_transitions() {
    let source = open_replay(&fixture_path()).expect("fixture frames should load");
    assert_eq!(source.remaining(), 61);
    assert_eq!(
        source.header().map(|h| h.source.as_str()),
        Some("synthetic fixture")
    );

    let mut processed = 0;
    let summary = Session::new(source, EngineConfig::default()).run(|_| processed += 1);
    assert_eq!(processed, 61);
    assert_eq!(summary.frames, 61);
    assert_eq!(summary.hand_frames, 53);

    let signature = summary
        .transitions
        .iter()
        .map(|e| format!("{}@{}:{:.2}", e.label(), e.timestamp_ms(), e.confidence()))
        .collect::<Vec<_>>();

    assert_eq!(
        signature,
        vec![
            "fist@250:1.00",
            "point@500:0.70",
            "scissors@750:0.80",
            "open_palm@1250:1.00",
            "swipe_right@1800:0.50",
            "open_palm@1850:1.00",
            "fist@2450:1.00",
            "open_palm@2700:1.00",
            "swipe_left@2800:0.47",
            "open_palm@2850:1.00",
        ]
    );

    let view = summary.final_view.expect("summary carries the final view");
    assert_eq!(view.current.label(), GestureLabel::Unknown);
    assert_eq!(view.fps, 20.0);
    assert_eq!(view.status, EngineStatus::Running);

    let history: Vec<_> = view.history.iter().map(|e| e.timestamp_ms()).collect();
    assert_eq!(history, vec![2850, 2800, 2700, 2450, 1850, 1800]);
}

#[test]
fn fixture_replay_is_deterministic() {
    let run = || {
        let source = open_replay(&fixture_path()).expect("fixture frames should load");
        Session::new(source, EngineConfig::default())
            .run(|_| {})
            .transitions
    };
    assert_eq!(run(), run());
}
