//! Validate a frame recording.

use std::path::PathBuf;

use handcue_common::config::EngineConfig;
use handcue_gesture_core::pose::PoseClassifier;
use handcue_hand_model::frame::{parse_frames, parse_header};

pub fn run(path: PathBuf, poses: bool, engine: &EngineConfig) -> anyhow::Result<()> {
    println!("Validating recording at: {}", path.display());

    let content = std::fs::read_to_string(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;

    match parse_header(&content) {
        Some(header) => {
            println!("  Schema: {}", header.schema_version);
            println!("  Source: {}", header.source);
            println!("  Started: {}", header.epoch_wall);
        }
        None => println!("  Header: missing"),
    }

    let frames =
        parse_frames(&content).map_err(|e| anyhow::anyhow!("Failed to parse frames: {e}"))?;

    let classifier = PoseClassifier::new(engine);
    let hand_frames = frames.iter().filter(|f| f.has_hand()).count();
    let short = frames
        .iter()
        .filter(|f| f.has_hand() && f.landmarks.len() < classifier.min_landmarks())
        .count();
    let unlabeled = frames
        .iter()
        .filter(|f| f.has_hand() && f.handedness.is_none())
        .count();
    let out_of_order = frames
        .windows(2)
        .filter(|pair| pair[1].captured_at_ms <= pair[0].captured_at_ms)
        .count();
    let out_of_range = frames
        .iter()
        .flat_map(|f| f.landmarks.iter())
        .filter(|lm| !(0.0..=1.0).contains(&lm.x) || !(0.0..=1.0).contains(&lm.y))
        .count();

    println!("  Frames: {}", frames.len());
    println!("  Frames with a hand: {hand_frames}");
    if let (Some(first), Some(last)) = (frames.first(), frames.last()) {
        println!(
            "  Span: {}ms .. {}ms",
            first.captured_at_ms, last.captured_at_ms
        );
    }

    if poses {
        println!("\n  {:>8}  {:<5}  {:<6}  Pose", "t(ms)", "TIMRP", "Hand");
        for frame in frames.iter().filter(|f| f.has_hand()) {
            let hand = frame.handedness_or_default();
            let pattern = classifier
                .finger_states(&frame.landmarks, hand)
                .map(|states| states.pattern())
                .unwrap_or_else(|| "short".to_string());
            let pose = classifier.classify_frame(frame);
            println!(
                "  {:>8}  {:<5}  {:<6}  {} ({:.2})",
                frame.captured_at_ms,
                pattern,
                hand.as_str(),
                pose.label().display_name(),
                pose.confidence()
            );
        }
    }

    let mut issues = Vec::new();
    if short > 0 {
        issues.push(format!(
            "{short} frame(s) with fewer than {} landmarks (classified as unknown)",
            classifier.min_landmarks()
        ));
    }
    if unlabeled > 0 {
        issues.push(format!(
            "{unlabeled} frame(s) without handedness (treated as right hand)"
        ));
    }
    if out_of_order > 0 {
        issues.push(format!(
            "{out_of_order} frame(s) not later than their predecessor (fps reading held)"
        ));
    }
    if out_of_range > 0 {
        issues.push(format!(
            "{out_of_range} landmark(s) outside normalized [0, 1] space"
        ));
    }

    if issues.is_empty() {
        println!("\nRecording is valid.");
    } else {
        println!("\nValidation notes:");
        for issue in &issues {
            println!("  - {issue}");
        }
        println!("\n{} note(s). The engine will still accept this recording.", issues.len());
    }

    Ok(())
}
