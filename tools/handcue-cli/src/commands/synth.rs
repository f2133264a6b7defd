//! Generate a synthetic frame recording.

use std::path::PathBuf;

use handcue_common::clock::SessionClock;
use handcue_gesture_core::recording::RecordingWriter;
use handcue_hand_model::frame::RecordingHeader;
use handcue_hand_model::landmark::Handedness;
use handcue_hand_model::synthetic::SyntheticHand;

pub fn run(
    out: PathBuf,
    pose: &str,
    hand: &str,
    frames: u64,
    interval_ms: u64,
    start_x: f64,
    sweep: f64,
) -> anyhow::Result<()> {
    let base = match pose.to_ascii_lowercase().as_str() {
        "open" | "open_palm" => SyntheticHand::open_palm(),
        "fist" => SyntheticHand::fist(),
        "point" => SyntheticHand::point(),
        "scissors" => SyntheticHand::scissors(),
        other => anyhow::bail!("Unknown pose '{other}'. Use open, fist, point or scissors."),
    };
    let handedness = Handedness::parse(hand)
        .ok_or_else(|| anyhow::anyhow!("Unknown hand '{hand}'. Use left or right."))?;
    if frames == 0 {
        anyhow::bail!("--frames must be at least 1");
    }

    let clock = SessionClock::start();
    let header = RecordingHeader::new(
        clock.epoch_wall(),
        format!("synthetic {pose} ({handedness}), sweep {sweep:+.3}"),
    );
    let mut writer = RecordingWriter::create(out.clone(), &header)
        .map_err(|e| anyhow::anyhow!("Failed to create recording: {e}"))?;

    let steps = (frames - 1).max(1) as f64;
    for i in 0..frames {
        let x = start_x + sweep * (i as f64 / steps);
        let frame = base
            .handedness(handedness)
            .at(x, base.wrist_y)
            .frame(i * interval_ms);
        writer
            .write(&frame)
            .map_err(|e| anyhow::anyhow!("Failed to write frame {i}: {e}"))?;
    }
    writer
        .flush()
        .map_err(|e| anyhow::anyhow!("Failed to flush recording: {e}"))?;

    println!(
        "Wrote {} frame(s) to {}",
        writer.records_written(),
        out.display()
    );
    tracing::debug!(pose, hand, frames, interval_ms, sweep, "synthetic recording written");

    Ok(())
}
