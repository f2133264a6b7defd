//! Replay a frame recording through the gesture engine.

use std::path::PathBuf;

use handcue_common::clock::SessionClock;
use handcue_common::config::EngineConfig;
use handcue_gesture_core::recording::{open_replay, RecordingWriter};
use handcue_gesture_core::session::Session;
use handcue_hand_model::frame::RecordingHeader;

pub fn run(
    path: PathBuf,
    out: Option<PathBuf>,
    json: bool,
    engine: &EngineConfig,
) -> anyhow::Result<()> {
    engine
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid engine configuration: {e}"))?;

    let source = open_replay(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load recording {}: {e}", path.display()))?;

    if !json {
        println!("Replaying: {}", path.display());
        println!("  Frames: {}", source.remaining());
    }

    let mut writer = match out {
        Some(out_path) => {
            let clock = SessionClock::start();
            let header = RecordingHeader::new(
                clock.epoch_wall(),
                format!("gestures from {}", path.display()),
            );
            Some(
                RecordingWriter::create(out_path, &header)
                    .map_err(|e| anyhow::anyhow!("Failed to create event log: {e}"))?,
            )
        }
        None => None,
    };

    let mut write_error = None;
    let summary = Session::new(source, engine.clone()).run(|outcome| {
        let Some(event) = outcome.emitted else {
            return;
        };

        if json {
            match serde_json::to_string(&event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("Failed to encode event: {e}"),
            }
        } else {
            println!(
                "  {:>8}ms  {:<12} {:.2}  ({:.1} fps)",
                event.timestamp_ms(),
                event.label().display_name(),
                event.confidence(),
                outcome.fps
            );
        }

        if let Some(writer) = writer.as_mut() {
            if write_error.is_none() {
                if let Err(e) = writer.write(&event) {
                    write_error = Some(e);
                }
            }
        }
    });

    if let Some(e) = write_error {
        return Err(anyhow::anyhow!("Failed to write event log: {e}"));
    }
    if let Some(mut writer) = writer {
        writer
            .flush()
            .map_err(|e| anyhow::anyhow!("Failed to flush event log: {e}"))?;
        if !json {
            println!(
                "  Wrote {} event(s) to {}",
                writer.records_written(),
                writer.path().display()
            );
        }
    }

    if let Some(error) = &summary.error {
        anyhow::bail!("Landmark source failed: {error}");
    }

    if !json {
        println!("\nSummary:");
        println!("  Frames processed: {}", summary.frames);
        println!("  Frames with a hand: {}", summary.hand_frames);
        println!("  Transitions: {}", summary.transitions.len());
        if let Some(view) = &summary.final_view {
            println!("  Final gesture: {}", view.current.label().display_name());
            println!("  Final fps: {:.1}", view.fps);
            println!("  Status: {}", view.status);
            println!("  History (most recent first):");
            for event in &view.history {
                println!(
                    "    - {} ({:.2}) at {}ms",
                    event.label().display_name(),
                    event.confidence(),
                    event.timestamp_ms()
                );
            }
        }
    }

    Ok(())
}
