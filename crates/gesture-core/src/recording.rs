//! JSONL recordings: loading frame captures and writing gesture logs.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use handcue_common::error::{HandcueError, HandcueResult};
use handcue_hand_model::frame::{parse_frames, parse_header, RecordingHeader};
use serde::Serialize;

use crate::session::ReplaySource;

/// Records written between automatic flushes.
const FLUSH_EVERY: u64 = 256;

/// Load a frame recording from disk.
pub fn open_replay(path: &Path) -> HandcueResult<ReplaySource> {
    if !path.exists() {
        return Err(HandcueError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    replay_from_str(&content)
}

/// Build a replay source from JSONL content.
pub fn replay_from_str(content: &str) -> HandcueResult<ReplaySource> {
    let frames = parse_frames(content)
        .map_err(|e| HandcueError::recording(format!("Failed to parse frames: {e}")))?;
    let source = ReplaySource::from_frames(frames);
    Ok(match parse_header(content) {
        Some(header) => source.with_header(header),
        None => source,
    })
}

/// Writes serializable records to a JSONL file, header first.
pub struct RecordingWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    records_written: u64,
}

impl RecordingWriter {
    /// Create (or truncate) `path` and write the header as a `#` line.
    pub fn create(path: PathBuf, header: &RecordingHeader) -> HandcueResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        let mut writer = BufWriter::new(file);
        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| HandcueError::recording(format!("Failed to write header: {e}")))?;

        Ok(Self {
            writer,
            path,
            records_written: 0,
        })
    }

    /// Append one record as a JSON line.
    pub fn write<T: Serialize>(&mut self, record: &T) -> HandcueResult<()> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| HandcueError::recording(format!("Failed to write record: {e}")))?;
        self.records_written += 1;

        if self.records_written % FLUSH_EVERY == 0 {
            self.flush()?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> HandcueResult<()> {
        self.writer
            .flush()
            .map_err(|e| HandcueError::recording(format!("Failed to flush records: {e}")))?;
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RecordingWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
