//! HandCue CLI — Command-line interface for the gesture engine.
//!
//! Usage:
//!   handcue replay <FRAMES>      Run a frame recording through the engine
//!   handcue validate <FRAMES>    Check a frame recording for problems
//!   handcue synth <OUT>          Write a synthetic frame recording
//!   handcue config               Show (or save) the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use handcue_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "handcue",
    about = "Turn hand landmark streams into discrete gesture events",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a frame recording through the gesture engine
    Replay {
        /// Path to the frames JSONL file
        frames: PathBuf,

        /// Write emitted gesture events to this JSONL file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print events as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Check a frame recording for problems
    Validate {
        /// Path to the frames JSONL file
        frames: PathBuf,

        /// Print the finger-state pattern and pose of every hand frame
        #[arg(long)]
        poses: bool,
    },

    /// Write a synthetic frame recording
    Synth {
        /// Output file
        out: PathBuf,

        /// Pose to hold: open, fist, point, scissors
        #[arg(long, default_value = "open")]
        pose: String,

        /// Hand: left or right
        #[arg(long, default_value = "right")]
        hand: String,

        /// Number of frames
        #[arg(long, default_value = "30")]
        frames: u64,

        /// Milliseconds between frames
        #[arg(long, default_value = "33")]
        interval_ms: u64,

        /// Starting wrist x (normalized)
        #[arg(long, default_value = "0.5")]
        start_x: f64,

        /// Total horizontal wrist travel across the recording (normalized)
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        sweep: f64,
    },

    /// Show the effective configuration
    Config {
        /// Save it to the standard location
        #[arg(long)]
        write: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };

    handcue_common::logging::init_logging(&config.logging, cli.verbose);

    match cli.command {
        Commands::Replay { frames, out, json } => {
            commands::replay::run(frames, out, json, &config.engine)
        }
        Commands::Validate { frames, poses } => {
            commands::validate::run(frames, poses, &config.engine)
        }
        Commands::Synth {
            out,
            pose,
            hand,
            frames,
            interval_ms,
            start_x,
            sweep,
        } => commands::synth::run(out, &pose, &hand, frames, interval_ms, start_x, sweep),
        Commands::Config { write } => commands::config::run(&config, write),
    }
}
