//! HandCue Common Utilities
//!
//! Shared infrastructure for all HandCue crates:
//! - Error types and result aliases
//! - Session clock and frame-rate measurement
//! - Tracing/logging initialization
//! - Configuration loading, including the gesture engine parameters

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
