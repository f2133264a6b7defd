//! Logging and tracing initialization.
//!
//! Logs always go to stderr so that `handcue replay --json` can keep stdout
//! for gesture events.

use crate::config::LoggingConfig;

/// Targets raised to `debug` by `--verbose`.
const HANDCUE_TARGETS: [&str; 4] = [
    "handcue",
    "handcue_common",
    "handcue_hand_model",
    "handcue_gesture_core",
];

/// Filter directive for a run.
///
/// Verbose mode keeps the configured level for everything else and adds a
/// `debug` directive per HandCue crate.
pub fn filter_directive(config: &LoggingConfig, verbose: bool) -> String {
    if !verbose {
        return config.level.clone();
    }
    let mut directives = vec![config.level.clone()];
    directives.extend(HANDCUE_TARGETS.iter().map(|t| format!("{t}=debug")));
    directives.join(",")
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides the config.
pub fn init_logging(config: &LoggingConfig, verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config, verbose)));

    if config.json {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_target(verbose)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
}
