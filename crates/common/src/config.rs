//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{HandcueError, HandcueResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gesture engine tuning.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Gesture engine parameters.
///
/// Distances are in normalized image units, durations in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Margin a joint must clear before a finger counts as extended.
    pub extension_margin: f64,

    /// Age limit for wrist samples kept by the swipe detector.
    pub wave_window_ms: u64,

    /// Minimum lateral wrist travel across the window to emit a swipe.
    pub wave_threshold: f64,

    /// Minimum interval between two emitted swipes.
    pub wave_cooldown_ms: u64,

    /// Wrist travel that maps to a swipe confidence of 1.0.
    pub wave_full_confidence_travel: f64,

    /// Samples needed in the window before direction is judged.
    pub wave_min_samples: usize,

    /// Number of gesture events kept in the rolling history.
    pub history_capacity: usize,

    /// Landmarks required for a frame to be classified.
    pub min_landmarks: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            extension_margin: 0.02,
            wave_window_ms: 900,
            wave_threshold: 0.12,
            wave_cooldown_ms: 700,
            wave_full_confidence_travel: 0.3,
            wave_min_samples: 3,
            history_capacity: 6,
            min_landmarks: 21,
        }
    }
}

impl EngineConfig {
    /// Check that every parameter is usable by the engine.
    pub fn validate(&self) -> HandcueResult<()> {
        if self.extension_margin.is_nan() || self.extension_margin < 0.0 {
            return Err(HandcueError::config("extension_margin must be >= 0"));
        }
        if self.wave_window_ms == 0 {
            return Err(HandcueError::config("wave_window_ms must be > 0"));
        }
        if self.wave_threshold.is_nan() || self.wave_threshold <= 0.0 {
            return Err(HandcueError::config("wave_threshold must be > 0"));
        }
        if self.wave_full_confidence_travel.is_nan() || self.wave_full_confidence_travel <= 0.0 {
            return Err(HandcueError::config(
                "wave_full_confidence_travel must be > 0",
            ));
        }
        if self.wave_min_samples < 2 {
            return Err(HandcueError::config("wave_min_samples must be >= 2"));
        }
        if self.history_capacity == 0 {
            return Err(HandcueError::config("history_capacity must be > 0"));
        }
        // Joint indices go up to 20 (pinky tip).
        if self.min_landmarks < 21 {
            return Err(HandcueError::config(format!(
                "min_landmarks must be >= 21, got {}",
                self.min_landmarks
            )));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "handcue=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> HandcueResult<Self> {
        if !path.exists() {
            return Err(HandcueError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> HandcueResult<PathBuf> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, path: &Path) -> HandcueResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("handcue").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.history_capacity, 6);
        assert_eq!(config.wave_window_ms, 900);
        assert_eq!(config.wave_cooldown_ms, 700);
    }

    #[test]
    fn test_rejects_short_skeleton_requirement() {
        let config = EngineConfig {
            min_landmarks: 5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(HandcueError::Config { .. })
        ));
    }

    #[test]
    fn test_rejects_zero_history() {
        let config = EngineConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"engine": {"wave_threshold": 0.2}}"#).unwrap();
        assert!((config.engine.wave_threshold - 0.2).abs() < 1e-12);
        assert_eq!(config.engine.wave_cooldown_ms, 700);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = std::env::temp_dir().join("handcue_test_config");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("config.json");

        let mut config = AppConfig::default();
        config.engine.wave_cooldown_ms = 500;
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.engine, config.engine);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("handcue_missing_config/config.json");
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(HandcueError::FileNotFound { .. })
        ));
    }
}
