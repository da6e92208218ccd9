//! Game configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes. Command-line flags override the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::vocab::{CefrLevel, Language};

/// Durations of timed round phases, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Level banner shown before play starts.
    pub intro_seconds: f32,
    /// How long a hint stays highlighted (and blocks another hint).
    pub hint_seconds: f32,
    /// Duration of the slow shuffle animation.
    pub shuffle_seconds: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            intro_seconds: 2.0,
            hint_seconds: 2.0,
            shuffle_seconds: 1.5,
        }
    }
}

impl Timings {
    /// Timings with no intro, for headless play.
    #[must_use]
    pub fn instant_intro(self) -> Self {
        Self {
            intro_seconds: 0.0,
            ..self
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory scanned for `*.json` word packs.
    pub vocab_dir: PathBuf,
    /// Progress save file.
    pub save_path: PathBuf,
    /// Draw shape and colour markers on tiles.
    pub show_symbols: bool,
    /// Start new words at this level instead of the saved preference.
    pub vocab_level: Option<CefrLevel>,
    /// Language being learned; its tiles are emphasised by front ends.
    pub target_language: Language,
    /// Phase durations.
    pub timings: Timings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            vocab_dir: PathBuf::from("data/vocab"),
            save_path: PathBuf::from("save_data.json"),
            show_symbols: true,
            vocab_level: None,
            target_language: Language::Turkish,
            timings: Timings::default(),
        }
    }
}

impl GameConfig {
    /// Read a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid JSON
    /// or has negative timings.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|e| ConfigError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate().map_err(|reason| ConfigError {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults.
    ///
    /// # Errors
    ///
    /// Propagates [`GameConfig::load`] errors.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    fn validate(&self) -> Result<(), String> {
        let t = &self.timings;
        for (name, value) in [
            ("intro_seconds", t.intro_seconds),
            ("hint_seconds", t.hint_seconds),
            ("shuffle_seconds", t.shuffle_seconds),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("timings.{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"show_symbols": false, "timings": {{"hint_seconds": 5.0}}}}"#).unwrap();
        let config = GameConfig::load(file.path()).unwrap();
        assert!(!config.show_symbols);
        assert!((config.timings.hint_seconds - 5.0).abs() < f32::EPSILON);
        assert!((config.timings.intro_seconds - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.vocab_dir, PathBuf::from("data/vocab"));
    }

    #[test]
    fn test_negative_timing_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"timings": {{"shuffle_seconds": -1.0}}}}"#).unwrap();
        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(err.reason.contains("shuffle_seconds"));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(GameConfig::load(Path::new("/nonexistent/linguamatch.json")).is_err());
        assert_eq!(GameConfig::load_or_default(None).unwrap(), GameConfig::default());
    }
}
