//! CLI command implementations for Linguamatch.

pub(crate) mod layout;
pub(crate) mod play;
pub(crate) mod progress;
pub(crate) mod simulate;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use linguamatch::{CefrLevel, ConfigError, GameConfig, ProgressError, SessionError, VocabError};
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Output format for the `simulate` and `layout` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Config file contents plus command-line overrides.
#[derive(Debug)]
pub(crate) struct GameConfigArgs {
    config: GameConfig,
    from_file: bool,
}

impl GameConfigArgs {
    /// Load the config file, or the defaults when none was given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, CliError> {
        Ok(Self {
            config: GameConfig::load_or_default(path)?,
            from_file: path.is_some(),
        })
    }

    pub(crate) fn with_vocab_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.config.vocab_dir = dir;
        }
        self
    }

    pub(crate) fn with_save_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.config.save_path = path;
        }
        self
    }

    pub(crate) fn with_vocab_level(mut self, level: Option<CefrLevel>) -> Self {
        if level.is_some() {
            self.config.vocab_level = level;
        }
        self
    }

    pub(crate) fn with_symbols(mut self, show: bool) -> Self {
        self.config.show_symbols = self.config.show_symbols && show;
        self
    }

    /// The pack directory, only when a config file named one.
    pub(crate) fn explicit_vocab_dir(&self) -> Option<PathBuf> {
        self.from_file.then(|| self.config.vocab_dir.clone())
    }

    pub(crate) fn into_inner(self) -> GameConfig {
        self.config
    }
}

/// Install the `tracing` subscriber.
///
/// Interactive commands own the terminal, so their logs go to `log_file`
/// or nowhere. `RUST_LOG` overrides the default `warn` filter.
pub(crate) fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // A second install (tests, repeated calls) is not an error.
    let _ = match (log_file, interactive) {
        (Some(path), _) => {
            let file = std::fs::File::create(path).map_err(|e| {
                CliError::new(format!("Failed to create log file {}: {e}", path.display()))
            })?;
            builder.with_writer(Arc::new(file)).with_ansi(false).try_init()
        }
        (None, true) => builder.with_writer(std::io::sink).try_init(),
        (None, false) => builder.with_writer(std::io::stderr).try_init(),
    };
    Ok(())
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ProgressError> for CliError {
    fn from(e: ProgressError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<SessionError> for CliError {
    fn from(e: SessionError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<VocabError> for CliError {
    fn from(e: VocabError) -> Self {
        Self::new(e.to_string())
    }
}
