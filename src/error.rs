//! Error types for the board engine, vocabulary packs and saved progress.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// The staging buffer has no empty slot.
///
/// This is a rejected move, not a failure: callers surface it as feedback
/// and leave the board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferFull;

impl fmt::Display for BufferFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "staging buffer is full")
    }
}

impl std::error::Error for BufferFull {}

/// Failure while reading a vocabulary data pack.
#[derive(Debug)]
pub enum VocabError {
    /// The pack (or the pack directory) could not be read.
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The pack is not a JSON list of word entries.
    Parse {
        /// Path that failed.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

impl fmt::Display for VocabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabError::Io { path, source } => {
                write!(f, "cannot read {}: {source}", path.display())
            }
            VocabError::Parse { path, source } => {
                write!(f, "invalid vocabulary pack {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for VocabError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VocabError::Io { source, .. } => Some(source),
            VocabError::Parse { source, .. } => Some(source),
        }
    }
}

/// Failure while reading or writing saved progress.
#[derive(Debug)]
pub enum ProgressError {
    /// File system error.
    Io(io::Error),
    /// The save file is not valid progress JSON.
    Json(serde_json::Error),
    /// A requested level jump is out of range.
    InvalidLevel(u32),
}

impl fmt::Display for ProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgressError::Io(e) => write!(f, "progress I/O error: {e}"),
            ProgressError::Json(e) => write!(f, "progress file is corrupt: {e}"),
            ProgressError::InvalidLevel(level) => {
                write!(f, "level must be 1 or higher, got {level}")
            }
        }
    }
}

impl std::error::Error for ProgressError {}

impl From<io::Error> for ProgressError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ProgressError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Failure while loading a configuration file.
#[derive(Debug)]
pub struct ConfigError {
    /// Path of the offending file.
    pub path: PathBuf,
    /// Description of the problem.
    pub reason: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error in {}: {}", self.path.display(), self.reason)
    }
}

impl std::error::Error for ConfigError {}

/// Errors raised by the round controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// No vocabulary is loaded, so no round can be dealt.
    EmptyVocabulary,
    /// The requested transition is not available in the current phase.
    InvalidTransition(&'static str),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyVocabulary => {
                write!(f, "no vocabulary loaded: add JSON word packs to the vocabulary directory")
            }
            SessionError::InvalidTransition(what) => write!(f, "cannot {what} now"),
        }
    }
}

impl std::error::Error for SessionError {}
