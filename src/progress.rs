//! Saved learner progress.
//!
//! Progress is a small JSON document:
//!
//! ```json
//! {"current_level": 3, "unlocked_levels": 3, "words_learned_index": 14,
//!  "used_word_ids": ["w1", "w2"], "vocab_level": "A1"}
//! ```
//!
//! Missing fields take their defaults. A corrupt or unreadable file is
//! replaced by default progress and logged; saving failures are logged and
//! never stop the game.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::ProgressError;
use crate::vocab::{CefrLevel, WordId};

/// The persisted progress document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressState {
    /// Level the learner plays next.
    pub current_level: u32,
    /// Highest level reached so far.
    pub unlocked_levels: u32,
    /// Resume point into the level-sorted vocabulary.
    pub words_learned_index: usize,
    /// Every word id dealt so far, in first-dealt order.
    pub used_word_ids: Vec<WordId>,
    /// Preferred vocabulary difficulty.
    pub vocab_level: CefrLevel,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self {
            current_level: 1,
            unlocked_levels: 1,
            words_learned_index: 0,
            used_word_ids: Vec::new(),
            vocab_level: CefrLevel::A1,
        }
    }
}

impl ProgressState {
    /// Move the vocabulary resume point forward by `count` words.
    pub fn advance_word_index(&mut self, count: usize) {
        self.words_learned_index = self.words_learned_index.saturating_add(count);
    }

    /// Go to the next level, unlocking it if it is new.
    pub fn next_level(&mut self) {
        self.current_level = self.current_level.saturating_add(1);
        self.unlocked_levels = self.unlocked_levels.max(self.current_level);
    }

    /// Append ids not seen before, keeping first-seen order.
    pub fn add_used_word_ids(&mut self, ids: &[WordId]) {
        let mut known: HashSet<WordId> = self.used_word_ids.iter().cloned().collect();
        for id in ids {
            if known.insert(id.clone()) {
                self.used_word_ids.push(id.clone());
            }
        }
    }

    /// Jump straight to `level`, optionally moving the resume point too.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::InvalidLevel`] when `level` is zero.
    pub fn jump_to_level(&mut self, level: u32, word_index: Option<usize>) -> Result<(), ProgressError> {
        if level == 0 {
            return Err(ProgressError::InvalidLevel(level));
        }
        self.current_level = level;
        self.unlocked_levels = self.unlocked_levels.max(level);
        if let Some(index) = word_index {
            self.words_learned_index = index;
        }
        Ok(())
    }
}

/// Where progress is kept.
pub trait ProgressStore {
    /// Read the stored progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document exists but cannot be read.
    fn load(&self) -> Result<ProgressState, ProgressError>;

    /// Replace the stored progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save(&mut self, state: &ProgressState) -> Result<(), ProgressError>;
}

/// Progress stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store progress at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the save file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    /// A missing file is default progress, not an error.
    fn load(&self) -> Result<ProgressState, ProgressError> {
        if !self.path.exists() {
            return Ok(ProgressState::default());
        }
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    fn save(&mut self, state: &ProgressState) -> Result<(), ProgressError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Progress kept in memory.
///
/// Clones share the same document, so a caller can keep a handle while a
/// session owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<Option<ProgressState>>>,
}

impl MemoryStore {
    /// An empty store (loads as default progress).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store preloaded with `state`.
    #[must_use]
    pub fn with_state(state: ProgressState) -> Self {
        Self {
            state: Arc::new(Mutex::new(Some(state))),
        }
    }

    /// The last saved document, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<ProgressState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<ProgressState, ProgressError> {
        Ok(self.snapshot().unwrap_or_default())
    }

    fn save(&mut self, state: &ProgressState) -> Result<(), ProgressError> {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = Some(state.clone());
        Ok(())
    }
}

/// Live progress backed by a store; every change is saved immediately.
pub struct Progress {
    state: ProgressState,
    store: Box<dyn ProgressStore + Send>,
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").field("state", &self.state).finish_non_exhaustive()
    }
}

impl Progress {
    /// Load progress from `store`, falling back to defaults on failure.
    pub fn open(store: impl ProgressStore + Send + 'static) -> Self {
        let mut progress = Self {
            state: ProgressState::default(),
            store: Box::new(store),
        };
        progress.load();
        progress
    }

    /// Reload from the store, falling back to defaults on failure.
    pub fn load(&mut self) {
        self.state = match self.store.load() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "could not load progress; starting from defaults");
                ProgressState::default()
            }
        };
    }

    /// Write the current state to the store.
    ///
    /// # Errors
    ///
    /// Returns the store's error.
    pub fn save(&mut self) -> Result<(), ProgressError> {
        self.store.save(&self.state)
    }

    fn persist(&mut self) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "could not save progress");
        }
    }

    /// The whole document.
    #[must_use]
    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    /// Level the learner plays next.
    #[must_use]
    pub fn current_level(&self) -> u32 {
        self.state.current_level
    }

    /// Highest level reached.
    #[must_use]
    pub fn unlocked_levels(&self) -> u32 {
        self.state.unlocked_levels
    }

    /// Resume point into the vocabulary.
    #[must_use]
    pub fn word_index(&self) -> usize {
        self.state.words_learned_index
    }

    /// Every id dealt so far.
    #[must_use]
    pub fn used_word_ids(&self) -> &[WordId] {
        &self.state.used_word_ids
    }

    /// Preferred vocabulary difficulty.
    #[must_use]
    pub fn vocab_level(&self) -> CefrLevel {
        self.state.vocab_level
    }

    /// Change the preferred vocabulary difficulty.
    pub fn set_vocab_level(&mut self, level: CefrLevel) {
        self.state.vocab_level = level;
        self.persist();
    }

    /// Move the vocabulary resume point forward.
    pub fn advance_word_index(&mut self, count: usize) {
        self.state.advance_word_index(count);
        self.persist();
    }

    /// Go to the next level.
    pub fn next_level(&mut self) {
        self.state.next_level();
        self.persist();
    }

    /// Record dealt word ids.
    pub fn add_used_word_ids(&mut self, ids: &[WordId]) {
        self.state.add_used_word_ids(ids);
        self.persist();
    }

    /// Forget all progress.
    pub fn reset(&mut self) {
        self.state = ProgressState::default();
        self.persist();
    }

    /// Jump to `level`, optionally moving the resume point.
    ///
    /// # Errors
    ///
    /// Returns [`ProgressError::InvalidLevel`] when `level` is zero; the
    /// state is left unchanged.
    pub fn jump_to_level(&mut self, level: u32, word_index: Option<usize>) -> Result<(), ProgressError> {
        self.state.jump_to_level(level, word_index)?;
        self.persist();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let state: ProgressState = serde_json::from_str(r#"{"current_level": 4}"#).unwrap();
        assert_eq!(state.current_level, 4);
        assert_eq!(state.unlocked_levels, 1);
        assert_eq!(state.vocab_level, CefrLevel::A1);
        assert!(state.used_word_ids.is_empty());
    }

    #[test]
    fn test_next_level_unlocks() {
        let mut state = ProgressState::default();
        state.next_level();
        assert_eq!((state.current_level, state.unlocked_levels), (2, 2));

        state.jump_to_level(1, None).unwrap();
        state.next_level();
        assert_eq!((state.current_level, state.unlocked_levels), (2, 2));
    }

    #[test]
    fn test_used_ids_deduplicated_in_order() {
        let mut state = ProgressState::default();
        state.add_used_word_ids(&[WordId::new("b"), WordId::new("a")]);
        state.add_used_word_ids(&[WordId::new("a"), WordId::new("c")]);
        assert_eq!(
            state.used_word_ids,
            vec![WordId::new("b"), WordId::new("a"), WordId::new("c")]
        );
    }

    #[test]
    fn test_jump_rejects_level_zero() {
        let mut state = ProgressState::default();
        assert!(matches!(state.jump_to_level(0, Some(5)), Err(ProgressError::InvalidLevel(0))));
        assert_eq!(state, ProgressState::default());
    }

    #[test]
    fn test_memory_store_shares_document() {
        let store = MemoryStore::new();
        let handle = store.clone();
        let mut progress = Progress::open(store);
        progress.advance_word_index(6);
        progress.next_level();
        let saved = handle.snapshot().unwrap();
        assert_eq!(saved.words_learned_index, 6);
        assert_eq!(saved.current_level, 2);

        progress.reset();
        assert_eq!(handle.snapshot(), Some(ProgressState::default()));
    }
}
