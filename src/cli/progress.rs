//! Progress command implementation.

use super::CliError;
use linguamatch::{JsonFileStore, ProgressState, ProgressStore};
use std::path::Path;

/// Print the saved progress.
///
/// # Errors
///
/// Returns an error if the save file exists but cannot be read.
pub(crate) fn show(path: &Path) -> Result<(), CliError> {
    let state = JsonFileStore::new(path).load()?;
    print_state(path, &state);
    Ok(())
}

/// Replace the saved progress with the defaults.
///
/// # Errors
///
/// Returns an error if the save file cannot be written.
pub(crate) fn reset(path: &Path) -> Result<(), CliError> {
    let mut store = JsonFileStore::new(path);
    let state = ProgressState::default();
    store.save(&state)?;
    println!("Progress reset.");
    print_state(path, &state);
    Ok(())
}

/// Move the saved progress to `level`.
///
/// # Errors
///
/// Returns an error for level 0 or when the save file cannot be read or
/// written.
pub(crate) fn jump(path: &Path, level: u32, word_index: Option<usize>) -> Result<(), CliError> {
    let mut store = JsonFileStore::new(path);
    let mut state = store.load()?;
    state.jump_to_level(level, word_index)?;
    store.save(&state)?;
    println!("Jumped to level {level}.");
    print_state(path, &state);
    Ok(())
}

fn print_state(path: &Path, state: &ProgressState) {
    println!("Progress ({})", path.display());
    println!("  Level:          {}", state.current_level);
    println!("  Unlocked:       {}", state.unlocked_levels);
    println!("  Word index:     {}", state.words_learned_index);
    println!("  Words dealt:    {}", state.used_word_ids.len());
    println!("  Vocab level:    {}", state.vocab_level);
}
