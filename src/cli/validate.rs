//! Vocabulary pack validation command implementation.

use super::CliError;
use linguamatch::Vocabulary;
use std::path::Path;

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if any pack is unreadable, an id repeats or no words
/// were found.
pub(crate) fn execute(dir: &Path) -> Result<(), CliError> {
    println!("Validating: {}", dir.display());
    println!();

    let (vocab, report) = Vocabulary::scan_dir(dir);

    println!("Packs:");
    for (path, count) in &report.loaded {
        print_check(&format!("{} ({count} words)", display_name(path)), true);
    }
    for failure in &report.failed {
        print_check(&failure.to_string(), false);
    }

    println!();
    println!("Words per level:");
    let counts = vocab.count_by_level();
    if counts.is_empty() {
        println!("  (none)");
    }
    for (level, count) in &counts {
        println!("  {level}: {count}");
    }

    let duplicates = vocab.duplicate_ids();
    println!();
    print_check("Unique word ids", duplicates.is_empty());
    for id in &duplicates {
        println!("    repeated: {id}");
    }
    let blanks = vocab
        .entries()
        .iter()
        .filter(|e| e.text_a.trim().is_empty() || e.text_b.trim().is_empty())
        .count();
    print_check("Both sides filled in", blanks == 0);

    println!();
    println!("Summary:");
    println!("  Packs read:   {}", report.loaded.len());
    println!("  Packs failed: {}", report.failed.len());
    println!("  Words:        {}", vocab.len());

    if vocab.is_empty() {
        return Err(CliError::new(format!("No words found in {}", dir.display())));
    }
    if !report.failed.is_empty() {
        return Err(CliError::new(format!("{} pack(s) could not be loaded", report.failed.len())));
    }
    if !duplicates.is_empty() {
        return Err(CliError::new(format!("{} word id(s) appear more than once", duplicates.len())));
    }
    if blanks > 0 {
        return Err(CliError::new(format!("{blanks} word(s) have an empty side")));
    }

    println!();
    println!("Validation successful!");

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string())
}

fn print_check(name: &str, ok: bool) {
    let status = if ok { "OK" } else { "FAILED" };
    let symbol = if ok { "✓" } else { "✗" };
    println!("  {symbol} {name}: {status}");
}
