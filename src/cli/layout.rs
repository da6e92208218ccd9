//! Layout command implementation.

use super::output::{JsonLayout, format_layout_csv, format_layout_text};
use super::{CliError, OutputFormat};
use linguamatch::Layout;

/// Execute the layout command.
///
/// # Errors
///
/// Returns an error for a zero pair count or a JSON failure.
pub(crate) fn execute(pairs: usize, format: OutputFormat) -> Result<(), CliError> {
    if pairs == 0 {
        return Err(CliError::new("pair count must be at least 1"));
    }
    let layout = Layout::generate(pairs);

    match format {
        OutputFormat::Text => print!("{}", format_layout_text(pairs, &layout)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonLayout::new(pairs, &layout))
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        OutputFormat::Csv => print!("{}", format_layout_csv(&layout)),
    }
    Ok(())
}
