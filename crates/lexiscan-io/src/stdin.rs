use std::io::{self, BufRead};
use std::path::PathBuf;

/// Parse one input line into a file selection. A blank line selects nothing.
pub fn parse_selection(line: &str) -> Option<PathBuf> {
    let trimmed = line.trim();
    // Terminals paste dropped files as quoted paths
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| trimmed.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(trimmed);

    if unquoted.is_empty() {
        None
    } else {
        Some(PathBuf::from(unquoted))
    }
}

/// Call `on_selection` for every line until end of input. Blocks the
/// calling thread.
pub fn watch_lines<R, F>(reader: R, mut on_selection: F) -> Result<(), anyhow::Error>
where
    R: BufRead,
    F: FnMut(Option<PathBuf>),
{
    for line in reader.lines() {
        let selection = parse_selection(&line?);
        tracing::debug!("Input line selected {:?}", selection);
        on_selection(selection);
    }

    Ok(())
}

pub fn watch_stdin<F>(on_selection: F) -> Result<(), anyhow::Error>
where
    F: FnMut(Option<PathBuf>),
{
    watch_lines(io::stdin().lock(), on_selection)
}
