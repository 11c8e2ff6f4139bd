use crate::error::{NewsError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Merges a rendered block into existing news file content.
///
/// With no existing content the block becomes the whole file, preceded by
/// the start string so later runs find an insertion point. Otherwise the
/// block is inserted immediately after the line holding the start string;
/// every byte before and after the insertion point is preserved verbatim.
///
/// # Errors
/// Returns `MarkerNotFound` if the existing content lacks the start string
/// and `VersionExists` if `top_line` already appears after it.
pub fn merge(
    existing: Option<&str>,
    start_string: &str,
    top_line: &str,
    block: &str,
) -> Result<String> {
    let Some(existing) = existing else {
        let mut content = String::with_capacity(start_string.len() + block.len() + 1);
        if !start_string.is_empty() {
            content.push_str(start_string);
            if !start_string.ends_with('\n') {
                content.push('\n');
            }
        }
        content.push_str(block);
        return Ok(content);
    };

    let marker = existing
        .find(start_string)
        .ok_or_else(|| NewsError::MarkerNotFound(start_string.trim_end().to_string()))?;
    let after_marker = marker + start_string.len();
    let insert_at = if start_string.ends_with('\n') {
        after_marker
    } else {
        existing[after_marker..]
            .find('\n')
            .map_or(existing.len(), |p| after_marker + p + 1)
    };

    if !top_line.is_empty() && existing[after_marker..].contains(top_line) {
        return Err(NewsError::VersionExists(top_line.to_string()));
    }

    let mut merged = String::with_capacity(existing.len() + block.len() + 1);
    merged.push_str(&existing[..insert_at]);
    if !merged.is_empty() && !merged.ends_with('\n') {
        merged.push('\n');
    }
    merged.push_str(block);
    merged.push_str(&existing[insert_at..]);
    Ok(merged)
}

/// Merges the rendered block into the news file and writes the result
/// atomically (write to a temporary file in the same directory, then
/// replace), so an interrupted run never leaves a truncated file.
///
/// In single-file mode the existing file is merged around the start
/// string; in per-version mode the file is written whole.
///
/// # Errors
/// Returns merge errors plus any IO failure.
pub fn append_to_newsfile(
    directory: &Path,
    filename: &str,
    start_string: &str,
    top_line: &str,
    block: &str,
    single_file: bool,
) -> Result<PathBuf> {
    let path = directory.join(filename);
    let merged = if single_file {
        let existing = if path.exists() {
            Some(fs::read_to_string(&path)?)
        } else {
            None
        };
        merge(existing.as_deref(), start_string, top_line, block)?
    } else {
        block.to_string()
    };

    let target_dir = path.parent().unwrap_or(directory);
    let mut tmp = NamedTempFile::new_in(target_dir)?;
    tmp.write_all(merged.as_bytes())?;
    tmp.persist(&path).map_err(|e| NewsError::Io(e.error))?;
    Ok(path)
}
