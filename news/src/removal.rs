use crate::error::{NewsError, Result};
use std::path::PathBuf;

/// Outcome of the fragment-removal decision. The actual deletion and VCS
/// staging are performed by the caller, strictly after a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalDecision {
    /// Remove the listed fragment files without asking
    Removed(Vec<PathBuf>),
    /// Keep the listed fragment files; the list is surfaced for audit
    Kept(Vec<PathBuf>),
    /// Ask the user; the caller maps the answer to removed or kept
    Prompted(Vec<PathBuf>),
}

/// Validates the yes/keep flag combination.
///
/// # Errors
/// Returns `ConflictingFlags` when both are set. Called before any
/// fragment work begins.
pub fn validate_flags(yes: bool, keep: bool) -> Result<()> {
    if yes && keep {
        return Err(NewsError::ConflictingFlags);
    }
    Ok(())
}

/// Pure decision logic for consumed fragment files: no filesystem or VCS
/// access, no prompting.
///
/// # Errors
/// Returns `ConflictingFlags` when both flags are set.
pub fn decide(paths: &[PathBuf], yes: bool, keep: bool) -> Result<RemovalDecision> {
    validate_flags(yes, keep)?;
    let paths = paths.to_vec();
    if paths.is_empty() {
        return Ok(RemovalDecision::Kept(paths));
    }
    if keep {
        return Ok(RemovalDecision::Kept(paths));
    }
    if yes {
        return Ok(RemovalDecision::Removed(paths));
    }
    Ok(RemovalDecision::Prompted(paths))
}
