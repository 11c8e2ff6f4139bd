use crate::config::TypeConfig;
use crate::error::{NewsError, Result};
use std::path::PathBuf;

/// The logical identity encoded in a fragment file name:
/// `<issue-key>.<type>[.<counter>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentName {
    /// Issue or ticket key; empty for orphan fragments
    pub issue: String,
    /// Fragment type key, drawn from the configured vocabulary
    pub kind: String,
    /// Disambiguates multiple fragments for the same issue and type
    pub counter: u32,
}

impl FragmentName {
    /// Decomposes a fragment basename against the configured vocabulary.
    ///
    /// The type key may sit anywhere after the first dot, so both
    /// `123.feature` and `123.feature.rst` parse; everything before the key
    /// is the issue. A part directly after the key that parses as a decimal
    /// integer is the counter.
    ///
    /// # Errors
    /// Returns `UnknownType` if no part of the name is a configured type.
    pub fn parse(basename: &str, types: &[TypeConfig]) -> Result<Self> {
        let parts: Vec<&str> = basename.split('.').collect();
        for (i, part) in parts.iter().enumerate().skip(1) {
            if !types.iter().any(|t| t.key == *part) {
                continue;
            }
            let mut issue = parts[..i].join(".").trim().to_string();
            if !issue.is_empty() && issue.bytes().all(|b| b.is_ascii_digit()) {
                // Leading zeros would break numeric issue merging
                issue = issue.trim_start_matches('0').to_string();
                if issue.is_empty() {
                    issue = "0".to_string();
                }
            }
            let counter = parts
                .get(i + 1)
                .and_then(|p| p.parse::<u32>().ok())
                .unwrap_or(0);
            return Ok(Self {
                issue,
                kind: (*part).to_string(),
                counter,
            });
        }
        Err(NewsError::UnknownType {
            file: basename.to_string(),
        })
    }
}

/// One unit of change documentation, parsed at the discovery boundary
#[derive(Debug, Clone)]
pub struct Fragment {
    /// Name of the configured section this fragment belongs to
    pub section: String,
    pub name: FragmentName,
    /// Raw fragment text; whitespace-only means present-but-empty
    pub content: String,
    /// Filesystem origin, retained through the pipeline for removal
    pub source_path: PathBuf,
}

impl Fragment {
    /// Orphan fragments carry no issue key and render unlabeled
    #[must_use]
    pub fn is_orphan(&self) -> bool {
        self.name.issue.is_empty()
    }
}
