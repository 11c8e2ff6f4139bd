use crate::config::Config;
use crate::error::{NewsError, Result};
use crate::fragment::Fragment;

/// A single issue-level item ready for rendering: the joined content and
/// the sorted issue keys that share it. Built once, never mutated after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedEntry {
    pub text: String,
    /// Raw issue keys, numeric-aware sorted; empty for orphan entries
    pub issues: Vec<String>,
}

/// All entries of one fragment type within a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCategory {
    /// Type key into the configured vocabulary
    pub kind: String,
    pub entries: Vec<GroupedEntry>,
}

/// All categories of one section, in configured type order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedSection {
    pub name: String,
    pub categories: Vec<GroupedCategory>,
}

/// Sort key for a single issue: integer issues sort as integers, string
/// issues sort as strings before them. Orphans never reach this function.
fn issue_sort_key(issue: &str) -> (i128, String) {
    if !issue.is_empty() && issue.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(n) = issue.parse::<i128>() {
            return (n, String::new());
        }
    }
    (-1, issue.to_string())
}

/// Sort key for a whole entry: its issue keys in order, or a last-place
/// sentinel keyed on content for orphan entries.
fn entry_sort_key(entry: &GroupedEntry) -> Vec<(i128, String)> {
    if entry.issues.is_empty() {
        vec![(i128::MAX, entry.text.clone())]
    } else {
        entry.issues.iter().map(|i| issue_sort_key(i)).collect()
    }
}

/// Indents continuation lines of a bullet's content by two spaces so
/// wrapped and multi-line bullets align under the marker.
fn bullet_text(content: &str, all_bullets: bool) -> String {
    let stripped = content.trim();
    if !all_bullets || !stripped.contains('\n') {
        return stripped.to_string();
    }
    let mut lines = stripped.lines();
    let mut text = lines.next().unwrap_or_default().to_string();
    for line in lines {
        text.push('\n');
        if !line.trim().is_empty() {
            text.push_str("  ");
        }
        text.push_str(line);
    }
    text
}

/// Buckets fragments by section, then by type, merges fragments that share
/// content, and fixes a total, stable ordering for rendering.
///
/// Fragments with identical stripped content fold into one entry whose
/// issue list accumulates (several issues fixed by one change); distinct
/// content under the same issue stays as distinct entries. Types with
/// `always_show` appear even when empty.
///
/// # Errors
/// Returns `Config` if a fragment names a section that is not configured.
pub fn group_fragments(fragments: &[Fragment], config: &Config) -> Result<Vec<GroupedSection>> {
    for fragment in fragments {
        if !config.sections.iter().any(|s| s.name == fragment.section) {
            return Err(NewsError::Config(format!(
                "Fragment {} belongs to unknown section '{}'",
                fragment.source_path.display(),
                fragment.section
            )));
        }
    }

    let mut sections = Vec::with_capacity(config.sections.len());
    for section in &config.sections {
        let mut categories = Vec::new();
        for ty in &config.types {
            let mut members: Vec<&Fragment> = fragments
                .iter()
                .filter(|f| f.section == section.name && f.name.kind == ty.key)
                .collect();
            // Counter order within an issue is part of the contract; the
            // issue order here makes first-seen content deterministic.
            members.sort_by_cached_key(|f| {
                (issue_sort_key(&f.name.issue), f.name.counter)
            });

            let mut entries: Vec<GroupedEntry> = Vec::new();
            for fragment in members {
                let text = bullet_text(&fragment.content, config.all_bullets);
                match entries.iter_mut().find(|e| e.text == text) {
                    Some(entry) => {
                        if !fragment.name.issue.is_empty()
                            && !entry.issues.contains(&fragment.name.issue)
                        {
                            entry.issues.push(fragment.name.issue.clone());
                        }
                    }
                    None => {
                        let issues = if fragment.name.issue.is_empty() {
                            Vec::new()
                        } else {
                            vec![fragment.name.issue.clone()]
                        };
                        entries.push(GroupedEntry { text, issues });
                    }
                }
            }
            for entry in &mut entries {
                entry.issues.sort_by_cached_key(|i| issue_sort_key(i));
            }
            entries.sort_by_cached_key(entry_sort_key);

            if !entries.is_empty() || ty.always_show {
                categories.push(GroupedCategory {
                    kind: ty.key.clone(),
                    entries,
                });
            }
        }
        sections.push(GroupedSection {
            name: section.name.clone(),
            categories,
        });
    }
    Ok(sections)
}
