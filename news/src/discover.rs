use crate::config::Config;
use crate::error::{NewsError, Result};
use crate::fragment::{Fragment, FragmentName};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Walks the fragment tree and returns every matching fragment with its
/// content, in a fully deterministic order.
///
/// For each configured section, files are listed from
/// `<base>/<section.path>[/<fragment_dir>]` and sorted lexicographically.
/// Files whose names match no configured type are ignored; fragment
/// directories routinely hold unrelated files such as a README. A missing
/// section directory yields no fragments. Pure read, no side effects.
///
/// # Errors
/// Returns `Encoding` if a fragment is not valid UTF-8, and
/// `DuplicateFragment` if two files resolve to the same
/// `(section, type, issue, counter)` tuple.
pub fn find_fragments(
    base: &Path,
    fragment_dir: Option<&str>,
    config: &Config,
) -> Result<Vec<Fragment>> {
    let mut fragments = Vec::new();
    for section in &config.sections {
        let mut dir = base.join(&section.path);
        if let Some(sub) = fragment_dir {
            dir = dir.join(sub);
        }

        let mut basenames = Vec::new();
        match fs::read_dir(&dir) {
            Ok(entries) => {
                for entry in entries {
                    let entry = entry?;
                    if entry.file_type()?.is_dir() {
                        continue;
                    }
                    if let Some(name) = entry.file_name().to_str() {
                        basenames.push(name.to_string());
                    }
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        basenames.sort();

        let mut seen: HashSet<(String, String, u32)> = HashSet::new();
        for basename in basenames {
            let Ok(mut name) = FragmentName::parse(&basename, &config.types) else {
                continue;
            };
            // Duplicate detection keys on the issue as written, so orphan
            // fragments with distinct suffixes never collide.
            let key = (name.issue.clone(), name.kind.clone(), name.counter);
            if !seen.insert(key) {
                return Err(NewsError::DuplicateFragment {
                    section: section.name.clone(),
                    issue: name.issue,
                    kind: name.kind,
                    counter: name.counter,
                });
            }
            if !config.orphan_prefix.is_empty() && name.issue.starts_with(&config.orphan_prefix) {
                name.issue = String::new();
            }

            let path = dir.join(&basename);
            let bytes = fs::read(&path)?;
            let content =
                String::from_utf8(bytes).map_err(|_| NewsError::Encoding(path.clone()))?;
            fragments.push(Fragment {
                section: section.name.clone(),
                name,
                content,
                source_path: path,
            });
        }
    }
    Ok(fragments)
}
