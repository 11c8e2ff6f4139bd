use crate::config::{Config, TitleMode};
use crate::error::Result;
use crate::render::{self, RenderContext, VersionData};
use crate::{discover, group, writer};
use std::path::{Path, PathBuf};

/// Everything the pipeline decides before touching the news file. Draft
/// mode stops after this; a real run hands it to [`commit`].
#[derive(Debug)]
pub struct Prepared {
    /// Final block, title included when the title mode calls for one
    pub content: String,
    /// Line whose presence after the marker means this version was
    /// already merged; empty when the title is omitted
    pub guard_line: String,
    /// Target file name, version-substituted in per-version mode
    pub news_file: String,
    /// Source files of every consumed fragment, for removal
    pub fragment_paths: Vec<PathBuf>,
}

/// Runs discovery, grouping and rendering for `base`, then resolves the
/// title mode into the final block and its re-render guard.
///
/// # Errors
/// Returns discovery, grouping and configuration errors; nothing is
/// written.
pub fn prepare(base: &Path, config: &Config, versiondata: &VersionData) -> Result<Prepared> {
    let (fragment_base, fragment_dir) = config.fragment_layout(base);
    let fragments = discover::find_fragments(&fragment_base, fragment_dir.as_deref(), config)?;
    let grouped = group::group_fragments(&fragments, config)?;

    let (render_title, top_line) = match &config.title {
        TitleMode::Separate(template) => (false, render::format_template(template, versiondata)),
        TitleMode::Omit => (false, String::new()),
        TitleMode::Inline => (true, String::new()),
    };
    let context = RenderContext {
        config,
        versiondata: versiondata.clone(),
        render_title,
    };
    let rendered = render::render_fragments(&context, &grouped);
    let content = if top_line.is_empty() {
        rendered
    } else {
        let mark = config.underlines.first().map(String::as_str).unwrap_or("=");
        format!("{top_line}\n{}\n\n{rendered}", render::underline(&top_line, mark))
    };

    // The inline title is the one the rendered block carries
    let guard_line = if render_title {
        render::title_line(versiondata)
    } else {
        top_line
    };
    let news_file = if config.single_file {
        config.filename.clone()
    } else {
        render::format_template(&config.filename, versiondata)
    };

    Ok(Prepared {
        content,
        guard_line,
        news_file,
        fragment_paths: fragments.iter().map(|f| f.source_path.clone()).collect(),
    })
}

/// Merges the prepared block into the news file under `base`.
///
/// # Errors
/// Returns merge and IO errors; a failed merge leaves the file untouched.
pub fn commit(base: &Path, config: &Config, prepared: &Prepared) -> Result<PathBuf> {
    writer::append_to_newsfile(
        base,
        &prepared.news_file,
        &config.start_string,
        &prepared.guard_line,
        &prepared.content,
        config.single_file,
    )
}
