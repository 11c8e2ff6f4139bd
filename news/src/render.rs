use crate::config::{Config, TypeConfig};
use crate::group::{GroupedCategory, GroupedSection};
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm, fill};

/// Project name, version and date substituted into titles and file names
#[derive(Debug, Clone, Default)]
pub struct VersionData {
    pub name: String,
    pub version: String,
    pub date: String,
}

/// Immutable formatting bundle handed to the renderer
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub config: &'a Config,
    pub versiondata: VersionData,
    /// Weave the default title line into the rendered block; false when the
    /// title is rendered separately or omitted
    pub render_title: bool,
}

/// Substitutes `{name}`, `{version}` and `{project_date}` placeholders
#[must_use]
pub fn format_template(template: &str, data: &VersionData) -> String {
    template
        .replace("{name}", &data.name)
        .replace("{version}", &data.version)
        .replace("{project_date}", &data.date)
}

/// Underline string for a heading, one mark per character of the heading
#[must_use]
pub fn underline(text: &str, mark: &str) -> String {
    mark.repeat(text.chars().count())
}

/// The default title line: `name version (date)`, version-only when the
/// project has no name
#[must_use]
pub fn title_line(data: &VersionData) -> String {
    if data.name.is_empty() {
        format!("{} ({})", data.version, data.date)
    } else {
        format!("{} {} ({})", data.name, data.version, data.date)
    }
}

fn render_issue(issue_format: Option<&str>, issue: &str) -> String {
    match issue_format {
        Some(format) => format.replace("{issue}", issue),
        None => {
            if !issue.is_empty() && issue.bytes().all(|b| b.is_ascii_digit()) {
                format!("#{issue}")
            } else {
                issue.to_string()
            }
        }
    }
}

/// Renders grouped fragments into the final textual block.
///
/// Layout: an optional title, then per section an optional heading, then
/// per type a heading and its entries. One blank line follows a heading,
/// two blank lines separate sibling blocks, and the output ends with
/// exactly one newline. Given identical inputs the output bytes are
/// identical on every invocation.
#[must_use]
pub fn render_fragments(ctx: &RenderContext, sections: &[GroupedSection]) -> String {
    let config = ctx.config;
    let depth = |index: usize| {
        config
            .underlines
            .get(index.min(config.underlines.len().saturating_sub(1)))
            .map(String::as_str)
            .unwrap_or("=")
    };

    let mut out = String::new();
    if ctx.render_title {
        let title = title_line(&ctx.versiondata);
        out.push_str(&title);
        out.push('\n');
        out.push_str(&underline(&title, depth(0)));
        out.push_str("\n\n");
    }

    let mut blocks: Vec<String> = Vec::new();
    for section in sections {
        if section.name.is_empty() {
            if section.categories.is_empty() {
                blocks.push("No significant changes.".to_string());
            } else {
                for category in &section.categories {
                    blocks.push(category_block(config, category, depth(1)));
                }
            }
        } else {
            let mut block = String::new();
            block.push_str(&section.name);
            block.push('\n');
            block.push_str(&underline(&section.name, depth(1)));
            block.push_str("\n\n");
            if section.categories.is_empty() {
                block.push_str("No significant changes.");
            } else {
                let rendered: Vec<String> = section
                    .categories
                    .iter()
                    .map(|category| category_block(config, category, depth(2)))
                    .collect();
                block.push_str(&rendered.join("\n\n\n"));
            }
            blocks.push(block);
        }
    }
    out.push_str(&blocks.join("\n\n\n"));
    out.push('\n');

    match config.wrap {
        Some(width) => wrap_block(&out, width, config.all_bullets),
        None => out,
    }
}

fn category_block(config: &Config, category: &GroupedCategory, mark: &str) -> String {
    let fallback = TypeConfig {
        key: category.kind.clone(),
        name: category.kind.clone(),
        showcontent: true,
        always_show: false,
    };
    let ty = config.type_config(&category.kind).unwrap_or(&fallback);

    let mut block = String::new();
    block.push_str(&ty.name);
    block.push('\n');
    block.push_str(&underline(&ty.name, mark));
    block.push_str("\n\n");

    if category.entries.is_empty() {
        block.push_str("No significant changes.");
        return block;
    }

    let issue_format = config.issue_format.as_deref();
    if ty.showcontent {
        let lines: Vec<String> = category
            .entries
            .iter()
            .map(|entry| {
                let issues: Vec<String> = entry
                    .issues
                    .iter()
                    .map(|i| render_issue(issue_format, i))
                    .collect();
                let mut line = if config.all_bullets {
                    format!("- {}", entry.text)
                } else {
                    entry.text.clone()
                };
                if !issues.is_empty() {
                    line.push_str(&format!(" ({})", issues.join(", ")));
                }
                line
            })
            .collect();
        block.push_str(&lines.join("\n"));
    } else {
        // Issue-list-only types collapse every entry into one line
        let issues: Vec<String> = category
            .entries
            .iter()
            .flat_map(|entry| entry.issues.iter())
            .map(|i| render_issue(issue_format, i))
            .collect();
        if config.all_bullets {
            block.push_str("- ");
        }
        block.push_str(&issues.join(", "));
    }
    block
}

/// Fills every rendered line at the given width: greedy first-fit, ASCII
/// whitespace word separation, no word or hyphen breaking, so long URLs
/// overflow onto their own line instead of being split.
fn wrap_block(text: &str, width: usize, all_bullets: bool) -> String {
    let wrapped: Vec<String> = text
        .split('\n')
        .map(|line| {
            let leading = &line[..line.len() - line.trim_start().len()];
            let options = Options::new(width)
                .word_separator(WordSeparator::AsciiSpace)
                .word_splitter(WordSplitter::NoHyphenation)
                .wrap_algorithm(WrapAlgorithm::FirstFit)
                .break_words(false)
                .initial_indent(leading)
                .subsequent_indent(continuation_indent(line, all_bullets));
            fill(line.trim_start(), options)
        })
        .collect();
    wrapped.join("\n")
}

fn continuation_indent(line: &str, all_bullets: bool) -> &'static str {
    if line.trim().is_empty() {
        ""
    } else if all_bullets || line.starts_with("- ") {
        "  "
    } else {
        ""
    }
}
