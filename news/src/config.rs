use crate::error::{NewsError, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the project directory
pub const CONFIG_FILE_NAME: &str = "chronicle.toml";

const DEFAULT_START_STRING: &str = ".. chronicle release notes start\n";
const DEFAULT_WRAP_WIDTH: usize = 79;

/// A fragment type: short key used in file names plus display rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeConfig {
    /// Key used in fragment file names, e.g. "feature"
    pub key: String,
    /// Heading shown in the rendered output, e.g. "Features"
    pub name: String,
    /// When false, entries render as a bare issue list without content
    pub showcontent: bool,
    /// When true, the heading renders even with zero entries
    pub always_show: bool,
}

/// Default fragment vocabulary, in rendering order
pub static DEFAULT_TYPES: Lazy<Vec<TypeConfig>> = Lazy::new(|| {
    [
        ("feature", "Features", true),
        ("bugfix", "Bugfixes", true),
        ("doc", "Improved Documentation", true),
        ("removal", "Deprecations and Removals", true),
        ("misc", "Misc", false),
    ]
    .into_iter()
    .map(|(key, name, showcontent)| TypeConfig {
        key: key.to_string(),
        name: name.to_string(),
        showcontent,
        always_show: false,
    })
    .collect()
});

/// A top-level grouping of fragments; the default section has an empty name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionConfig {
    /// Heading shown in the rendered output; empty for the default section
    pub name: String,
    /// Directory of the section's fragments, relative to the fragment root
    pub path: String,
}

/// How the title line is produced, resolved once at configuration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TitleMode {
    /// A templated title line rendered above the fragment block
    Separate(String),
    /// No title line at all (`title_format = false`)
    Omit,
    /// The default title, woven into the rendered block
    Inline,
}

/// Validated configuration for a chronicle run
#[derive(Debug, Clone)]
pub struct Config {
    /// Fragment root relative to the project directory; when unset,
    /// fragments live in `<package_dir>/<package>/newsfragments`
    pub directory: Option<String>,
    pub package: Option<String>,
    pub package_dir: String,
    /// News file name; a format string in per-version mode
    pub filename: String,
    pub single_file: bool,
    pub start_string: String,
    pub title: TitleMode,
    /// Format string with an `{issue}` placeholder; unset means `#` for
    /// numeric keys and the bare key otherwise
    pub issue_format: Option<String>,
    pub orphan_prefix: String,
    /// Underline characters by heading depth: title, section, nested type
    pub underlines: Vec<String>,
    pub all_bullets: bool,
    /// Wrap column, or None to disable wrapping
    pub wrap: Option<usize>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub sections: Vec<SectionConfig>,
    pub types: Vec<TypeConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: None,
            package: None,
            package_dir: ".".to_string(),
            filename: "NEWS.rst".to_string(),
            single_file: true,
            start_string: DEFAULT_START_STRING.to_string(),
            title: TitleMode::Inline,
            issue_format: None,
            orphan_prefix: "+".to_string(),
            underlines: vec!["=".to_string(), "-".to_string(), "~".to_string()],
            all_bullets: true,
            wrap: Some(DEFAULT_WRAP_WIDTH),
            name: None,
            version: None,
            sections: vec![SectionConfig {
                name: String::new(),
                path: String::new(),
            }],
            types: DEFAULT_TYPES.clone(),
        }
    }
}

impl Config {
    /// Loads and validates the configuration file at `path`
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or fails validation
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw_content = fs::read_to_string(path).map_err(|e| {
            NewsError::Config(format!(
                "Failed to read configuration file {}: {e}",
                path.display()
            ))
        })?;
        let file: ConfigFile = toml::from_str(&raw_content)?;
        file.chronicle.resolve()
    }

    /// Loads `chronicle.toml` from the given project directory
    ///
    /// # Errors
    /// Returns error if no configuration file exists there
    pub fn find(directory: &Path) -> Result<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Err(NewsError::Config(format!(
                "No configuration file found in {}",
                directory.display()
            )));
        }
        Self::from_file(&path)
    }

    /// Resolves the fragment root and the optional fixed subdirectory name
    /// that discovery appends below each section path
    #[must_use]
    pub fn fragment_layout(&self, base: &Path) -> (PathBuf, Option<String>) {
        match &self.directory {
            Some(dir) => (base.join(dir), None),
            None => {
                let mut root = base.join(&self.package_dir);
                if let Some(package) = &self.package {
                    root = root.join(package);
                }
                (root, Some("newsfragments".to_string()))
            }
        }
    }

    /// Looks up a type definition by its file-name key
    #[must_use]
    pub fn type_config(&self, key: &str) -> Option<&TypeConfig> {
        self.types.iter().find(|t| t.key == key)
    }

    fn validate(&self) -> Result<()> {
        if self.sections.is_empty() {
            return Err(NewsError::Config("At least one section is required".into()));
        }
        for (i, section) in self.sections.iter().enumerate() {
            if self.sections[..i].iter().any(|s| s.name == section.name) {
                return Err(NewsError::Config(format!(
                    "Duplicate section '{}'",
                    section.name
                )));
            }
        }
        if self.types.is_empty() {
            return Err(NewsError::Config(
                "At least one fragment type is required".into(),
            ));
        }
        for (i, ty) in self.types.iter().enumerate() {
            if ty.key.is_empty() || ty.key.contains('.') || ty.key.contains('/') {
                return Err(NewsError::Config(format!(
                    "Invalid fragment type key '{}'",
                    ty.key
                )));
            }
            if self.types[..i].iter().any(|t| t.key == ty.key) {
                return Err(NewsError::Config(format!(
                    "Duplicate fragment type '{}'",
                    ty.key
                )));
            }
        }
        if self.underlines.is_empty()
            || self.underlines.iter().any(|u| u.chars().count() != 1)
        {
            return Err(NewsError::Config(
                "underlines must be a list of single characters".into(),
            ));
        }
        if self.single_file && self.start_string.is_empty() {
            return Err(NewsError::Config(
                "start_string must not be empty in single-file mode".into(),
            ));
        }
        if !self.single_file && !self.filename.contains("{version}") {
            // A static filename would overwrite the same file every release
            return Err(NewsError::Config(
                "filename must contain {version} when single_file is false".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    chronicle: RawConfig,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    directory: Option<String>,
    package: Option<String>,
    package_dir: Option<String>,
    filename: Option<String>,
    single_file: Option<bool>,
    start_string: Option<String>,
    title_format: Option<RawTitleFormat>,
    issue_format: Option<String>,
    orphan_prefix: Option<String>,
    underlines: Option<Vec<String>>,
    all_bullets: Option<bool>,
    wrap: Option<RawWrap>,
    name: Option<String>,
    version: Option<String>,
    #[serde(rename = "section", default)]
    sections: Vec<RawSection>,
    #[serde(rename = "type", default)]
    types: Vec<RawType>,
}

/// `title_format` is three-way: a template string, `false` to omit the
/// title, or absent for the inline default
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTitleFormat {
    Template(String),
    Toggle(bool),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawWrap {
    Width(usize),
    Toggle(bool),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSection {
    name: String,
    path: String,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawType {
    key: String,
    name: String,
    #[serde(default = "default_true")]
    showcontent: bool,
    #[serde(default)]
    always_show: bool,
}

fn default_true() -> bool {
    true
}

impl RawConfig {
    fn resolve(self) -> Result<Config> {
        let defaults = Config::default();
        let title = match self.title_format {
            None | Some(RawTitleFormat::Toggle(true)) => TitleMode::Inline,
            Some(RawTitleFormat::Toggle(false)) => TitleMode::Omit,
            Some(RawTitleFormat::Template(t)) if t.is_empty() => TitleMode::Omit,
            Some(RawTitleFormat::Template(t)) => TitleMode::Separate(t),
        };
        let wrap = match self.wrap {
            None | Some(RawWrap::Toggle(true)) => Some(DEFAULT_WRAP_WIDTH),
            Some(RawWrap::Toggle(false)) => None,
            Some(RawWrap::Width(width)) => Some(width),
        };
        let sections = if self.sections.is_empty() {
            defaults.sections
        } else {
            self.sections
                .into_iter()
                .map(|s| SectionConfig {
                    name: s.name,
                    path: s.path,
                })
                .collect()
        };
        let types = if self.types.is_empty() {
            defaults.types
        } else {
            self.types
                .into_iter()
                .map(|t| TypeConfig {
                    key: t.key,
                    name: t.name,
                    showcontent: t.showcontent,
                    always_show: t.always_show,
                })
                .collect()
        };

        let config = Config {
            directory: self.directory,
            package: self.package,
            package_dir: self.package_dir.unwrap_or(defaults.package_dir),
            filename: self.filename.unwrap_or(defaults.filename),
            single_file: self.single_file.unwrap_or(defaults.single_file),
            start_string: self.start_string.unwrap_or(defaults.start_string),
            title,
            issue_format: self.issue_format,
            orphan_prefix: self.orphan_prefix.unwrap_or(defaults.orphan_prefix),
            underlines: self.underlines.unwrap_or(defaults.underlines),
            all_bullets: self.all_bullets.unwrap_or(defaults.all_bullets),
            wrap,
            name: self.name,
            version: self.version,
            sections,
            types,
        };
        config.validate()?;
        Ok(config)
    }
}
