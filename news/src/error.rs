use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a news file
#[derive(Error, Debug)]
pub enum NewsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Fragment file {} is not valid UTF-8", .0.display())]
    Encoding(PathBuf),

    #[error("No configured fragment type in file name '{file}'")]
    UnknownType { file: String },

    #[error("Start string '{0}' not found in news file")]
    MarkerNotFound(String),

    #[error("You can not choose both --yes and --keep at the same time")]
    ConflictingFlags,

    #[error("Multiple fragments for {issue}.{kind}.{counter} in section '{section}'")]
    DuplicateFragment {
        section: String,
        issue: String,
        kind: String,
        counter: u32,
    },

    #[error("News for '{0}' has already been produced in this news file")]
    VersionExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Type alias for Result with `NewsError`
pub type Result<T> = std::result::Result<T, NewsError>;
