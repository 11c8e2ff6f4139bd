use std::path::PathBuf;
use thiserror::Error;

/// VCS operation error type that provides detailed context about the error
#[derive(Error, Debug)]
pub enum VcsError {
    #[error("Git2 error: {0}")]
    Git2Error(#[from] git2::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Path {} is outside the repository work tree", .0.display())]
    OutsideWorkTree(PathBuf),
}

impl VcsError {
    /// Get a user-friendly message for command line display
    pub fn user_message(&self) -> String {
        match self {
            Self::RepositoryError(msg) => msg.clone(),
            Self::OutsideWorkTree(path) => format!(
                "{} is outside the git work tree and can not be staged",
                path.display()
            ),
            _ => format!("{self}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, VcsError>;
