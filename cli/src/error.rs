use news::NewsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("News error: {0}")]
    News(#[from] news::NewsError),

    #[error("VCS error: {0}")]
    Vcs(#[from] vcs::VcsError),

    #[error("UI interaction error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),

    #[error("{0}")]
    Other(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<CliError>),
}

impl CliError {
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Io(err) => format!("I/O operation failed: {err}"),
            Self::News(err) => format!("{err}"),
            Self::Vcs(err) => err.user_message(),
            Self::Dialoguer(err) => format!("UI interaction error: {err}"),
            Self::Anyhow(err) => format!("Error: {err}"),
            Self::Other(msg) => msg.clone(),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }

    /// Exit code 1 signals a configuration problem to scripts
    pub fn is_configuration(&self) -> bool {
        match self {
            Self::News(
                NewsError::Config(_) | NewsError::Toml(_) | NewsError::ConflictingFlags,
            ) => true,
            Self::WithContext(_, err) => err.is_configuration(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
