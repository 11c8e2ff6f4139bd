//! Version-control capability consumed by the news pipeline.

pub mod error;
pub mod workspace;

pub use error::{Result, VcsError};
pub use workspace::{GitWorkspace, Workspace};
