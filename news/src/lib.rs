//! Core pipeline for building a combined news file from news fragments:
//! discovery, parsing, grouping, rendering, and the merge into the
//! persistent news file. Interactive I/O and VCS access live in the
//! `cli` and `vcs` crates.

pub mod build;
pub mod config;
pub mod discover;
pub mod error;
pub mod fragment;
pub mod group;
pub mod project;
pub mod removal;
pub mod render;
pub mod writer;

pub use config::{Config, SectionConfig, TitleMode, TypeConfig};
pub use error::{NewsError, Result};
pub use fragment::{Fragment, FragmentName};
pub use group::{GroupedCategory, GroupedEntry, GroupedSection, group_fragments};
pub use removal::{RemovalDecision, decide};
pub use render::{RenderContext, VersionData, render_fragments};
