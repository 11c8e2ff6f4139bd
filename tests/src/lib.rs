//! Shared fixtures for the chronicle integration tests.

use std::fs;
use std::path::{Path, PathBuf};

/// Lays out a minimal project: a manifest, a configuration file, and a
/// fragment directory.
pub fn create_test_project(dir: &Path, config: &str) -> PathBuf {
    let manifest = "[package]\nname = \"demo\"\nversion = \"1.0.0\"\nedition = \"2024\"\n";
    fs::write(dir.join("Cargo.toml"), manifest).unwrap();
    fs::write(dir.join("chronicle.toml"), config).unwrap();
    let fragments = dir.join("newsfragments");
    fs::create_dir_all(&fragments).unwrap();
    fragments
}

/// Writes one fragment file into the fragment directory.
pub fn write_fragment(fragments: &Path, name: &str, content: &str) {
    fs::write(fragments.join(name), content).unwrap();
}
