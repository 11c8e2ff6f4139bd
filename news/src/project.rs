use crate::error::{NewsError, Result};
use std::fs;
use std::path::Path;

fn read_manifest(package_dir: &Path) -> Result<toml::Value> {
    let path = package_dir.join("Cargo.toml");
    let raw_content = fs::read_to_string(&path).map_err(|e| {
        NewsError::Config(format!(
            "Failed to read project manifest {}: {e}",
            path.display()
        ))
    })?;
    Ok(toml::from_str(&raw_content)?)
}

fn package_field(manifest: &toml::Value, field: &str) -> Option<String> {
    manifest
        .get("package")
        .and_then(|p| p.get(field))
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

/// Reads the project name from the `[package]` table of `Cargo.toml`
///
/// # Errors
/// Returns `Config` if the manifest is missing or carries no name
pub fn project_name(package_dir: &Path) -> Result<String> {
    let manifest = read_manifest(package_dir)?;
    package_field(&manifest, "name").ok_or_else(|| {
        NewsError::Config(format!(
            "No package name in {}; set 'name' in the configuration",
            package_dir.join("Cargo.toml").display()
        ))
    })
}

/// Reads the project version from the `[package]` table of `Cargo.toml`
///
/// # Errors
/// Returns `Config` if the manifest is missing or carries no literal
/// version (workspace-inherited versions cannot be resolved here)
pub fn project_version(package_dir: &Path) -> Result<String> {
    let manifest = read_manifest(package_dir)?;
    package_field(&manifest, "version").ok_or_else(|| {
        NewsError::Config(format!(
            "No package version in {}; set 'version' in the configuration or pass --version",
            package_dir.join("Cargo.toml").display()
        ))
    })
}
