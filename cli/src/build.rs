use crate::error::{CliError, Result};
use crate::ui;
use anyhow::Context;
use chrono::Local;
use dialoguer::{Confirm, theme::ColorfulTheme};
use news::render::VersionData;
use news::{Config, RemovalDecision};
use std::env;
use std::path::{Path, PathBuf};
use vcs::{GitWorkspace, Workspace};

#[derive(Debug)]
pub struct BuildOptions {
    pub draft: bool,
    pub config: Option<String>,
    pub dir: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub date: Option<String>,
    pub yes: bool,
    pub keep: bool,
}

pub fn execute(options: BuildOptions) -> Result<()> {
    // Flag validation comes before any fragment work
    news::removal::validate_flags(options.yes, options.keep)?;
    let to_err = options.draft;

    let base = match &options.dir {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir()?,
    };
    let base = base
        .canonicalize()
        .with_context(|| format!("Invalid directory {}", base.display()))?;

    ui::status_message("Loading configuration...", to_err);
    let config = match &options.config {
        Some(path) => Config::from_file(Path::new(path))?,
        None => Config::find(&base)?,
    };

    ui::status_message("Rendering news fragments...", to_err);
    let versiondata = resolve_versiondata(&options, &config, &base)?;
    let prepared = news::build::prepare(&base, &config, &versiondata)?;

    if options.draft {
        ui::status_message(
            "Draft only -- nothing has been written.\nWhat is seen below is what would be written.",
            to_err,
        );
        println!("{}", prepared.content);
        return Ok(());
    }

    ui::status_message("Writing to newsfile...", to_err);
    let news_path = news::build::commit(&base, &config, &prepared)?;

    ui::status_message("Staging newsfile...", to_err);
    let workspace = GitWorkspace::discover(&base)?;
    workspace.stage(&news_path)?;

    match news::decide(&prepared.fragment_paths, options.yes, options.keep)? {
        RemovalDecision::Kept(files) if files.is_empty() => {
            ui::info_message("No news fragments to remove. Skipping!");
        }
        RemovalDecision::Kept(files) => {
            ui::info_message("Keeping the following files:");
            for file in &files {
                ui::file_entry(file);
            }
        }
        RemovalDecision::Removed(files) => {
            ui::info_message("Removing the following files:");
            for file in &files {
                ui::file_entry(file);
            }
            remove_fragments(&workspace, &files, to_err)?;
        }
        RemovalDecision::Prompted(files) => {
            ui::info_message("I want to remove the following files:");
            for file in &files {
                ui::file_entry(file);
            }
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt("Is it okay if I remove those files?")
                .default(true)
                .interact()?;
            if confirmed {
                remove_fragments(&workspace, &files, to_err)?;
            }
        }
    }

    ui::success_message("Done!");
    Ok(())
}

fn remove_fragments(workspace: &impl Workspace, files: &[PathBuf], to_err: bool) -> Result<()> {
    ui::status_message("Removing news fragments...", to_err);
    workspace
        .remove(files)
        .map_err(|e| CliError::Vcs(e).with_context("Failed to remove news fragments"))?;
    Ok(())
}

/// Resolution order for each field: command-line flag, configuration,
/// project manifest (name and version) or today's date
fn resolve_versiondata(
    options: &BuildOptions,
    config: &Config,
    base: &Path,
) -> Result<VersionData> {
    let package_dir = base.join(&config.package_dir);

    let version = match options.version.clone().or_else(|| config.version.clone()) {
        Some(version) => version,
        None => news::project::project_version(&package_dir)?,
    };

    let name = match options.name.clone().or_else(|| config.name.clone()) {
        Some(name) => name,
        None => match &config.package {
            Some(package) if !package.is_empty() => news::project::project_name(&package_dir)?,
            // A project name may simply not be needed
            _ => String::new(),
        },
    };

    let date = options
        .date
        .clone()
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

    Ok(VersionData {
        name,
        version,
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonexistent_directory_reports_context() {
        let result = execute(BuildOptions {
            draft: false,
            config: None,
            dir: Some("/definitely/not/a/real/path".to_string()),
            name: None,
            version: None,
            date: None,
            yes: false,
            keep: false,
        });

        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Anyhow(_)));
        assert!(err.user_message().contains("Invalid directory"));
    }
}
