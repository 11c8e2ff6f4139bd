use chronicle_tests::{create_test_project, write_fragment};
use news::render::{RenderContext, VersionData, render_fragments};
use news::{Config, NewsError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn versiondata() -> VersionData {
    VersionData {
        name: "demo".to_string(),
        version: "1.0.0".to_string(),
        date: "2024-06-01".to_string(),
    }
}

/// The full non-interactive pipeline: config, discovery, grouping,
/// rendering, merge. VCS staging and prompting stay in the binary.
fn run_build(dir: &Path, data: &VersionData) -> news::Result<PathBuf> {
    let config = Config::find(dir)?;
    let prepared = news::build::prepare(dir, &config, data)?;
    news::build::commit(dir, &config, &prepared)
}

#[test]
fn end_to_end_build_orders_types_and_links_issues() {
    let tmp = TempDir::new().unwrap();
    let fragments = create_test_project(tmp.path(), "[chronicle]\n");
    write_fragment(&fragments, "1.feature", "Added X");
    write_fragment(&fragments, "2.bugfix", "Fixed Y");

    let path = run_build(tmp.path(), &versiondata()).unwrap();
    let output = fs::read_to_string(path).unwrap();

    assert!(output.contains("demo 1.0.0 (2024-06-01)"));
    let features = output.find("Features\n--------").unwrap();
    let bugfixes = output.find("Bugfixes\n--------").unwrap();
    assert!(features < bugfixes);
    assert!(output.contains("- Added X (#1)"));
    assert!(output.contains("- Fixed Y (#2)"));
}

#[test]
fn rebuild_after_fragment_removal_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    let fragments = create_test_project(tmp.path(), "[chronicle]\n");
    write_fragment(&fragments, "1.feature", "Added X");

    let path = run_build(tmp.path(), &versiondata()).unwrap();
    let after_first = fs::read_to_string(&path).unwrap();

    // Fragments consumed; a re-run stops before writing anything
    fs::remove_file(fragments.join("1.feature")).unwrap();
    let result = run_build(tmp.path(), &versiondata());
    assert!(matches!(result, Err(NewsError::VersionExists(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), after_first);
}

#[test]
fn successive_versions_accumulate_newest_first() {
    let tmp = TempDir::new().unwrap();
    let fragments = create_test_project(tmp.path(), "[chronicle]\n");
    write_fragment(&fragments, "1.feature", "Added X");
    let path = run_build(tmp.path(), &versiondata()).unwrap();

    fs::remove_file(fragments.join("1.feature")).unwrap();
    write_fragment(&fragments, "2.bugfix", "Fixed Y");
    let mut next = versiondata();
    next.version = "1.1.0".to_string();
    run_build(tmp.path(), &next).unwrap();

    let output = fs::read_to_string(&path).unwrap();
    let newer = output.find("demo 1.1.0").unwrap();
    let older = output.find("demo 1.0.0").unwrap();
    assert!(newer < older);
    assert!(output.contains("- Added X (#1)"));
    assert!(output.contains("- Fixed Y (#2)"));
}

#[test]
fn rendering_is_deterministic_across_runs() {
    let tmp = TempDir::new().unwrap();
    let fragments = create_test_project(
        tmp.path(),
        "[chronicle]\ntitle_format = \"{name} {version} ({project_date})\"\n",
    );
    write_fragment(&fragments, "10.feature", "Ten");
    write_fragment(&fragments, "2.feature", "Two");
    write_fragment(&fragments, "9.feature", "Nine");
    write_fragment(&fragments, "+orphan.misc", "");

    let config = Config::find(tmp.path()).unwrap();
    let (base, sub) = config.fragment_layout(tmp.path());
    let found = news::discover::find_fragments(&base, sub.as_deref(), &config).unwrap();
    let grouped = news::group_fragments(&found, &config).unwrap();
    let context = RenderContext {
        config: &config,
        versiondata: versiondata(),
        render_title: false,
    };
    let first = render_fragments(&context, &grouped);
    let second = render_fragments(&context, &grouped);
    assert_eq!(first, second);

    // Numeric issue keys order numerically, not asciibetically
    let two = first.find("- Two (#2)").unwrap();
    let nine = first.find("- Nine (#9)").unwrap();
    let ten = first.find("- Ten (#10)").unwrap();
    assert!(two < nine && nine < ten);
}

#[test]
fn merge_preserves_existing_news_content() {
    let tmp = TempDir::new().unwrap();
    let fragments = create_test_project(tmp.path(), "[chronicle]\n");
    write_fragment(&fragments, "5.feature", "Fresh change");

    let existing = "Release notes\n=============\n\n.. chronicle release notes start\n\nOld body\n";
    fs::write(tmp.path().join("NEWS.rst"), existing).unwrap();

    let path = run_build(tmp.path(), &versiondata()).unwrap();
    let output = fs::read_to_string(path).unwrap();

    assert!(output.starts_with("Release notes\n=============\n\n.. chronicle release notes start\n"));
    assert!(output.ends_with("\nOld body\n"));
    assert!(output.contains("- Fresh change (#5)"));
}

#[test]
fn missing_marker_fails_without_touching_the_file() {
    let tmp = TempDir::new().unwrap();
    let fragments = create_test_project(tmp.path(), "[chronicle]\n");
    write_fragment(&fragments, "5.feature", "Fresh change");

    fs::write(tmp.path().join("NEWS.rst"), "Just prose, no marker\n").unwrap();
    let result = run_build(tmp.path(), &versiondata());
    assert!(matches!(result, Err(NewsError::MarkerNotFound(_))));
    assert_eq!(
        fs::read_to_string(tmp.path().join("NEWS.rst")).unwrap(),
        "Just prose, no marker\n"
    );
}

#[test]
fn per_version_mode_names_files_by_version() {
    let tmp = TempDir::new().unwrap();
    let config = "[chronicle]\n\
                  single_file = false\n\
                  filename = \"notes-{version}.rst\"\n\
                  title_format = false\n";
    let fragments = create_test_project(tmp.path(), config);
    write_fragment(&fragments, "3.feature", "Versioned");

    let path = run_build(tmp.path(), &versiondata()).unwrap();
    assert_eq!(path.file_name().unwrap(), "notes-1.0.0.rst");
    let output = fs::read_to_string(path).unwrap();
    assert!(output.starts_with("Features\n--------"));
    assert!(output.contains("- Versioned (#3)"));
}

#[test]
fn build_then_stage_and_remove_consumed_fragments() {
    let tmp = TempDir::new().unwrap();
    git2::Repository::init(tmp.path()).unwrap();
    let fragments = create_test_project(tmp.path(), "[chronicle]\n");
    write_fragment(&fragments, "1.feature", "Added X");

    let news_path = run_build(tmp.path(), &versiondata()).unwrap();
    let workspace = vcs::GitWorkspace::discover(tmp.path()).unwrap();
    vcs::Workspace::stage(&workspace, &news_path).unwrap();

    let fragment_paths = vec![fragments.join("1.feature")];
    match news::decide(&fragment_paths, true, false).unwrap() {
        news::RemovalDecision::Removed(files) => {
            vcs::Workspace::remove(&workspace, &files).unwrap();
        }
        other => panic!("expected removal, got {other:?}"),
    }
    assert!(!fragments.join("1.feature").exists());

    let repo = git2::Repository::open(tmp.path()).unwrap();
    let index = repo.index().unwrap();
    assert!(index.get_path(std::path::Path::new("NEWS.rst"), 0).is_some());
}

#[test]
fn sectioned_project_renders_section_headings() {
    let tmp = TempDir::new().unwrap();
    let config = "[chronicle]\n\
                  [[chronicle.section]]\nname = \"\"\npath = \"\"\n\
                  [[chronicle.section]]\nname = \"Web\"\npath = \"web\"\n";
    let fragments = create_test_project(tmp.path(), config);
    write_fragment(&fragments, "1.feature", "Core change");
    let web = tmp.path().join("web").join("newsfragments");
    fs::create_dir_all(&web).unwrap();
    write_fragment(&web, "2.bugfix", "Web change");

    let path = run_build(tmp.path(), &versiondata()).unwrap();
    let output = fs::read_to_string(path).unwrap();

    assert!(output.contains("Web\n---\n\nBugfixes\n~~~~~~~~\n"));
    assert!(output.contains("- Core change (#1)"));
    assert!(output.contains("- Web change (#2)"));
}
