use crate::error::{Result, VcsError};
use git2::Repository as GitRepository;
use std::fs;
use std::path::{Path, PathBuf};

/// The version-control capability the news pipeline consumes: stage the
/// rewritten news file, remove consumed fragment files. Both run only
/// after a successful merge.
pub trait Workspace {
    /// Stage a file in the index
    ///
    /// # Errors
    /// Returns error if the file cannot be added to the index
    fn stage(&self, path: &Path) -> Result<()>;

    /// Remove files from the index and delete them from the work tree
    ///
    /// # Errors
    /// Returns error if any file cannot be removed
    fn remove(&self, paths: &[PathBuf]) -> Result<()>;
}

pub struct GitWorkspace {
    repo: GitRepository,
    workdir: PathBuf,
}

impl GitWorkspace {
    /// Discovers the repository containing `base`
    ///
    /// # Errors
    /// Returns error if `base` is not inside a git work tree
    pub fn discover(base: &Path) -> Result<Self> {
        let repo = GitRepository::discover(base).map_err(|e| {
            VcsError::RepositoryError(format!(
                "Failed to discover git repository from {}: {e}",
                base.display()
            ))
        })?;
        let workdir = repo
            .workdir()
            .ok_or_else(|| {
                VcsError::RepositoryError("Repository has no work tree".to_string())
            })?
            .canonicalize()?;
        Ok(Self { repo, workdir })
    }

    /// Index paths are relative to the repository root
    fn relative(&self, path: &Path) -> Result<PathBuf> {
        let canonical = path.canonicalize()?;
        canonical
            .strip_prefix(&self.workdir)
            .map(Path::to_path_buf)
            .map_err(|_| VcsError::OutsideWorkTree(path.to_path_buf()))
    }
}

impl Workspace for GitWorkspace {
    fn stage(&self, path: &Path) -> Result<()> {
        let relative = self.relative(path)?;
        let mut index = self.repo.index()?;
        index.add_path(&relative)?;
        index.write()?;
        Ok(())
    }

    fn remove(&self, paths: &[PathBuf]) -> Result<()> {
        let mut index = self.repo.index()?;
        for path in paths {
            let relative = self.relative(path)?;
            // Untracked fragments are not in the index; deleting from the
            // work tree is still required
            if index.get_path(&relative, 0).is_some() {
                index.remove_path(&relative)?;
            }
            fs::remove_file(path)?;
        }
        index.write()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo(dir: &Path) -> GitRepository {
        GitRepository::init(dir).unwrap()
    }

    #[test]
    fn stages_a_file() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        fs::write(tmp.path().join("NEWS.rst"), "news\n").unwrap();

        let workspace = GitWorkspace::discover(tmp.path()).unwrap();
        workspace.stage(&tmp.path().join("NEWS.rst")).unwrap();

        let repo = GitRepository::open(tmp.path()).unwrap();
        let index = repo.index().unwrap();
        assert!(index.get_path(Path::new("NEWS.rst"), 0).is_some());
    }

    #[test]
    fn removes_fragments_from_tree_and_index() {
        let tmp = TempDir::new().unwrap();
        init_repo(tmp.path());
        let fragment = tmp.path().join("1.feature");
        fs::write(&fragment, "change\n").unwrap();

        let workspace = GitWorkspace::discover(tmp.path()).unwrap();
        workspace.stage(&fragment).unwrap();
        workspace.remove(&[fragment.clone()]).unwrap();

        assert!(!fragment.exists());
        let repo = GitRepository::open(tmp.path()).unwrap();
        let index = repo.index().unwrap();
        assert!(index.get_path(Path::new("1.feature"), 0).is_none());
    }

    #[test]
    fn discover_fails_outside_a_repository() {
        let tmp = TempDir::new().unwrap();
        assert!(GitWorkspace::discover(tmp.path()).is_err());
    }
}
