//! Git repository operations

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{debug, instrument};

use harpack_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepositoryNotFound(path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepository(start_path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current branch name, or `None` for a detached or unborn HEAD
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            let branch = head.shorthand().map(|s| s.to_string());
            debug!(branch = ?branch, "resolved current branch");
            Ok(branch)
        } else {
            // Detached HEAD
            Ok(None)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    pub(crate) fn commit_file(repo: &Repository, name: &str) -> git2::Oid {
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let workdir = repo.workdir().unwrap();

        std::fs::write(workdir.join(name), "content").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let parent = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<_> = parent.iter().collect();

        repo.commit(Some("HEAD"), &sig, &sig, "commit", &tree, &parents)
            .unwrap()
    }

    #[test]
    fn test_open_repo() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.path(), temp.path());
    }

    #[test]
    fn test_discover_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();

        let subdir = temp.path().join("sub").join("dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let repo = GitRepo::discover(&subdir).unwrap();
        // Canonicalize both paths to handle macOS /var -> /private/var symlink
        let repo_path = repo.path().canonicalize().unwrap();
        let temp_path = temp.path().canonicalize().unwrap();
        assert_eq!(repo_path, temp_path);
    }

    #[test]
    fn test_not_a_repo() {
        let temp = TempDir::new().unwrap();
        let result = GitRepo::open(temp.path());
        assert!(matches!(result, Err(GitError::RepositoryNotFound(_))));
    }

    #[test]
    fn test_current_branch_unborn_head() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.current_branch().unwrap(), None);
    }

    #[test]
    fn test_current_branch_named() {
        let temp = TempDir::new().unwrap();
        let raw = Repository::init(temp.path()).unwrap();
        let oid = commit_file(&raw, "file.txt");

        let commit = raw.find_commit(oid).unwrap();
        raw.branch("feature", &commit, false).unwrap();
        raw.set_head("refs/heads/feature").unwrap();

        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.current_branch().unwrap(), Some("feature".to_string()));
    }

    #[test]
    fn test_current_branch_detached_head() {
        let temp = TempDir::new().unwrap();
        let raw = Repository::init(temp.path()).unwrap();
        let oid = commit_file(&raw, "file.txt");
        raw.set_head_detached(oid).unwrap();

        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.current_branch().unwrap(), None);
    }
}
