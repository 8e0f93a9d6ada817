//! Resolution of the repository a submission runs against.

use anyhow::{anyhow, Result};
use std::env;
use std::path::{Path, PathBuf};

/// True when `path` looks like the top of a Git working tree.
///
/// `.git` may be a directory or, for worktrees and submodules, a file.
pub fn probe_repo(path: &Path) -> bool {
    path.join(".git").exists()
}

/// Resolve the repository to operate on.
///
/// An explicit path must itself be a repository root; with no path the
/// search walks up from the current directory.
pub fn find_repo(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => {
            if probe_repo(path) {
                Ok(path.to_path_buf())
            } else {
                Err(anyhow!("no Git repository found at {}", path.display()))
            }
        }
        None => {
            let cwd = env::current_dir()?;
            let mut dir = cwd.as_path();
            loop {
                if probe_repo(dir) {
                    return Ok(dir.to_path_buf());
                }
                match dir.parent() {
                    Some(parent) => dir = parent,
                    None => {
                        return Err(anyhow!("no Git repository found above {}", cwd.display()));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn probe_requires_a_git_entry() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!probe_repo(dir.path()));

        fs::create_dir(dir.path().join(".git")).unwrap();
        assert!(probe_repo(dir.path()));
    }

    #[test]
    fn probe_accepts_a_git_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".git"), "gitdir: ../elsewhere").unwrap();
        assert!(probe_repo(dir.path()));
    }

    #[test]
    fn explicit_path_must_be_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_repo(Some(dir.path())).unwrap_err();
        assert!(err.to_string().contains("no Git repository found at"));

        fs::create_dir(dir.path().join(".git")).unwrap();
        assert_eq!(dir.path(), find_repo(Some(dir.path())).unwrap());
    }
}
