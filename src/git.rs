use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command as GitCommand;

/// Run a git command in `repo` and capture stdout as String.
pub fn git_output(repo: &Path, args: &[&str]) -> Result<String> {
    let output = GitCommand::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .with_context(|| format!("failed to run git {:?}", args))?;

    if !output.status.success() {
        return Err(anyhow!(
            "git {:?} exited with status {:?}",
            args,
            output.status.code()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Get the current branch name.
pub fn current_branch(repo: &Path) -> Result<String> {
    let name = git_output(repo, &["rev-parse", "--abbrev-ref", "HEAD"])?
        .trim()
        .to_string();
    Ok(name)
}

/// Full message of the commit at HEAD.
pub fn head_message(repo: &Path) -> Result<String> {
    let message = git_output(repo, &["log", "-1", "--pretty=format:%B"])?
        .trim_end()
        .to_string();
    Ok(message)
}

/// Full message of HEAD's first parent, or None for a root commit.
pub fn parent_message(repo: &Path) -> Result<Option<String>> {
    let revs = git_output(repo, &["rev-list", "--parents", "-n", "1", "HEAD"])?;
    if revs.split_whitespace().count() < 2 {
        return Ok(None);
    }

    let message = git_output(repo, &["log", "-1", "--pretty=format:%B", "HEAD^"])?
        .trim_end()
        .to_string();
    Ok(Some(message))
}

/// True when nothing is modified or staged in the working tree.
pub fn working_tree_clean(repo: &Path) -> Result<bool> {
    let status = git_output(repo, &["status", "--porcelain"])?;
    Ok(status.trim().is_empty())
}

/// Get the path to the Git directory (e.g. .git)
pub fn git_dir(repo: &Path) -> Result<PathBuf> {
    let dir = PathBuf::from(git_output(repo, &["rev-parse", "--git-dir"])?.trim());
    if dir.is_absolute() {
        Ok(dir)
    } else {
        Ok(repo.join(dir))
    }
}

/// Write the rendered submission message where arc can read it.
pub fn write_message_file(repo: &Path, message: &str) -> Result<PathBuf> {
    let path = git_dir(repo)?.join("REVIEWBOT_EDITMSG");
    fs::write(&path, message)
        .with_context(|| format!("failed to write submission message to {:?}", path))?;
    Ok(path)
}

/// Replace HEAD's message, leaving tree and author untouched.
pub fn amend_head_message(repo: &Path, message: &str) -> Result<()> {
    let path = git_dir(repo)?.join("COMMIT_EDITMSG");
    fs::write(&path, message)
        .with_context(|| format!("failed to write commit message to {:?}", path))?;

    let file = path
        .to_str()
        .ok_or_else(|| anyhow!("git directory path is not valid UTF-8: {:?}", path))?;
    git_output(repo, &["commit", "--amend", "--file", file])?;
    Ok(())
}
