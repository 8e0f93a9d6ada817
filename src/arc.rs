//! Invocation of the external Arcanist binary. Arcanist owns the whole
//! Phabricator conversation; this module only hands it a message file and
//! reads back what it printed.

use anyhow::{anyhow, Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Locate the Arcanist executable.
///
/// `command` may be a path (used directly when it points at a file) or a
/// bare name resolved on the search path.
pub fn locate(command: &str) -> Result<PathBuf> {
    let direct = Path::new(command);
    if direct.is_file() {
        return Ok(direct.to_path_buf());
    }

    which::which(command)
        .with_context(|| format!("could not find `{command}` on the search path"))
}

/// Run `arc diff` for the HEAD commit and return its captured stdout.
///
/// `update` carries the `D<n>` of an existing revision; without it a new
/// revision is created.
pub fn diff(arc: &Path, repo: &Path, message_file: &Path, update: Option<&str>) -> Result<String> {
    let mut cmd = Command::new(arc);
    cmd.current_dir(repo).arg("diff");
    match update {
        Some(revision) => {
            cmd.arg("--update").arg(revision);
        }
        None => {
            cmd.arg("--create");
        }
    }
    cmd.arg("--message-file")
        .arg(message_file)
        .arg("--allow-untracked")
        .arg("HEAD~");

    debug!("running {:?}", cmd);
    let output = cmd
        .output()
        .with_context(|| format!("failed to run {}", arc.display()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!(
            "arc diff exited with status {:?}:\n{}",
            output.status.code(),
            stderr.trim()
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Pull the revision URL out of arc's report.
pub fn revision_url_from_output(output: &str) -> Option<&str> {
    output
        .lines()
        .find_map(|line| line.trim_start().strip_prefix("Revision URI:"))
        .map(str::trim)
        .filter(|url| !url.is_empty())
}
