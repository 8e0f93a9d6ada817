//! Lookup of fields in Arcanist's JSON configuration files.

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Walk `keys` into the first candidate file that resolves the whole path.
///
/// Candidates are tried in order. A missing file, a file that is not valid
/// JSON, and a key path that dead-ends all fall through to the next
/// candidate; exhausting the list yields `Ok(None)`. Any read failure other
/// than "does not exist" is propagated.
pub fn read_json_field(files: &[PathBuf], keys: &[&str]) -> Result<Option<Value>> {
    for file in files {
        let data = match fs::read_to_string(file) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => continue,
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", file.display()));
            }
        };

        let Ok(root) = serde_json::from_str::<Value>(&data) else {
            continue;
        };

        let mut value = &root;
        let mut resolved = true;
        for key in keys {
            match value.get(key) {
                Some(next) => value = next,
                None => {
                    resolved = false;
                    break;
                }
            }
        }

        if resolved {
            return Ok(Some(value.clone()));
        }
    }

    Ok(None)
}

/// Locate the Phabricator instance the repository submits to.
///
/// The repository's `.arcconfig` wins over the default host in the per-user
/// `~/.arcrc`.
pub fn phabricator_uri(repo: &Path) -> Result<Option<String>> {
    if let Some(Value::String(uri)) =
        read_json_field(&[repo.join(".arcconfig")], &["phabricator.uri"])?
    {
        return Ok(Some(uri));
    }

    let Some(home) = dirs::home_dir() else {
        return Ok(None);
    };
    match read_json_field(&[home.join(".arcrc")], &["config", "default"])? {
        Some(Value::String(uri)) => Ok(Some(uri)),
        _ => Ok(None),
    }
}
