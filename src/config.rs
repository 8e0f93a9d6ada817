use crate::cli_args::Cli;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Final resolved configuration for reviewbot.
#[derive(Debug, Clone)]
pub struct Config {
    pub arc_command: String,
    pub default_reviewers: Option<String>,
}

impl Config {
    /// Build the final config from CLI flags, environment, TOML file, and defaults.
    ///
    /// Precedence for the arc executable:
    ///   1. CLI flag (`--arc`)
    ///   2. Env var `REVIEWBOT_ARC`
    ///   3. TOML `~/.config/reviewbot.toml`
    ///   4. Hardcoded default ("arc")
    pub fn from_sources(cli: &Cli) -> Self {
        let file_cfg = load_file_config().unwrap_or_default();

        let arc_cli = cli.arc.clone();
        let arc_env = env::var("REVIEWBOT_ARC").ok();

        let arc_command = arc_cli
            .or(arc_env)
            .or(file_cfg.arc)
            .unwrap_or_else(|| "arc".to_string());

        Config {
            arc_command,
            default_reviewers: file_cfg.reviewers,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    /// Arcanist executable to use when not provided via CLI or env.
    pub arc: Option<String>,
    /// Reviewers assigned when a commit title names none.
    pub reviewers: Option<String>,
}

/// Return `~/.config/reviewbot.toml`
fn config_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    Some(home.join(".config").join("reviewbot.toml"))
}

fn load_file_config() -> Option<FileConfig> {
    let path = config_path()?;
    if !path.exists() {
        return None;
    }

    let data = fs::read_to_string(&path).ok()?;
    toml::from_str::<FileConfig>(&data).ok()
}
