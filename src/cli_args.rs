use clap::Parser;
use std::path::PathBuf;

/// CLI options
#[derive(Parser, Debug)]
#[command(
    name = "reviewbot",
    version,
    about = "Submit local Git commits to Phabricator as review requests"
)]
pub struct Cli {
    /// Repository to submit from; defaults to the repository containing the
    /// current directory
    pub path: Option<PathBuf>,

    /// Reviewers for the revision (comma separated); overrides any r= in the
    /// commit title
    #[arg(long)]
    pub reviewers: Option<String>,

    /// Bug number for the revision; overrides any 'Bug N' in the commit title
    #[arg(long)]
    pub bug: Option<u32>,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Leave the local commit untouched after submission
    #[arg(long)]
    pub no_amend: bool,

    /// Arcanist executable to invoke (name or path)
    #[arg(long)]
    pub arc: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
