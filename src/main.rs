mod arc;
mod arcconfig;
mod cli_args;
mod config;
mod git;
mod logging;
mod message;
mod prompt;
mod repo;

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::Colorize;
use log::{info, warn};

use crate::cli_args::Cli;
use crate::config::Config;
use crate::message::RevisionFields;
use crate::prompt::{Selection, UserAbort};

fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    if let Err(err) = run(&cli) {
        if err.is::<UserAbort>() {
            std::process::exit(130);
        }
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}

/// Submit the HEAD commit of the resolved repository as a review request.
fn run(cli: &Cli) -> Result<()> {
    let cfg = Config::from_sources(cli);
    let repo = repo::find_repo(cli.path.as_deref())?;
    let arc_bin = arc::locate(&cfg.arc_command)?;

    match arcconfig::phabricator_uri(&repo)? {
        Some(uri) => info!("submitting to {uri}"),
        None => warn!("no .arcconfig or ~/.arcrc found; arc will pick the instance itself"),
    }

    if !git::working_tree_clean(&repo)? {
        warn!("working tree has uncommitted changes; they will not be part of the revision");
    }

    let commit = git::head_message(&repo)?;
    let existing_url = message::revision_url(&commit);
    let stripped = message::strip_revision_trailer(&commit);
    let (title, summary) = message::split_title(&stripped);

    let bug_id = cli.bug.or_else(|| message::find_bug_id(title));
    let reviewers = cli
        .reviewers
        .clone()
        .or_else(|| {
            let found = message::find_reviewers(title);
            if found.is_empty() {
                None
            } else {
                Some(found.join(", "))
            }
        })
        .or_else(|| cfg.default_reviewers.clone());

    // A trailer on the parent commit chains this revision onto it.
    let depends_on = match git::parent_message(&repo)? {
        Some(parent) => message::revision_url(&parent)
            .and_then(message::revision_id)
            .map(|id| format!("Depends on {id}")),
        None => None,
    };

    println!();
    println!("{}", "Submitting HEAD as a review request".bold());
    println!("  Commit:    {title}");
    println!("  Branch:    {}", git::current_branch(&repo)?);
    println!("  Reviewers: {}", reviewers.as_deref().unwrap_or("(none)"));
    match bug_id {
        Some(bug) => println!("  Bug:       {bug}"),
        None => println!("  Bug:       (none)"),
    }
    if let Some(depends_on) = &depends_on {
        println!("  Chain:     {depends_on}");
    }
    if let Some(url) = existing_url {
        println!("  Updates:   {url}");
    }
    println!();

    if !cli.yes {
        match prompt::prompt("Submit this commit", &["Yes", "No"])? {
            Selection::Choice(choice) if choice == "Yes" => {}
            Selection::Choice(_) => {
                println!("Submission cancelled.");
                return Ok(());
            }
            Selection::Abort => return Err(UserAbort.into()),
        }
    }

    let fields = RevisionFields {
        title: Some(title.to_string()),
        body: Some(summary.to_string()),
        reviewers,
        bug_id,
        depends_on,
    };
    let message_file = git::write_message_file(&repo, &message::arc_message(&fields))?;

    let update = existing_url.and_then(message::revision_id);
    let output = arc::diff(&arc_bin, &repo, &message_file, update)?;
    print!("{output}");

    let url = arc::revision_url_from_output(&output)
        .ok_or_else(|| anyhow!("arc did not report a revision URI"))?;

    if cli.no_amend {
        info!("leaving the local commit untouched (--no-amend)");
    } else {
        let amended = message::amend_revision_url(&commit, url);
        if amended != commit {
            git::amend_head_message(&repo, &amended)?;
        }
    }

    println!("{} {url}", "Review request submitted:".green().bold());
    Ok(())
}
