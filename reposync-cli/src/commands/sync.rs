//! Sync commands - bring checkouts up to date with their remotes

use std::path::Path;

use anyhow::Context;
use clap::Args;
use reposync_core::{Config, RepositoryConfig};
use tokio::task::JoinSet;

use super::{open_configured, open_repo, short_id};

/// Fetch, checkout and pull a branch
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Remote URL or scp-like locator
    pub url: String,

    /// Branch to check out
    #[arg(short, long, default_value = "main")]
    pub branch: String,
}

impl SyncArgs {
    /// Execute the sync command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let repo = open_configured(&self.url, config)?;

        if verbose {
            println!("Repository: {}", repo.name());
            println!("  Path: {}", repo.deployment_path().display());
        }

        repo.sync(&self.branch)?;

        let branch = repo.branch()?;
        let commit = repo.commit_id()?;
        println!("{} is at {} ({})", repo.name(), branch, short_id(&commit));

        Ok(())
    }
}

/// Sync every repository listed in the config file
#[derive(Args, Debug)]
pub struct SyncAllArgs {
    /// Only sync repositories whose URL contains this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Outcome of syncing one configured repository
#[derive(Debug)]
struct SyncOutcome {
    url: String,
    branch: String,
    result: anyhow::Result<String>,
}

impl SyncAllArgs {
    /// Execute the sync-all command
    ///
    /// Each repository has its own deployment path, so they are synced in
    /// parallel on the blocking pool.
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        config.validate_repositories()?;

        let selected: Vec<&RepositoryConfig> = config
            .repositories
            .iter()
            .filter(|r| match &self.filter {
                Some(filter) => r.url.contains(filter.as_str()),
                None => true,
            })
            .collect();

        if selected.is_empty() {
            println!("No repositories configured.");
            return Ok(());
        }

        let total = selected.len();
        let mut tasks = JoinSet::new();
        for entry in selected {
            let destination = config.repository_destination(entry)?;
            let entry = entry.clone();
            let config = config.clone();

            tasks.spawn_blocking(move || {
                let result = sync_one(&entry, &destination, &config);
                SyncOutcome {
                    url: entry.url,
                    branch: entry.branch,
                    result,
                }
            });
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next().await {
            outcomes.push(joined.context("sync task panicked")?);
        }

        report(&outcomes, verbose)
    }
}

/// Print one line per repository and fail if any of them failed
fn report(outcomes: &[SyncOutcome], verbose: bool) -> anyhow::Result<()> {
    let mut failed = 0;
    for outcome in outcomes {
        match &outcome.result {
            Ok(commit) => {
                println!("  ok     {} [{}] {}", outcome.url, outcome.branch, short_id(commit));
            }
            Err(e) => {
                failed += 1;
                println!("  failed {} [{}]: {}", outcome.url, outcome.branch, e);
                if verbose {
                    for cause in e.chain().skip(1) {
                        println!("           caused by: {}", cause);
                    }
                }
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} repositories failed to sync", failed, outcomes.len());
    }

    Ok(())
}

fn sync_one(entry: &RepositoryConfig, destination: &Path, config: &Config) -> anyhow::Result<String> {
    let repo = open_repo(&entry.url, destination, config)?;
    repo.sync(&entry.branch)?;
    Ok(repo.commit_id()?)
}
