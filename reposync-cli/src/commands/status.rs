//! Status command - show the state of a checkout

use clap::Args;
use reposync_core::Config;
use serde::Serialize;

use super::{open_configured, short_id};

/// Show branch, revision and history of a checkout
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Remote URL or scp-like locator
    pub url: String,

    /// Print status as JSON
    #[arg(long)]
    pub json: bool,

    /// Number of recent commits to show
    #[arg(short = 'n', long, default_value_t = 5)]
    pub recent: usize,
}

/// Snapshot of a checkout's state
#[derive(Debug, Serialize)]
struct RepoStatus {
    name: String,
    path: String,
    remote: String,
    deployment_path: String,
    branch: String,
    commit: String,
    commit_count: usize,
    recent_commits: Vec<String>,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let repo = open_configured(&self.url, config)?;

        let commits = repo.commits()?;
        let status = RepoStatus {
            name: repo.name().to_string(),
            path: repo.path().to_string(),
            remote: repo.remote().to_string(),
            deployment_path: repo.deployment_path().display().to_string(),
            branch: repo.branch()?,
            commit: repo.commit_id()?,
            commit_count: commits.len(),
            recent_commits: commits.into_iter().take(self.recent).collect(),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&status)?);
            return Ok(());
        }

        println!("Repository: {}", status.name);
        if verbose {
            println!("  Remote:  {}", status.remote);
            println!("  Repo:    {}", status.path);
        }
        println!("  Path:    {}", status.deployment_path);
        println!("  Branch:  {}", status.branch);
        println!("  Commit:  {} ({})", short_id(&status.commit), status.commit);
        println!("  Commits: {}", status.commit_count);

        if !status.recent_commits.is_empty() {
            println!("  Recent:");
            for id in &status.recent_commits {
                println!("    {}", id);
            }
        }

        Ok(())
    }
}
