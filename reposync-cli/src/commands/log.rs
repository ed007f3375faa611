//! Log command - list commit ids of the current branch

use clap::Args;
use reposync_core::Config;

use super::open_configured;

/// List short commit ids, newest first
#[derive(Args, Debug)]
pub struct LogArgs {
    /// Remote URL or scp-like locator
    pub url: String,

    /// Show at most this many commits
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl LogArgs {
    /// Execute the log command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let repo = open_configured(&self.url, config)?;
        let commits = repo.commits()?;

        if commits.is_empty() {
            println!("No commits.");
            return Ok(());
        }

        let limit = self.limit.unwrap_or(commits.len());
        for id in commits.iter().take(limit) {
            println!("{}", id);
        }

        Ok(())
    }
}
