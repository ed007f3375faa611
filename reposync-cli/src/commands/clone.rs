//! Clone command - make sure a checkout exists

use clap::Args;
use reposync_core::Config;

use super::open_configured;

/// Clone a repository unless it is already checked out
#[derive(Args, Debug)]
pub struct CloneArgs {
    /// Remote URL or scp-like locator
    pub url: String,
}

impl CloneArgs {
    /// Execute the clone command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let repo = open_configured(&self.url, config)?;

        if repo.was_cloned() {
            println!("Cloned: {}", repo.name());
        } else {
            println!("Already present: {}", repo.name());
        }
        println!("  Path:   {}", repo.deployment_path().display());

        if verbose {
            println!("  Remote: {}", repo.remote());
            println!("  Repo:   {}", repo.path());
        }

        Ok(())
    }
}
