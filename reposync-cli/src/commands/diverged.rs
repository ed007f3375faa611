//! Diverged command - compare two refs of a checkout

use clap::Args;
use reposync_core::Config;

use super::open_configured;

/// Check whether two refs have diverged
#[derive(Args, Debug)]
pub struct DivergedArgs {
    /// Remote URL or scp-like locator
    pub url: String,

    /// Base ref
    pub from: String,

    /// Ref compared against the base
    pub to: String,
}

impl DivergedArgs {
    /// Execute the diverged command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let repo = open_configured(&self.url, config)?;

        match repo.diverged(&self.from, &self.to) {
            Ok(true) => println!("{}...{}: diverged", self.from, self.to),
            Ok(false) => println!("{}...{}: up to date", self.from, self.to),
            Err(e) => {
                println!("{}...{}: diverged (assumed, query failed)", self.from, self.to);
                return Err(e.into());
            }
        }

        Ok(())
    }
}
