//! CLI command implementations

pub mod clone;
pub mod diverged;
pub mod log;
pub mod status;
pub mod sync;

pub use clone::CloneArgs;
pub use diverged::DivergedArgs;
pub use log::LogArgs;
pub use status::StatusArgs;
pub use sync::{SyncAllArgs, SyncArgs};

use std::path::Path;

use anyhow::Context;
use reposync_core::{Config, Repo};

/// Open the checkout of `url` under `destination`, cloning it if needed
///
/// The destination root is created when missing.
pub fn open_repo(url: &str, destination: &Path, config: &Config) -> anyhow::Result<Repo> {
    std::fs::create_dir_all(destination)
        .with_context(|| format!("Failed to create destination {}", destination.display()))?;

    let repo = Repo::clone_if_absent_with(
        url,
        destination,
        config.git.path.clone(),
        reposync_core::SystemRunner::new(),
    )?;
    Ok(repo)
}

/// Open the checkout of `url` under the configured destination
pub fn open_configured(url: &str, config: &Config) -> anyhow::Result<Repo> {
    let destination = config.destination()?;
    open_repo(url, &destination, config)
}

/// Shorten a commit id for display to its first eight characters
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
