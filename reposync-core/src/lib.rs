//! Reposync Core - keep local git checkouts in sync with their remotes
//!
//! This crate provides a handle over a local checkout of a remote repository:
//! clone-if-absent bring-up, the fetch/checkout/pull sync workflow, and live
//! queries of branch, revision, history and divergence.

pub mod config;
pub mod error;
pub mod git;

pub use config::{Config, GitConfig, RepositoryConfig};
pub use error::{CommandError, Error, Result};
pub use git::{repo_name, repo_path, CommandRunner, Repo, SystemRunner, DEFAULT_GIT};
