//! Git operations for reposync
//!
//! This module provides remote identity derivation, the command runner
//! abstraction and the managed checkout handle.

mod remote;
mod repo;
mod runner;

pub use remote::{repo_name, repo_path};
pub use repo::{Repo, DEFAULT_GIT};
pub use runner::{CommandRunner, SystemRunner};
