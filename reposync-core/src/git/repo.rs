//! Managed local checkout of a remote repository

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::remote::{repo_name, repo_path};
use super::runner::{CommandRunner, SystemRunner};
use crate::error::CommandError;
use crate::{Error, Result};

/// Default program used for git commands
pub const DEFAULT_GIT: &str = "git";

/// A local checkout bound to a remote
///
/// The deployment path is computed once at construction and every operation
/// runs the external tool inside it. Nothing about the checkout is cached:
/// each query reflects the live on-disk state.
///
/// A handle is not meant to be used concurrently; serialize operations per
/// deployment path.
pub struct Repo<R = SystemRunner> {
    /// Remote locator as supplied by the caller
    remote: String,
    /// Directory the checkout is placed under
    destination: PathBuf,
    /// `destination` joined with the repository name
    deployment_path: PathBuf,
    /// Program invoked for git commands
    git_program: String,
    runner: R,
    /// Whether construction ran the clone
    cloned: bool,
}

impl<R> fmt::Debug for Repo<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repo")
            .field("remote", &self.remote)
            .field("deployment_path", &self.deployment_path)
            .field("git_program", &self.git_program)
            .finish_non_exhaustive()
    }
}

impl Repo<SystemRunner> {
    /// Clone `remote` under `destination` unless a checkout is already there
    ///
    /// Uses the `git` found on `PATH`.
    pub fn clone_if_absent(remote: impl Into<String>, destination: impl AsRef<Path>) -> Result<Self> {
        Self::clone_if_absent_with(remote, destination, DEFAULT_GIT, SystemRunner::new())
    }
}

impl<R: CommandRunner> Repo<R> {
    /// Clone `remote` under `destination` using a custom git program and runner
    ///
    /// If anything already exists at the deployment path the clone is skipped
    /// without checking what it is. On clone failure no handle is returned.
    pub fn clone_if_absent_with(
        remote: impl Into<String>,
        destination: impl AsRef<Path>,
        git: impl Into<String>,
        runner: R,
    ) -> Result<Self> {
        let remote = remote.into();
        if remote.trim().is_empty() {
            return Err(Error::Config("remote must not be empty".to_string()));
        }
        if repo_name(&remote).trim().is_empty() {
            return Err(Error::Config(format!(
                "cannot derive a repository name from remote {}",
                remote
            )));
        }

        let destination = destination.as_ref().to_path_buf();
        let deployment_path = destination.join(repo_name(&remote));

        let mut repo = Self {
            remote,
            destination,
            deployment_path,
            git_program: git.into(),
            runner,
            cloned: false,
        };

        repo.cloned = repo.clone_repo()?;
        Ok(repo)
    }

    /// Returns whether a clone was actually performed
    fn clone_repo(&self) -> Result<bool> {
        if self.exists() {
            debug!(
                repo = self.name(),
                path = %self.deployment_path.display(),
                "checkout already present, skipping clone"
            );
            return Ok(false);
        }

        info!(
            repo = self.name(),
            remote = %self.remote,
            destination = %self.destination.display(),
            "cloning repository"
        );

        self.runner
            .execute(&self.git_program, &["clone", &self.remote], &self.destination)
            .map_err(|source| Error::CloneFailed {
                repo: self.name().to_string(),
                source,
            })?;

        Ok(true)
    }

    /// Run git inside the deployment path
    fn git(&self, args: &[&str]) -> std::result::Result<String, CommandError> {
        self.runner.execute(&self.git_program, args, &self.deployment_path)
    }

    /// Remote locator as given at construction
    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Directory the checkout is placed under
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Full path to the local checkout
    pub fn deployment_path(&self) -> &Path {
        &self.deployment_path
    }

    /// Whether constructing this handle cloned the remote
    ///
    /// `false` when a checkout was already present at the deployment path.
    pub fn was_cloned(&self) -> bool {
        self.cloned
    }

    /// Repository short name, e.g. `proj` for `git@host:org/proj.git`
    pub fn name(&self) -> &str {
        repo_name(&self.remote)
    }

    /// Repository path for display, e.g. `org/proj` for `git@host:org/proj.git`
    pub fn path(&self) -> &str {
        repo_path(&self.remote)
    }

    /// Whether anything exists at the deployment path
    ///
    /// Any stat failure counts as absent.
    pub fn exists(&self) -> bool {
        self.deployment_path.exists()
    }

    /// Fetch from the remote
    pub fn fetch(&self) -> Result<()> {
        self.git(&["fetch"]).map_err(|source| Error::FetchFailed {
            repo: self.name().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Check out `branch`
    pub fn checkout(&self, branch: &str) -> Result<()> {
        self.git(&["checkout", branch])
            .map_err(|source| Error::CheckoutFailed {
                repo: self.name().to_string(),
                branch: branch.to_string(),
                source,
            })?;
        Ok(())
    }

    /// Pull the current branch from the remote
    pub fn pull(&self) -> Result<()> {
        self.git(&["pull"]).map_err(|source| Error::PullFailed {
            repo: self.name().to_string(),
            source,
        })?;
        Ok(())
    }

    /// Bring the checkout up to date with `branch` on the remote
    ///
    /// Runs fetch, checkout and pull in that order and stops at the first
    /// failing step, returning that step's error. Nothing is retried or rolled
    /// back.
    pub fn sync(&self, branch: &str) -> Result<()> {
        info!(repo = self.name(), branch, "syncing repository");

        self.fetch()?;
        debug!(repo = self.name(), "fetched");

        self.checkout(branch)?;
        debug!(repo = self.name(), branch, "checked out");

        self.pull()?;
        info!(repo = self.name(), branch, "repository up to date");

        Ok(())
    }

    /// Current symbolic branch name
    ///
    /// A detached checkout reports `HEAD`, as git does.
    pub fn branch(&self) -> Result<String> {
        let output = self
            .git(&["rev-parse", "--abbrev-ref", "HEAD"])
            .map_err(|source| Error::BranchQueryFailed {
                repo: self.name().to_string(),
                source,
            })?;
        Ok(output.trim().to_string())
    }

    /// Full id of the checked out commit
    pub fn commit_id(&self) -> Result<String> {
        let output = self
            .git(&["rev-parse", "HEAD"])
            .map_err(|source| Error::RevisionQueryFailed {
                repo: self.name().to_string(),
                source,
            })?;
        Ok(output.trim().to_string())
    }

    /// Short ids of the current branch's history, newest first
    ///
    /// Empty log output gives an empty list.
    pub fn commits(&self) -> Result<Vec<String>> {
        let output = self
            .git(&["log", "--pretty=format:%h"])
            .map_err(|source| Error::HistoryQueryFailed {
                repo: self.name().to_string(),
                source,
            })?;

        Ok(output
            .lines()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Whether `from...to` has any diff
    ///
    /// On failure returns [`Error::DivergenceQueryFailed`]; the refs must then
    /// be treated as diverged. [`Repo::has_diverged`] applies that default.
    pub fn diverged(&self, from: &str, to: &str) -> Result<bool> {
        let range = format!("{}...{}", from, to);
        let output = self
            .git(&["diff", &range])
            .map_err(|source| Error::DivergenceQueryFailed {
                repo: self.name().to_string(),
                from: from.to_string(),
                to: to.to_string(),
                source,
            })?;
        Ok(!output.is_empty())
    }

    /// Like [`Repo::diverged`] but answers `true` when the query fails
    pub fn has_diverged(&self, from: &str, to: &str) -> bool {
        match self.diverged(from, to) {
            Ok(diverged) => diverged,
            Err(e) => {
                warn!(repo = self.name(), error = %e, "divergence unknown, assuming diverged");
                true
            }
        }
    }
}
