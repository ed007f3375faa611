//! Configuration management for reposync
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (REPOSYNC_*)
//! 3. Config file (~/.config/reposync/config.toml)
//! 4. Default values

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::git::{repo_name, DEFAULT_GIT};
use crate::{Error, Result};

/// Git-related configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitConfig {
    /// Path to the git executable
    pub path: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_GIT.to_string(),
        }
    }
}

fn default_branch() -> String {
    "main".to_string()
}

/// A repository to keep in sync
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepositoryConfig {
    /// Remote locator, URL or scp-like
    pub url: String,

    /// Branch to keep checked out
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Destination root overriding the global one
    pub destination: Option<PathBuf>,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Default destination root for checkouts
    pub destination: Option<PathBuf>,

    /// Git configuration
    pub git: GitConfig,

    /// Repositories synced by `sync-all`
    pub repositories: Vec<RepositoryConfig>,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/reposync/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("reposync").join("config.toml"))
    }

    /// Get the fallback destination root
    ///
    /// Returns `~/.local/share/reposync` on Unix
    pub fn default_destination() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("reposync"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - REPOSYNC_GIT_PATH: Path to git executable
    /// - REPOSYNC_DESTINATION: Destination root for checkouts
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(git_path) = std::env::var("REPOSYNC_GIT_PATH") {
            self.git.path = git_path;
        }

        if let Ok(destination) = std::env::var("REPOSYNC_DESTINATION") {
            self.destination = Some(PathBuf::from(destination));
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, git_path: Option<String>, destination: Option<PathBuf>) -> Self {
        if let Some(path) = git_path {
            self.git.path = path;
        }

        if let Some(dest) = destination {
            self.destination = Some(dest);
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(git_path: Option<String>, destination: Option<PathBuf>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(git_path, destination))
    }

    /// Effective destination root
    pub fn destination(&self) -> Result<PathBuf> {
        self.destination
            .clone()
            .or_else(Self::default_destination)
            .ok_or_else(|| Error::Config("Could not determine destination directory".to_string()))
    }

    /// Destination root for one repository entry
    pub fn repository_destination(&self, repo: &RepositoryConfig) -> Result<PathBuf> {
        match &repo.destination {
            Some(dest) => Ok(dest.clone()),
            None => self.destination(),
        }
    }

    /// Check the repository list before syncing it
    ///
    /// Entries must have a remote, and no two entries may share a deployment
    /// path since they would run against the same checkout concurrently.
    pub fn validate_repositories(&self) -> Result<()> {
        let mut seen: HashMap<PathBuf, &str> = HashMap::new();

        for repo in &self.repositories {
            if repo.url.trim().is_empty() {
                return Err(Error::Config("Repository entry with empty url".to_string()));
            }
            if repo_name(&repo.url).trim().is_empty() {
                return Err(Error::Config(format!(
                    "Cannot derive a repository name from {}",
                    repo.url
                )));
            }

            let path = self.repository_destination(repo)?.join(repo_name(&repo.url));
            if let Some(other) = seen.insert(path.clone(), &repo.url) {
                return Err(Error::Config(format!(
                    "{} and {} share the deployment path {}",
                    other,
                    repo.url,
                    path.display()
                )));
            }
        }

        Ok(())
    }
}
