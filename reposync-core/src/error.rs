//! Error types for reposync

use thiserror::Error;

/// Result type alias for reposync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single external command invocation
#[derive(Error, Debug)]
pub enum CommandError {
    /// The program could not be started at all
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran but exited unsuccessfully
    #[error("{program} {args} exited with {}: {stderr}", describe_exit(.code))]
    Exit {
        program: String,
        args: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
        /// Trimmed standard error of the failed command
        stderr: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "signal".to_string(),
    }
}

/// Error type for reposync operations
///
/// Every repository variant names the repository it concerns and keeps the
/// underlying [`CommandError`] as its source.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("could not clone repo {repo}")]
    CloneFailed {
        repo: String,
        #[source]
        source: CommandError,
    },

    #[error("could not fetch repo data for {repo}")]
    FetchFailed {
        repo: String,
        #[source]
        source: CommandError,
    },

    #[error("could not checkout repo branch {repo}:{branch}")]
    CheckoutFailed {
        repo: String,
        branch: String,
        #[source]
        source: CommandError,
    },

    #[error("could not pull repo changes for {repo}")]
    PullFailed {
        repo: String,
        #[source]
        source: CommandError,
    },

    #[error("could not get git branch of {repo}")]
    BranchQueryFailed {
        repo: String,
        #[source]
        source: CommandError,
    },

    #[error("could not get git revision id of {repo}")]
    RevisionQueryFailed {
        repo: String,
        #[source]
        source: CommandError,
    },

    #[error("could not get commit history of {repo}")]
    HistoryQueryFailed {
        repo: String,
        #[source]
        source: CommandError,
    },

    /// A failed divergence query; callers treat the refs as diverged
    #[error("could not compare {from}...{to} in {repo}")]
    DivergenceQueryFailed {
        repo: String,
        from: String,
        to: String,
        #[source]
        source: CommandError,
    },
}

impl Error {
    /// Name of the repository the error concerns, if any
    pub fn repo(&self) -> Option<&str> {
        match self {
            Self::Io(_) | Self::Config(_) => None,
            Self::CloneFailed { repo, .. }
            | Self::FetchFailed { repo, .. }
            | Self::CheckoutFailed { repo, .. }
            | Self::PullFailed { repo, .. }
            | Self::BranchQueryFailed { repo, .. }
            | Self::RevisionQueryFailed { repo, .. }
            | Self::HistoryQueryFailed { repo, .. }
            | Self::DivergenceQueryFailed { repo, .. } => Some(repo),
        }
    }
}
