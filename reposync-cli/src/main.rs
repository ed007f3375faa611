//! Reposync CLI - Command line interface for reposync
//!
//! Keeps local git checkouts in sync with their remotes.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reposync_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{CloneArgs, DivergedArgs, LogArgs, StatusArgs, SyncAllArgs, SyncArgs};

/// Reposync: keep local git checkouts in sync with their remotes
#[derive(Parser, Debug)]
#[command(name = "reposync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to git executable (overrides config and env)
    #[arg(long, global = true, env = "REPOSYNC_GIT_PATH")]
    git_path: Option<String>,

    /// Directory checkouts are placed under (overrides config and env)
    #[arg(short, long, global = true, env = "REPOSYNC_DESTINATION")]
    destination: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Clone a repository unless it is already checked out
    Clone(CloneArgs),

    /// Fetch, checkout and pull a branch
    #[command(visible_alias = "s")]
    Sync(SyncArgs),

    /// Sync every repository listed in the config file
    SyncAll(SyncAllArgs),

    /// Show branch, revision and history of a checkout
    #[command(visible_alias = "st")]
    Status(StatusArgs),

    /// List short commit ids, newest first
    Log(LogArgs),

    /// Check whether two refs have diverged
    Diverged(DivergedArgs),

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.git_path.clone(), cli.destination.clone())?;

    if cli.verbose {
        tracing::info!(
            git_path = %config.git.path,
            destination = ?config.destination,
            repositories = config.repositories.len(),
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            println!("reposync {}", env!("CARGO_PKG_VERSION"));
        }
        Some(Commands::Clone(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Sync(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::SyncAll(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Status(args)) => {
            args.execute(cli.verbose, &config).await?;
        }
        Some(Commands::Log(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Diverged(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            println!("Reposync Configuration");
            println!("======================");
            println!();
            println!("Git Settings:");
            println!("  path: {}", config.git.path);
            println!();
            match config.destination() {
                Ok(dest) => println!("Destination: {}", dest.display()),
                Err(_) => println!("Destination: (not set)"),
            }
            println!();
            if config.repositories.is_empty() {
                println!("Repositories: (none)");
            } else {
                println!("Repositories:");
                for repo in &config.repositories {
                    println!("  {} [{}]", repo.url, repo.branch);
                }
            }
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        None => {
            println!("Reposync - keep local git checkouts in sync with their remotes");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_sync() {
        let cli = Cli::try_parse_from([
            "reposync",
            "--destination",
            "/srv/deploy",
            "sync",
            "git@host:org/proj.git",
            "--branch",
            "release",
        ])
        .unwrap();

        assert_eq!(cli.destination, Some(PathBuf::from("/srv/deploy")));
        match cli.command {
            Some(Commands::Sync(args)) => {
                assert_eq!(args.url, "git@host:org/proj.git");
                assert_eq!(args.branch, "release");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_diverged() {
        let cli = Cli::try_parse_from(["reposync", "diverged", "proj", "main", "origin/main"]).unwrap();
        match cli.command {
            Some(Commands::Diverged(args)) => {
                assert_eq!(args.from, "main");
                assert_eq!(args.to, "origin/main");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
