//! External command execution
//!
//! Every git operation goes through [`CommandRunner`], so the backend can be
//! swapped and tests can simulate tool failures without spawning processes.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::CommandError;

/// Capability to run an external program and capture its standard output
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `workdir`
    ///
    /// Returns the captured standard output on success. A non-zero exit or a
    /// failure to start the program is reported as a [`CommandError`].
    fn execute(&self, program: &str, args: &[&str], workdir: &Path) -> Result<String, CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn execute(&self, program: &str, args: &[&str], workdir: &Path) -> Result<String, CommandError> {
        (**self).execute(program, args, workdir)
    }
}

/// Runs commands as real subprocesses
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn execute(&self, program: &str, args: &[&str], workdir: &Path) -> Result<String, CommandError> {
        debug!(program, ?args, workdir = %workdir.display(), "running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(workdir)
            .stdin(Stdio::null())
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|source| CommandError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CommandError::Exit {
                program: program.to_string(),
                args: args.join(" "),
                code: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemRunner::new()
            .execute("reposync-definitely-not-a-program", &[], dir.path())
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[test]
    fn test_missing_workdir_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = SystemRunner::new()
            .execute("git", &["--version"], &missing)
            .unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = SystemRunner::new()
            .execute("sh", &["-c", "echo hello"], dir.path())
            .unwrap();
        assert_eq!(out, "hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_keeps_code_and_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let err = SystemRunner::new()
            .execute("sh", &["-c", "echo boom >&2; exit 3"], dir.path())
            .unwrap_err();
        match err {
            CommandError::Exit { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
