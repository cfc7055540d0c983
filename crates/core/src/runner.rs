//! Subprocess execution for `s` commands.
//!
//! [`CommandRunner`] is the seam between command flows and real processes:
//! [`SystemRunner`] spawns them, test doubles return canned results.

use std::process::{Command, Stdio};

use anyhow::{Context, Result};

use crate::command::ToolCommand;

/// Exit status of a finished command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for RunStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit status {}", code),
            None => f.write_str("terminated by signal"),
        }
    }
}

/// Captured result of a command run with piped output
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: RunStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Runs `s` commands
pub trait CommandRunner {
    /// Run a command with stdout and stderr captured.
    fn output(&self, command: &ToolCommand) -> Result<CommandOutput>;

    /// Run a command with inherited stdio (interactive pass-through).
    /// No timeout: a command like `logs --tail` runs until the user stops it.
    fn status(&self, command: &ToolCommand) -> Result<RunStatus>;
}

/// Production `CommandRunner` backed by `std::process`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn output(&self, command: &ToolCommand) -> Result<CommandOutput> {
        let output = Command::new(&command.program)
            .args(command.build())
            .stdin(Stdio::null())
            .output()
            .with_context(|| format!("failed to spawn {}", command.program))?;

        Ok(CommandOutput {
            status: output.status.into(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn status(&self, command: &ToolCommand) -> Result<RunStatus> {
        let status = Command::new(&command.program)
            .args(command.build())
            .status()
            .with_context(|| format!("failed to spawn {}", command.program))?;
        Ok(status.into())
    }
}
