//! External command execution
//!
//! The pipeline drives the native build and platform packaging tools
//! through the narrow [`CommandRunner`] seam so tests can substitute a
//! recording double for real process spawns.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use harpack_core::error::PipelineError;

use crate::Result;

/// A fixed external command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Program to invoke
    pub program: String,

    /// Arguments, in order
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command spec
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Render the full command line for messages
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Executes external commands on behalf of the pipeline.
///
/// Invocations are synchronous and block until the process terminates.
/// A non-zero exit is a hard failure; the caller must abort the
/// remaining pipeline steps.
pub trait CommandRunner {
    /// Run a command in the given working directory
    fn run(&self, spec: &CommandSpec, cwd: &Path) -> Result<()>;
}

/// Runs commands as real child processes with inherited stdio, so the
/// tools' own output reaches the invoking terminal unmodified.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    #[instrument(skip(self, spec), fields(command = %spec.display(), cwd = %cwd.display()))]
    fn run(&self, spec: &CommandSpec, cwd: &Path) -> Result<()> {
        info!("running external command");
        println!("Executing: {} (from {})", spec.display(), cwd.display());

        let status = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| PipelineError::CommandSpawnFailed {
                command: spec.display(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(PipelineError::CommandFailed {
                command: spec.display(),
                code: status.code().unwrap_or(-1),
            });
        }

        Ok(())
    }
}
