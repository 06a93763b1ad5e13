//! External process invocations.
//!
//! A flow is planned as a list of [`Invocation`] values before anything is
//! spawned, so planning stays inert and testable; spawning is confined to
//! [`Invocation::run`].

use crate::error::ToolError;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One external process to run: program, arguments, working directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    /// The program name or path.
    pub program: String,
    /// Arguments passed verbatim (no shell splitting).
    pub args: Vec<String>,
    /// Working directory the process starts in.
    pub cwd: PathBuf,
}

impl Invocation {
    /// Creates an invocation with no arguments.
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    /// Wraps a shell command string as `sh -c <command>`.
    ///
    /// Used for manifest pre/post commands, which are handed to the shell
    /// verbatim.
    pub fn shell(command: &str, cwd: &Path) -> Self {
        Invocation::new("sh", cwd).arg("-c").arg(command)
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Renders the invocation as a single display line, quoting arguments
    /// that contain whitespace or quotes.
    pub fn command_line(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            if arg.contains(char::is_whitespace) || arg.contains('\'') || arg.contains('"') {
                out.push('\'');
                out.push_str(&arg.replace('\'', "'\\''"));
                out.push('\'');
            } else {
                out.push_str(arg);
            }
        }
        out
    }

    /// Spawns the process, inheriting stdio, and waits for it to exit.
    ///
    /// A nonzero exit becomes [`ToolError::StepFailed`] carrying the
    /// rendered command line.
    pub fn run(&self) -> Result<(), ToolError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .status()
            .map_err(|e| ToolError::Io {
                program: self.program.clone(),
                source: e,
            })?;
        if !status.success() {
            return Err(ToolError::StepFailed {
                command: self.command_line(),
                status,
            });
        }
        Ok(())
    }
}
