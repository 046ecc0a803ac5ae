//! External process execution
//!
//! All remote work is expressed as shell command lines. [`CommandRunner`] is
//! the seam between the orchestration code and the operating system, so the
//! workflows can be driven by a recording runner in tests.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Where a child process' output stream goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSink {
    /// Share the invoking process' stream
    Inherit,
    /// Throw the output away
    Discard,
}

impl OutputSink {
    fn stdio(self) -> Stdio {
        match self {
            OutputSink::Inherit => Stdio::inherit(),
            OutputSink::Discard => Stdio::null(),
        }
    }
}

/// Options for a single command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOptions {
    pub cwd: PathBuf,
    pub stdout: OutputSink,
    pub stderr: OutputSink,
}

impl ExecOptions {
    /// Inherit both output streams
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            stdout: OutputSink::Inherit,
            stderr: OutputSink::Inherit,
        }
    }

    /// Same working directory with both streams discarded
    pub fn quiet(&self) -> Self {
        Self {
            cwd: self.cwd.clone(),
            stdout: OutputSink::Discard,
            stderr: OutputSink::Discard,
        }
    }

    pub fn with_stdout(mut self, sink: OutputSink) -> Self {
        self.stdout = sink;
        self
    }

    pub fn with_stderr(mut self, sink: OutputSink) -> Self {
        self.stderr = sink;
        self
    }
}

/// Runs a shell command line and reports its exit code.
///
/// Implementations return `Err` only when the process could not be run at
/// all; a non-zero exit is a regular `Ok` value for the caller to judge.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, command_line: &str, options: &ExecOptions) -> Result<i32>;
}

/// Runs command lines through `sh -c` on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    async fn run(&self, command_line: &str, options: &ExecOptions) -> Result<i32> {
        debug!("Running: {} (cwd: {})", command_line, options.cwd.display());

        let status = Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .current_dir(&options.cwd)
            .stdout(options.stdout.stdio())
            .stderr(options.stderr.stdio())
            .status()
            .await
            .with_context(|| format!("Failed to spawn `{}`", command_line))?;

        let code = status.code().unwrap_or_else(|| {
            debug!("Process terminated by signal: {}", status);
            1
        });
        debug!("Exit code {} for: {}", code, command_line);
        Ok(code)
    }
}

/// Resolve the working directory for orchestration commands
pub fn resolve_cwd(cwd: Option<&Path>) -> Result<PathBuf> {
    match cwd {
        Some(path) if path.is_absolute() => Ok(path.to_path_buf()),
        Some(path) => Ok(std::env::current_dir()
            .context("Failed to read current directory")?
            .join(path)),
        None => std::env::current_dir().context("Failed to read current directory"),
    }
}
