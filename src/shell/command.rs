//! External command execution.

use crate::error::{MangleError, Result};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output, undecoded.
    pub stdout: Vec<u8>,

    /// Standard error, decoded lossily for diagnostics.
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Decode standard output, rejecting invalid UTF-8.
    pub fn stdout_utf8(&self) -> std::result::Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.stdout)
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Options that capture both output streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }

    /// Add an environment variable.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// Render a program and its arguments for logs and error messages.
pub fn display_command(program: &str, args: &[OsString]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}

/// Execute a program directly, without a shell.
///
/// A non-zero exit is reported through [`CommandResult::success`]; only a
/// failure to start the process is an error.
pub fn execute(program: &str, args: &[OsString], options: &CommandOptions) -> Result<CommandResult> {
    let rendered = display_command(program, args);
    tracing::debug!("Executing: {}", rendered);

    let mut cmd = Command::new(program);
    cmd.args(args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::null());

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|source| {
        tracing::debug!("Failed to start {}: {}", program, source);
        MangleError::CommandFailed {
            command: rendered.clone(),
            source,
        }
    })?;

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).into_owned()
    } else {
        String::new()
    };

    if !output.status.success() {
        tracing::debug!(
            "Command exited with {:?}: {}",
            output.status.code(),
            rendered
        );
    }

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: output.stdout,
        stderr,
        success: output.status.success(),
    })
}
