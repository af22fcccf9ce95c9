//! External tool invocation.
//!
//! Argument lists are assembled up front into a [`ToolCommand`] so they can
//! be inspected without running anything.

use super::error::{ExitStatusText, MediaError};
use std::ffi::{OsStr, OsString};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Longest stderr tail kept in a `ToolFailed` error.
const STDERR_TAIL: usize = 2048;

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as lossy UTF-8, for logging and assertions.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Run to completion, capturing stderr.
    pub fn run(&self) -> Result<(), MediaError> {
        debug!(tool = %self.program, args = ?self.args_lossy(), "Running external tool");

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| MediaError::ToolUnavailable {
                tool: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = tail(stderr.trim(), STDERR_TAIL).to_string();
            warn!(
                tool = %self.program,
                code = ?output.status.code(),
                stderr = %stderr,
                "External tool failed"
            );
            return Err(MediaError::ToolFailed {
                tool: self.program.clone(),
                status: ExitStatusText(output.status.code()),
                stderr,
            });
        }

        Ok(())
    }
}

/// Last `max` bytes of `s`, cut on a char boundary.
fn tail(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut start = s.len() - max;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    &s[start..]
}
