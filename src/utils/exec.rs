//! External command execution utilities.
//!
//! Provides a Builder-based API for running external commands with stdin
//! piping and filtered stderr logging.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! let output = Cmd::new("/usr/local/bin/pandoc")
//!     .name("pandoc")
//!     .args(["--from", "markdown", "--to", "html5"])
//!     .stdin(body)
//!     .filter(&PANDOC_FILTER)
//!     .run()?;
//! ```

use crate::log;
use regex::Regex;
use std::{
    ffi::{OsStr, OsString},
    io::{self, Write},
    process::{Command, ExitStatus, Output, Stdio},
    sync::OnceLock,
    thread,
};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

/// Failure while running an external command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Failed to spawn `{0}`")]
    Spawn(String, #[source] io::Error),

    #[error("Failed to write stdin to `{0}`")]
    Stdin(String, #[source] io::Error),

    #[error("Failed to wait for `{0}`")]
    Wait(String, #[source] io::Error),

    #[error("Command `{name}` failed with {status}{}", stderr_suffix(.stderr))]
    Failed {
        name: String,
        status: ExitStatus,
        stderr: String,
    },
}

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
///
/// Provides a fluent API for configuring and running external commands.
#[derive(Default)]
pub struct Cmd {
    program: OsString,
    name: Option<String>,
    args: Vec<OsString>,
    stdin_data: Option<Vec<u8>>,
    filter: Option<&'static FilterRule>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Name used in logs and errors instead of the program path.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        for arg in args {
            let arg = arg.as_ref();
            if !arg.is_empty() {
                self.args.push(arg.to_owned());
            }
        }
        self
    }

    /// Set stdin data to pipe to the process.
    pub fn stdin<D: AsRef<[u8]>>(mut self, data: D) -> Self {
        self.stdin_data = Some(data.as_ref().to_vec());
        self
    }

    /// Set output filter for logging.
    pub fn filter(mut self, filter: &'static FilterRule) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Execute the command and return output.
    ///
    /// Blocks until the process exits. Stdin is fed from a scoped thread
    /// while stdout and stderr are drained, so large inputs cannot deadlock
    /// against a child that fills its output pipes first. A non-zero exit
    /// status is an error and takes precedence over a failed stdin write.
    pub fn run(self) -> Result<Output, ExecError> {
        let filter = self.filter.unwrap_or(&EMPTY_FILTER);
        let name = self.display_name();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if self.stdin_data.is_some() {
            cmd.stdin(Stdio::piped());
        } else {
            cmd.stdin(Stdio::null());
        }

        let mut child = cmd
            .spawn()
            .map_err(|err| ExecError::Spawn(name.clone(), err))?;

        let stdin = child.stdin.take();
        let data = self.stdin_data;
        let (output, written) = thread::scope(|scope| {
            // The handle is dropped when the writer returns, so the child sees EOF
            let writer = scope.spawn(move || match (data, stdin) {
                (Some(data), Some(mut stdin)) => stdin.write_all(&data),
                _ => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
            (output, written)
        });

        let output = output.map_err(|err| ExecError::Wait(name.clone(), err))?;
        log_output(&name, &output, filter)?;

        match written {
            // The child may exit successfully without reading all of its input
            Err(err) if err.kind() != io::ErrorKind::BrokenPipe => {
                Err(ExecError::Stdin(name, err))
            }
            _ => Ok(output),
        }
    }

    /// Name for logs and error messages.
    fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.program.to_string_lossy().to_string())
    }
}

// ============================================================================
// Output Filtering
// ============================================================================

/// Filter rule for command output logging.
///
/// Used to reduce noise by skipping known warnings or irrelevant messages.
pub struct FilterRule {
    /// Prefixes to skip when logging output.
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    /// Create a new filter rule.
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    /// Check if a line should be skipped.
    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Log output lines that pass the filter.
    pub fn log(&self, name: &str, output: &str) {
        let lines: Vec<_> = output
            .lines()
            .filter(|line| {
                let plain = strip_ansi(line);
                let trimmed = plain.trim();
                !trimmed.is_empty() && !self.should_skip(trimmed)
            })
            .collect();

        if !lines.is_empty() {
            log!(name; "{}", lines.join("\n"));
        }
    }
}

/// Empty filter (no skipping).
pub const EMPTY_FILTER: FilterRule = FilterRule::new(&[]);

// ============================================================================
// Helpers
// ============================================================================

/// Strip ANSI escape codes from string.
fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid ANSI regex"));
    re.replace_all(s, "")
}

/// Log command stderr, returning error on failure.
fn log_output(name: &str, output: &Output, filter: &'static FilterRule) -> Result<(), ExecError> {
    if !output.status.success() {
        return Err(ExecError::Failed {
            name: name.to_string(),
            status: output.status,
            stderr: error_output(output, filter),
        });
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    filter.log(name, stderr.trim());
    Ok(())
}

/// Stderr of a failed command, without ANSI codes and filtered prefixes.
fn error_output(output: &Output, filter: &'static FilterRule) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = strip_ansi(&stderr);

    filter
        .skip_prefixes
        .iter()
        .filter(|p| !p.is_empty())
        .fold(stderr.trim(), |s, p| s.trim_start_matches(p).trim_start())
        .to_string()
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{stderr}")
    }
}

// ============================================================================
// Tests
// ============================================================================
