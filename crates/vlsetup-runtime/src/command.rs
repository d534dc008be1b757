//! Bounded subprocess execution.
//!
//! Every external program vlsetup runs goes through [`CommandSpec::run`]:
//! an explicit argument list, an optional environment overlay, and a timeout
//! after which the child is killed.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

/// Where the child's stdout and stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Straight to the operator's terminal.
    Inherit,
    /// Both streams captured into [`CommandOutput`].
    Capture,
    /// Stdout to the terminal, stderr captured.
    CaptureStderr,
}

/// Errors from running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("'{program}' was not found")]
    NotFound { program: String },

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' timed out after {}s", .after.as_secs())]
    Timeout { program: String, after: Duration },

    #[error("failed waiting for '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Exit status plus whatever output was captured.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// A program, its arguments and how to run it.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    program: OsString,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
    timeout: Duration,
    output: OutputMode,
}

impl CommandSpec {
    /// Defaults: no arguments, inherited output, 60 second timeout.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
            envs: Vec::new(),
            timeout: Duration::from_secs(60),
            output: OutputMode::Inherit,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Add a variable on top of the inherited environment.
    #[must_use]
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    pub fn program(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    pub fn env_overlay(&self) -> &[(OsString, OsString)] {
        &self.envs
    }

    /// Run to completion, killing the child if the timeout expires.
    ///
    /// A non-zero exit is not an error here; check [`CommandOutput::success`].
    pub async fn run(&self) -> Result<CommandOutput, CommandError> {
        let program = self.program();
        let (stdout, stderr) = match self.output {
            OutputMode::Inherit => (Stdio::inherit(), Stdio::inherit()),
            OutputMode::Capture => (Stdio::piped(), Stdio::piped()),
            OutputMode::CaptureStderr => (Stdio::inherit(), Stdio::piped()),
        };

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .kill_on_drop(true);

        debug!(command = %self, timeout_secs = self.timeout.as_secs(), "running command");

        let child = cmd.spawn().map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                CommandError::NotFound {
                    program: program.clone(),
                }
            } else {
                CommandError::Spawn {
                    program: program.clone(),
                    source,
                }
            }
        })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| CommandError::Timeout {
                program: program.clone(),
                after: self.timeout,
            })?
            .map_err(|source| CommandError::Io {
                program: program.clone(),
                source,
            })?;

        debug!(command = %self, code = ?output.status.code(), "command finished");

        Ok(CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_args() {
        let spec = CommandSpec::new("python3").args(["-m", "pip", "install", "rich"]);
        assert_eq!(spec.to_string(), "python3 -m pip install rich");
    }

    #[tokio::test]
    async fn test_missing_program_is_not_found() {
        let err = CommandSpec::new("definitely_not_a_real_command_12345")
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captures_output_and_exit_code() {
        let output = CommandSpec::new("sh")
            .args(["-c", "echo out; echo err >&2; exit 3"])
            .output(OutputMode::Capture)
            .run()
            .await
            .unwrap();

        assert!(!output.success);
        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_env_overlay_is_visible_to_child() {
        let output = CommandSpec::new("sh")
            .args(["-c", "printf %s \"$VLSETUP_TEST_VALUE\""])
            .env("VLSETUP_TEST_VALUE", "utf-8")
            .output(OutputMode::Capture)
            .run()
            .await
            .unwrap();

        assert_eq!(output.stdout, "utf-8");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_kills_child() {
        let started = std::time::Instant::now();
        let err = CommandSpec::new("sleep")
            .arg("30")
            .timeout(Duration::from_millis(200))
            .run()
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }
}
