//! Command presence and version extraction.

use std::time::Duration;

use tracing::debug;

use crate::command::{CommandSpec, OutputMode};

/// Result of running `cmd <version_flag>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCheck {
    /// The command ran and exited 0.
    pub present: bool,
    /// First non-empty output line, when there was one.
    pub version: Option<String>,
}

/// Run `cmd <version_flag>`. Presence is the exit status alone.
///
/// Not found, non-zero exit and timeout all report absent.
pub async fn check_command(cmd: &str, version_flag: &str, timeout: Duration) -> ToolCheck {
    let output = match CommandSpec::new(cmd)
        .arg(version_flag)
        .output(OutputMode::Capture)
        .timeout(timeout)
        .run()
        .await
    {
        Ok(output) => output,
        Err(e) => {
            debug!(cmd, error = %e, "version check failed");
            return ToolCheck::default();
        }
    };

    if !output.success {
        debug!(cmd, code = ?output.code, "version check exited non-zero");
        return ToolCheck::default();
    }

    // Some tools print their banner on stderr
    let text = if output.stdout.trim().is_empty() {
        output.stderr
    } else {
        output.stdout
    };

    ToolCheck {
        present: true,
        version: text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string),
    }
}
