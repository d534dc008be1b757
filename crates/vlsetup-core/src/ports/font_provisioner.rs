//! CJK font provisioning port.

use async_trait::async_trait;
use thiserror::Error;

/// Result of a font provisioning attempt that did not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontOutcome {
    /// The distribution's package manager installed the fonts.
    Installed { manager: String },
    /// No known distribution marker was found; nothing was run.
    UnsupportedDistribution,
}

/// A font install command failed.
///
/// Always carries the command the operator can run by hand.
#[derive(Debug, Error)]
#[error("`{command}` failed: {reason}")]
pub struct ProvisionError {
    /// The command that failed, as shown to the operator.
    pub command: String,
    pub reason: String,
    /// Captured standard error, possibly empty.
    pub stderr: String,
    pub manual_command: String,
}

impl ProvisionError {
    pub fn manual_command(&self) -> &str {
        &self.manual_command
    }

    /// Last non-empty stderr line, if any.
    pub fn stderr_tail(&self) -> Option<&str> {
        self.stderr.lines().rev().map(str::trim).find(|l| !l.is_empty())
    }
}

/// Port for installing CJK fonts through the OS package manager.
///
/// Only invoked on Linux.
#[async_trait]
pub trait FontProvisionerPort: Send + Sync {
    async fn provision_fonts(&self) -> Result<FontOutcome, ProvisionError>;
}
