//! Package installer port (the host's Python package manager).

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::PackageSet;

/// Errors from one package manager invocation.
///
/// The installer never decides fatality or retries; the orchestrator does.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The package manager ran and reported failure.
    #[error("package manager exited with {}", describe_exit(.code))]
    ManagerFailed { code: Option<i32> },

    /// The requirements manifest does not exist. Checked before invoking pip.
    #[error("requirements manifest not found: {}", .path.display())]
    ManifestMissing { path: PathBuf },

    /// The bounded wait expired and the child was killed.
    #[error("package manager timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },

    /// The interpreter could not be started.
    #[error("failed to start {program}: {reason}")]
    Launch { program: String, reason: String },
}

pub(crate) fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(
        || "no exit status (terminated by signal)".to_string(),
        |c| format!("status {c}"),
    )
}

/// Port for installing Python packages.
#[async_trait]
pub trait PackageInstallerPort: Send + Sync {
    /// Install explicit specifiers, optionally from a non-default index.
    async fn install(&self, packages: &PackageSet) -> Result<(), InstallError>;

    /// Install everything listed in a requirements manifest.
    async fn install_from_manifest(&self, manifest: &Path) -> Result<(), InstallError>;
}
