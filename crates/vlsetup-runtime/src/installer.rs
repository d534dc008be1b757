//! `pip` adapter for `PackageInstallerPort`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};
use vlsetup_core::{InstallError, PackageInstallerPort, PackageSet};

use crate::command::{CommandError, CommandSpec, OutputMode};

/// Environment overlay applied to every pip invocation.
pub const PIP_ENV: [(&str, &str); 2] = [("PIP_NO_CACHE_DIR", "1"), ("PYTHONIOENCODING", "utf-8")];

/// Installs packages with `<python> -m pip install`.
///
/// pip's own output goes straight to the terminal.
#[derive(Debug, Clone)]
pub struct PipInstaller {
    python: PathBuf,
    timeout: Duration,
}

impl PipInstaller {
    pub fn new(python: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            python: python.into(),
            timeout,
        }
    }

    /// Arguments for installing explicit specifiers.
    pub fn package_args(packages: &PackageSet) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-m", "pip", "install"].map(OsString::from).into();
        args.extend(packages.specifiers.iter().map(OsString::from));
        if let Some(url) = &packages.index_url {
            args.push("--index-url".into());
            args.push(url.into());
        }
        args
    }

    /// Arguments for installing a requirements manifest.
    pub fn manifest_args(manifest: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-m", "pip", "install", "-r"].map(OsString::from).into();
        args.push(manifest.as_os_str().to_os_string());
        args
    }

    fn spec(&self, args: Vec<OsString>) -> CommandSpec {
        PIP_ENV.iter().fold(
            CommandSpec::new(&self.python)
                .args(args)
                .output(OutputMode::Inherit)
                .timeout(self.timeout),
            |spec, (key, value)| spec.env(key, value),
        )
    }

    async fn run(&self, spec: CommandSpec) -> Result<(), InstallError> {
        info!(command = %spec, "running pip");
        let output = spec.run().await.map_err(|e| match e {
            CommandError::Timeout { after, .. } => InstallError::Timeout { after },
            CommandError::NotFound { program } => InstallError::Launch {
                program,
                reason: "not found".to_string(),
            },
            CommandError::Spawn { program, source } | CommandError::Io { program, source } => {
                InstallError::Launch {
                    program,
                    reason: source.to_string(),
                }
            }
        })?;

        if output.success {
            Ok(())
        } else {
            warn!(code = ?output.code, "pip reported failure");
            Err(InstallError::ManagerFailed { code: output.code })
        }
    }
}

#[async_trait]
impl PackageInstallerPort for PipInstaller {
    async fn install(&self, packages: &PackageSet) -> Result<(), InstallError> {
        if packages.is_empty() {
            return Ok(());
        }
        self.run(self.spec(Self::package_args(packages))).await
    }

    async fn install_from_manifest(&self, manifest: &Path) -> Result<(), InstallError> {
        if !manifest.is_file() {
            return Err(InstallError::ManifestMissing {
                path: manifest.to_path_buf(),
            });
        }
        self.run(self.spec(Self::manifest_args(manifest))).await
    }
}
