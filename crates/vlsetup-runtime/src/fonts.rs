//! CJK font provisioning through the distribution package manager.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};
use vlsetup_core::{FontOutcome, FontPackagePlan, FontProvisionerPort, LinuxDistro, ProvisionError};

use crate::command::{CommandError, CommandSpec, OutputMode};

/// Installs Noto CJK fonts with `apt-get` or `yum`, chosen by marker files.
#[derive(Debug, Clone)]
pub struct SystemFontProvisioner {
    root: PathBuf,
    timeout: Duration,
}

impl SystemFontProvisioner {
    pub fn new(timeout: Duration) -> Self {
        Self::with_root("/", timeout)
    }

    /// Look for distribution markers under `root` instead of `/`.
    pub fn with_root(root: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            root: root.into(),
            timeout,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn distro(&self) -> LinuxDistro {
        LinuxDistro::detect(&self.root)
    }
}

/// Run each command of `plan` in order, stopping at the first failure.
pub(crate) async fn run_plan(
    plan: &FontPackagePlan,
    timeout: Duration,
) -> Result<FontOutcome, ProvisionError> {
    for command in &plan.commands {
        let shown = command.to_string();
        info!(command = %shown, "installing fonts");

        let spec = CommandSpec::new(&command.program)
            .args(&command.args)
            .output(OutputMode::CaptureStderr)
            .timeout(timeout);

        let failure = |reason: String, stderr: String| ProvisionError {
            command: shown.clone(),
            reason,
            stderr,
            manual_command: plan.manual_command.clone(),
        };

        match spec.run().await {
            Ok(output) if output.success => {}
            Ok(output) => {
                let reason = output
                    .code
                    .map_or_else(|| "terminated by signal".to_string(), |c| format!("exit status {c}"));
                warn!(command = %shown, %reason, "font command failed");
                return Err(failure(reason, output.stderr));
            }
            Err(CommandError::Timeout { after, .. }) => {
                return Err(failure(
                    format!("timed out after {}s", after.as_secs()),
                    String::new(),
                ));
            }
            Err(e) => return Err(failure(e.to_string(), String::new())),
        }
    }

    Ok(FontOutcome::Installed {
        manager: plan.manager.to_string(),
    })
}

#[async_trait]
impl FontProvisionerPort for SystemFontProvisioner {
    async fn provision_fonts(&self) -> Result<FontOutcome, ProvisionError> {
        let distro = self.distro();
        let Some(plan) = FontPackagePlan::for_distro(distro) else {
            warn!(root = %self.root.display(), "no known distribution marker");
            return Ok(FontOutcome::UnsupportedDistribution);
        };

        info!(distro = distro.display_name(), package = plan.package, "provisioning CJK fonts");
        run_plan(&plan, self.timeout).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vlsetup_core::CommandLine;

    fn plan_with(commands: Vec<CommandLine>) -> FontPackagePlan {
        FontPackagePlan {
            manager: "apt-get",
            package: "fonts-noto-cjk",
            commands,
            manual_command: "sudo apt install fonts-noto-cjk".to_string(),
        }
    }

    #[tokio::test]
    async fn test_unknown_distribution_runs_nothing() {
        let root = TempDir::new().unwrap();
        let provisioner = SystemFontProvisioner::with_root(root.path(), Duration::from_secs(1));

        assert_eq!(provisioner.distro(), LinuxDistro::Unknown);
        let outcome = provisioner.provision_fonts().await.unwrap();
        assert_eq!(outcome, FontOutcome::UnsupportedDistribution);
    }

    #[test]
    fn test_distro_detected_under_root() {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("etc")).unwrap();
        std::fs::write(root.path().join("etc/redhat-release"), "Fedora").unwrap();

        let provisioner = SystemFontProvisioner::with_root(root.path(), Duration::from_secs(1));
        assert_eq!(provisioner.distro(), LinuxDistro::RedHat);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_plan_success_reports_manager() {
        let plan = plan_with(vec![
            CommandLine::new("sh", ["-c", "exit 0"]),
            CommandLine::new("sh", ["-c", "exit 0"]),
        ]);
        let outcome = run_plan(&plan, Duration::from_secs(5)).await.unwrap();
        assert_eq!(
            outcome,
            FontOutcome::Installed {
                manager: "apt-get".into()
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_plan_stops_at_first_failure() {
        let marker = TempDir::new().unwrap();
        let touched = marker.path().join("second-ran");
        let plan = plan_with(vec![
            CommandLine::new("sh", ["-c", "echo 'E: lock held' >&2; exit 100"]),
            CommandLine::new("touch", [touched.to_string_lossy().into_owned()]),
        ]);

        let err = run_plan(&plan, Duration::from_secs(5)).await.unwrap_err();

        assert_eq!(err.manual_command(), "sudo apt install fonts-noto-cjk");
        assert_eq!(err.reason, "exit status 100");
        assert_eq!(err.stderr_tail(), Some("E: lock held"));
        assert!(!touched.exists(), "install must not run after a failed update");
    }

    #[tokio::test]
    async fn test_missing_package_manager_is_provision_error() {
        let plan = plan_with(vec![CommandLine::new(
            "definitely_not_sudo_12345",
            ["apt-get", "update"],
        )]);
        let err = run_plan(&plan, Duration::from_secs(5)).await.unwrap_err();
        assert!(err.reason.contains("not found"));
        assert_eq!(err.command, "definitely_not_sudo_12345 apt-get update");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_timeout_is_provision_error() {
        let plan = plan_with(vec![CommandLine::new("sleep", ["30"])]);
        let err = run_plan(&plan, Duration::from_millis(200)).await.unwrap_err();
        assert!(err.reason.starts_with("timed out"));
    }
}
