//! Fatal setup errors.
//!
//! Each variant maps to one mandatory step and one distinct process exit code.

use thiserror::Error;

use crate::domain::{CodecGuidance, NumericRuntime, SetupStep};
use crate::ports::InstallError;

/// A mandatory step failed and the run stopped.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("installing installer dependencies failed: {0}")]
    Bootstrap(#[source] InstallError),

    #[error("installing the {runtime} PyTorch build failed: {source}")]
    NumericRuntime {
        runtime: NumericRuntime,
        #[source]
        source: InstallError,
    },

    #[error("installing project requirements failed: {0}")]
    Manifest(#[source] InstallError),

    #[error("FFmpeg was not found on this system")]
    CodecMissing { guidance: CodecGuidance },
}

impl SetupError {
    /// The step that failed.
    pub const fn step(&self) -> SetupStep {
        match self {
            Self::Bootstrap(_) => SetupStep::BootstrapDeps,
            Self::NumericRuntime { .. } => SetupStep::InstallNumericRuntime,
            Self::Manifest(_) => SetupStep::InstallFullManifest,
            Self::CodecMissing { .. } => SetupStep::VerifyCodec,
        }
    }

    /// Process exit code for this failure.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Bootstrap(_) => 10,
            Self::NumericRuntime { .. } => 11,
            Self::Manifest(InstallError::ManifestMissing { .. }) => 13,
            Self::Manifest(_) => 12,
            Self::CodecMissing { .. } => 14,
        }
    }

    pub const fn is_manifest_missing(&self) -> bool {
        matches!(self, Self::Manifest(InstallError::ManifestMissing { .. }))
    }

    /// Actionable lines telling the operator how to recover.
    pub fn remediation(&self) -> Vec<String> {
        let mut lines = Vec::new();
        match self {
            Self::Bootstrap(source) => {
                push_install_hints(&mut lines, source);
                lines.push(
                    "Make sure pip works for the selected interpreter: <python> -m pip --version"
                        .to_string(),
                );
            }
            Self::NumericRuntime { runtime, source } => {
                push_install_hints(&mut lines, source);
                if *runtime == NumericRuntime::Accelerated {
                    lines.push(
                        "Check that your NVIDIA driver supports CUDA 11.8, or re-run with \
                         --skip-gpu-check to install the CPU-only build"
                            .to_string(),
                    );
                }
            }
            Self::Manifest(InstallError::ManifestMissing { path }) => {
                lines.push(format!(
                    "Run vlsetup from the project root, or pass --manifest <path> (looked for {})",
                    path.display()
                ));
            }
            Self::Manifest(source) => {
                push_install_hints(&mut lines, source);
                lines.push("Review the pip output above for the package that failed".to_string());
            }
            Self::CodecMissing { guidance } => {
                lines.extend(guidance.commands.iter().cloned());
                if let Some(note) = &guidance.note {
                    lines.push(note.clone());
                }
                lines.push("Re-run vlsetup after installing FFmpeg".to_string());
                return lines;
            }
        }
        lines.push("Then re-run vlsetup".to_string());
        lines
    }
}

fn push_install_hints(lines: &mut Vec<String>, source: &InstallError) {
    match source {
        InstallError::Timeout { .. } => {
            lines.push("Raise the limit with --install-timeout <seconds>".to_string());
        }
        InstallError::Launch { program, .. } => {
            lines.push(format!(
                "'{program}' could not be started; pass a working interpreter with --python"
            ));
        }
        InstallError::ManagerFailed { .. } => {
            lines.push("Check your network connection or configure a closer PyPI mirror with --configure-mirror".to_string());
        }
        InstallError::ManifestMissing { .. } => {}
    }
}
