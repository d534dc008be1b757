//! The ordered setup steps and their failure policy.

use std::fmt;

use serde::Serialize;

/// What happens to the run when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// The run stops with a non-zero exit code.
    Mandatory,
    /// A warning is reported and the run continues.
    Advisory,
}

/// One stage of the setup run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    BootstrapDeps,
    SelectLanguage,
    ConfigureMirror,
    ProbeCapabilities,
    InstallNumericRuntime,
    InstallFullManifest,
    ProvisionFonts,
    VerifyCodec,
    Launch,
}

impl SetupStep {
    /// Execution order. Later steps never start before earlier ones finish.
    pub const ORDER: [Self; 9] = [
        Self::BootstrapDeps,
        Self::SelectLanguage,
        Self::ConfigureMirror,
        Self::ProbeCapabilities,
        Self::InstallNumericRuntime,
        Self::InstallFullManifest,
        Self::ProvisionFonts,
        Self::VerifyCodec,
        Self::Launch,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::BootstrapDeps => "Install installer dependencies",
            Self::SelectLanguage => "Select display language",
            Self::ConfigureMirror => "Configure PyPI mirror",
            Self::ProbeCapabilities => "Detect hardware",
            Self::InstallNumericRuntime => "Install PyTorch",
            Self::InstallFullManifest => "Install requirements",
            Self::ProvisionFonts => "Install CJK fonts",
            Self::VerifyCodec => "Check FFmpeg",
            Self::Launch => "Launch application",
        }
    }

    /// `ProbeCapabilities` cannot fail; it is listed as advisory.
    pub const fn policy(self) -> FailurePolicy {
        match self {
            Self::BootstrapDeps
            | Self::InstallNumericRuntime
            | Self::InstallFullManifest
            | Self::VerifyCodec => FailurePolicy::Mandatory,
            Self::SelectLanguage
            | Self::ConfigureMirror
            | Self::ProbeCapabilities
            | Self::ProvisionFonts
            | Self::Launch => FailurePolicy::Advisory,
        }
    }

    /// 1-based position in [`Self::ORDER`].
    pub fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|s| *s == self)
            .map_or(0, |i| i + 1)
    }
}

impl fmt::Display for SetupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
