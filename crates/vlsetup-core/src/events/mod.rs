//! Setup run events.
//!
//! The orchestrator reports progress exclusively through [`SetupEvent`]s sent
//! to a [`SetupEventSink`](crate::ports::SetupEventSink). Adapters decide how
//! to render them (console panels in the CLI, nothing in tests).
//!
//! # Wire Format
//!
//! Events serialize with a `type` tag:
//!
//! ```json
//! { "type": "step_started", "step": "probe_capabilities", "position": 4, "total": 9, "policy": "advisory" }
//! ```

use serde::Serialize;

use crate::domain::{
    CapabilitySnapshot, CodecGuidance, CommandLine, FailurePolicy, NumericRuntime, SetupStep,
};

/// A non-fatal problem that was reported and then stepped past.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisoryWarning {
    /// Step that produced the warning.
    pub step: SetupStep,
    pub message: String,
    /// Literal command the operator can run to fix it by hand.
    pub manual_command: Option<String>,
}

impl AdvisoryWarning {
    pub fn new(step: SetupStep, message: impl Into<String>) -> Self {
        Self {
            step,
            message: message.into(),
            manual_command: None,
        }
    }

    #[must_use]
    pub fn with_manual_command(mut self, command: impl Into<String>) -> Self {
        self.manual_command = Some(command.into());
        self
    }
}

/// Progress of one setup run, in emission order.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SetupEvent {
    /// The run is starting.
    RunStarted,

    /// A step is about to run.
    StepStarted {
        step: SetupStep,
        /// 1-based position in the step order.
        position: usize,
        total: usize,
        /// Whether a failure of this step ends the run.
        policy: FailurePolicy,
    },

    /// A step finished successfully.
    StepSucceeded {
        step: SetupStep,
        detail: Option<String>,
    },

    /// A step was not run.
    StepSkipped { step: SetupStep, reason: String },

    /// A non-fatal problem was reported.
    Advisory { warning: AdvisoryWarning },

    /// The display language has been decided.
    LanguageSelected { code: String, label: String },

    /// The capability probe finished.
    CapabilitiesDetected { snapshot: CapabilitySnapshot },

    /// The numeric runtime build has been chosen.
    RuntimeSelected { runtime: NumericRuntime },

    /// FFmpeg is absent; the guidance tells the operator how to install it.
    CodecMissing { guidance: CodecGuidance },

    /// Setup is complete and the application is about to start.
    LaunchPending { command: CommandLine },

    /// The application process was started.
    Launched {
        command: CommandLine,
        pid: Option<u32>,
    },

    /// A mandatory step failed; the run stops here.
    Failed {
        step: SetupStep,
        message: String,
        remediation: Vec<String>,
    },

    /// Every step ran.
    Finished { warnings: usize },
}

impl SetupEvent {
    /// The step this event belongs to, if any.
    pub const fn step(&self) -> Option<SetupStep> {
        match self {
            Self::StepStarted { step, .. }
            | Self::StepSucceeded { step, .. }
            | Self::StepSkipped { step, .. }
            | Self::Failed { step, .. } => Some(*step),
            Self::Advisory { warning } => Some(warning.step),
            Self::LanguageSelected { .. } => Some(SetupStep::SelectLanguage),
            Self::CapabilitiesDetected { .. } => Some(SetupStep::ProbeCapabilities),
            Self::RuntimeSelected { .. } => Some(SetupStep::InstallNumericRuntime),
            Self::CodecMissing { .. } => Some(SetupStep::VerifyCodec),
            Self::LaunchPending { .. } | Self::Launched { .. } => Some(SetupStep::Launch),
            Self::RunStarted | Self::Finished { .. } => None,
        }
    }
}
