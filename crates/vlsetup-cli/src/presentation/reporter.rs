//! `SetupEventSink` that renders a run on the terminal.

use vlsetup_core::{
    AdvisoryWarning, CapabilitySnapshot, CommandLine, FailurePolicy, SetupEvent, SetupEventSink,
};

use super::panels::render_panel;
use super::{BOLD, CYAN, GREEN, RED, RESET, YELLOW, render_banner};

/// How long the web UI usually takes to come up on a cold start.
const FIRST_START_HINT: &str = "The first start may take up to a minute.";

/// Console output for one setup run.
///
/// Everything goes to stdout; tracing logs go to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub const fn new() -> Self {
        Self
    }

    /// Lines for one event, without color.
    ///
    /// Panels come back as whole rows so tests can check content.
    pub fn render(&self, event: &SetupEvent) -> Vec<String> {
        match event {
            SetupEvent::RunStarted => render_banner(),
            SetupEvent::StepStarted {
                step,
                position,
                total,
                policy,
            } => {
                let header = format!("[{position}/{total}] {step}");
                match policy {
                    FailurePolicy::Mandatory => vec![String::new(), format!("{header} (required)")],
                    FailurePolicy::Advisory => vec![String::new(), header],
                }
            }
            SetupEvent::StepSucceeded { step, detail } => match detail {
                Some(detail) => vec![format!("  ✓ {step}: {detail}")],
                None => vec![format!("  ✓ {step}")],
            },
            SetupEvent::StepSkipped { step, reason } => {
                vec![format!("  ○ {step} skipped ({reason})")]
            }
            SetupEvent::Advisory { warning } => render_warning(warning),
            SetupEvent::LanguageSelected { code, label } => {
                vec![format!("  Display language: {label} ({code})")]
            }
            SetupEvent::CapabilitiesDetected { snapshot } => render_snapshot(snapshot),
            SetupEvent::RuntimeSelected { runtime } => {
                vec![format!("  Installing the {runtime} build of PyTorch")]
            }
            SetupEvent::CodecMissing { guidance } => {
                vec![format!(
                    "  ✗ FFmpeg was not found on PATH ({})",
                    guidance.os_family
                )]
            }
            SetupEvent::LaunchPending { command } => render_completion(command),
            SetupEvent::Launched { command, pid } => match pid {
                Some(pid) => vec![format!("  Started `{command}` (pid {pid})")],
                None => vec![format!("  Started `{command}`")],
            },
            SetupEvent::Failed {
                step,
                message,
                remediation,
            } => {
                let mut lines = vec![message.clone()];
                if !remediation.is_empty() {
                    lines.push(String::new());
                    lines.push("To fix:".to_string());
                    lines.extend(remediation.iter().map(|r| format!("  {r}")));
                }
                let mut rows = vec![String::new()];
                rows.extend(render_panel(&format!("{step} failed"), &lines));
                rows
            }
            SetupEvent::Finished { warnings } => match warnings {
                0 => vec![String::new(), "Setup finished.".to_string()],
                1 => vec![
                    String::new(),
                    "Setup finished with 1 warning (see above).".to_string(),
                ],
                n => vec![
                    String::new(),
                    format!("Setup finished with {n} warnings (see above)."),
                ],
            },
        }
    }

    fn print(&self, event: &SetupEvent) {
        let color = match event {
            SetupEvent::RunStarted => CYAN,
            SetupEvent::StepStarted { .. } => BOLD,
            SetupEvent::StepSucceeded { .. } | SetupEvent::LaunchPending { .. } => GREEN,
            SetupEvent::StepSkipped { .. } | SetupEvent::Advisory { .. } => YELLOW,
            SetupEvent::CodecMissing { .. } | SetupEvent::Failed { .. } => RED,
            SetupEvent::Finished { warnings } if *warnings > 0 => YELLOW,
            SetupEvent::Finished { .. } => GREEN,
            _ => "",
        };

        for line in self.render(event) {
            if color.is_empty() || line.is_empty() {
                println!("{line}");
            } else {
                println!("{color}{line}{RESET}");
            }
        }
    }
}

fn render_warning(warning: &AdvisoryWarning) -> Vec<String> {
    let mut lines = vec![format!("  ! {}: {}", warning.step, warning.message)];
    if let Some(command) = &warning.manual_command {
        lines.push(format!("    Run manually: {command}"));
    }
    lines
}

fn render_snapshot(snapshot: &CapabilitySnapshot) -> Vec<String> {
    let mut lines = vec![format!("  OS: {}", snapshot.os_family())];
    if snapshot.gpu_present() {
        for name in snapshot.gpu_names() {
            lines.push(format!("  GPU: {name}"));
        }
    } else {
        lines.push("  GPU: no NVIDIA GPU detected".to_string());
    }
    lines.push(format!(
        "  FFmpeg: {}",
        if snapshot.ffmpeg_present() {
            "found"
        } else {
            "not found"
        }
    ));
    lines
}

fn render_completion(command: &CommandLine) -> Vec<String> {
    let mut rows = vec![String::new()];
    rows.extend(render_panel(
        "Installation complete",
        &[
            format!("Starting: {command}"),
            FIRST_START_HINT.to_string(),
            String::new(),
            "If the browser does not open:".to_string(),
            format!("  run `{command}` from the project root"),
            "  check the terminal output for errors".to_string(),
        ],
    ));
    rows
}

impl SetupEventSink for ConsoleReporter {
    fn emit(&self, event: SetupEvent) {
        self.print(&event);
    }
}
