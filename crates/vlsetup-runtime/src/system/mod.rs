//! System probe implementation for vlsetup-runtime.
//!
//! This module provides the `DefaultSystemProbe` which implements
//! `SystemProbePort` from vlsetup-core. It performs active system probing
//! via command execution.

mod commands;
mod gpu;

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use vlsetup_core::{CapabilitySnapshot, OsFamily, ProbeOptions, SystemProbePort};

pub use commands::{ToolCheck, check_command};
pub use gpu::{detect_nvidia_gpus, parse_gpu_names};

/// Default implementation of `SystemProbePort`.
///
/// Construct it in the CLI composition root and hand it to the orchestrator.
///
/// # Example
///
/// ```ignore
/// use vlsetup_runtime::DefaultSystemProbe;
/// use vlsetup_core::{ProbeOptions, SystemProbePort};
///
/// let probe = DefaultSystemProbe::new(Duration::from_secs(30));
/// let snapshot = probe.probe(ProbeOptions::default()).await;
/// ```
#[derive(Debug, Clone)]
pub struct DefaultSystemProbe {
    timeout: Duration,
}

impl DefaultSystemProbe {
    /// Create a probe whose commands are each bounded by `timeout`.
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run `ffmpeg -version` once.
    pub async fn ffmpeg_check(&self) -> ToolCheck {
        let check = check_command("ffmpeg", "-version", self.timeout).await;
        debug!(present = check.present, version = ?check.version, "ffmpeg check");
        check
    }

    /// Snapshot plus the FFmpeg version line, running `ffmpeg` only once.
    pub async fn probe_detailed(
        &self,
        options: ProbeOptions,
    ) -> (CapabilitySnapshot, Option<String>) {
        let os_family = self.os_family();
        let gpus = if options.runs_gpu_probe(os_family) {
            self.detect_gpus().await
        } else {
            Vec::new()
        };
        let ffmpeg = self.ffmpeg_check().await;

        let snapshot = CapabilitySnapshot::new(os_family)
            .with_gpus(gpus)
            .with_ffmpeg(ffmpeg.present);
        (snapshot, ffmpeg.version)
    }
}

impl Default for DefaultSystemProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl SystemProbePort for DefaultSystemProbe {
    fn os_family(&self) -> OsFamily {
        OsFamily::current()
    }

    async fn detect_gpus(&self) -> Vec<String> {
        detect_nvidia_gpus(self.timeout).await
    }

    async fn ffmpeg_present(&self) -> bool {
        self.ffmpeg_check().await.present
    }
}
