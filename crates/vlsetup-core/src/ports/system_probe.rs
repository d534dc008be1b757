//! System probe port for OS, GPU and FFmpeg detection.
//!
//! This port abstracts active system probing (command execution, hardware
//! detection) from the core domain. Implementations live in adapters
//! (e.g., vlsetup-runtime).
//!
//! # Design Notes
//!
//! - Core owns the trait and the snapshot type (pure)
//! - Runtime owns the implementation (active probing via `Command::new`)
//! - Probing never fails: every error degrades to "absent"

use async_trait::async_trait;

use crate::domain::{CapabilitySnapshot, OsFamily};

/// Knobs for one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOptions {
    /// When false the GPU probe is not run and no GPU is reported.
    pub gpu_check: bool,
}

impl ProbeOptions {
    /// Whether the GPU probe runs on `os_family`. Never on macOS, where
    /// accelerated runtimes are not selected.
    pub fn runs_gpu_probe(self, os_family: OsFamily) -> bool {
        self.gpu_check && os_family != OsFamily::MacOs
    }
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self { gpu_check: true }
    }
}

/// Port for probing the host.
#[async_trait]
pub trait SystemProbePort: Send + Sync {
    /// Operating system family of the host.
    fn os_family(&self) -> OsFamily;

    /// Names of compatible GPUs in enumeration order; empty on any failure.
    async fn detect_gpus(&self) -> Vec<String>;

    /// Whether `ffmpeg` runs and exits successfully.
    async fn ffmpeg_present(&self) -> bool;

    /// Build the capability snapshot for this run.
    ///
    /// The GPU probe only runs when [`ProbeOptions::runs_gpu_probe`] allows it.
    async fn probe(&self, options: ProbeOptions) -> CapabilitySnapshot {
        let os_family = self.os_family();
        let gpus = if options.runs_gpu_probe(os_family) {
            self.detect_gpus().await
        } else {
            Vec::new()
        };
        let ffmpeg = self.ffmpeg_present().await;

        CapabilitySnapshot::new(os_family)
            .with_gpus(gpus)
            .with_ffmpeg(ffmpeg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts GPU probes so tests can assert when they are skipped.
    struct CountingProbe {
        os: OsFamily,
        gpus: Vec<String>,
        ffmpeg: bool,
        gpu_calls: AtomicUsize,
    }

    impl CountingProbe {
        fn new(os: OsFamily) -> Self {
            Self {
                os,
                gpus: vec!["NVIDIA GeForce RTX 3060".to_string()],
                ffmpeg: true,
                gpu_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SystemProbePort for CountingProbe {
        fn os_family(&self) -> OsFamily {
            self.os
        }

        async fn detect_gpus(&self) -> Vec<String> {
            self.gpu_calls.fetch_add(1, Ordering::SeqCst);
            self.gpus.clone()
        }

        async fn ffmpeg_present(&self) -> bool {
            self.ffmpeg
        }
    }

    #[tokio::test]
    async fn test_probe_reports_gpus_on_linux() {
        let probe = CountingProbe::new(OsFamily::Linux);
        let snapshot = probe.probe(ProbeOptions::default()).await;

        assert!(snapshot.gpu_present());
        assert!(snapshot.ffmpeg_present());
        assert_eq!(probe.gpu_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_probe_skips_gpu_on_macos() {
        let probe = CountingProbe::new(OsFamily::MacOs);
        let snapshot = probe.probe(ProbeOptions::default()).await;

        assert!(!snapshot.gpu_present());
        assert_eq!(probe.gpu_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_probe_respects_disabled_gpu_check() {
        let probe = CountingProbe::new(OsFamily::Windows);
        let snapshot = probe.probe(ProbeOptions { gpu_check: false }).await;

        assert!(!snapshot.gpu_present());
        assert_eq!(probe.gpu_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_gpu_probe_rule() {
        let options = ProbeOptions::default();
        assert!(options.runs_gpu_probe(OsFamily::Linux));
        assert!(options.runs_gpu_probe(OsFamily::Windows));
        assert!(!options.runs_gpu_probe(OsFamily::MacOs));
        assert!(!ProbeOptions { gpu_check: false }.runs_gpu_probe(OsFamily::Linux));
    }
}
