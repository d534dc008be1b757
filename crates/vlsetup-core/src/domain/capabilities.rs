//! Per-run capability snapshot.

use serde::Serialize;

use super::platform::OsFamily;

/// What the probe found on this host for one run.
///
/// Built once by the probe and consumed by later steps. Never persisted.
/// `gpu_present` is always consistent with `gpu_names`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilitySnapshot {
    os_family: OsFamily,
    gpu_present: bool,
    gpu_names: Vec<String>,
    ffmpeg_present: bool,
}

impl CapabilitySnapshot {
    /// A snapshot with no GPU and no FFmpeg.
    pub const fn new(os_family: OsFamily) -> Self {
        Self {
            os_family,
            gpu_present: false,
            gpu_names: Vec::new(),
            ffmpeg_present: false,
        }
    }

    /// Record the detected GPU names, in enumeration order.
    #[must_use]
    pub fn with_gpus(mut self, names: Vec<String>) -> Self {
        self.gpu_present = !names.is_empty();
        self.gpu_names = names;
        self
    }

    #[must_use]
    pub const fn with_ffmpeg(mut self, present: bool) -> Self {
        self.ffmpeg_present = present;
        self
    }

    pub const fn os_family(&self) -> OsFamily {
        self.os_family
    }

    pub const fn gpu_present(&self) -> bool {
        self.gpu_present
    }

    pub fn gpu_names(&self) -> &[String] {
        &self.gpu_names
    }

    pub const fn ffmpeg_present(&self) -> bool {
        self.ffmpeg_present
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_snapshot_is_all_absent() {
        let snapshot = CapabilitySnapshot::new(OsFamily::Linux);
        assert!(!snapshot.gpu_present());
        assert!(snapshot.gpu_names().is_empty());
        assert!(!snapshot.ffmpeg_present());
    }

    #[test]
    fn test_gpu_presence_follows_names() {
        let snapshot = CapabilitySnapshot::new(OsFamily::Windows)
            .with_gpus(vec!["NVIDIA GeForce RTX 4090".into(), "NVIDIA T4".into()]);
        assert!(snapshot.gpu_present());
        assert_eq!(snapshot.gpu_names()[1], "NVIDIA T4");

        let cleared = snapshot.with_gpus(Vec::new());
        assert!(!cleared.gpu_present());
    }

    #[test]
    fn test_serializes_lowercase_os() {
        let snapshot = CapabilitySnapshot::new(OsFamily::MacOs).with_ffmpeg(true);
        let yaml = serde_yaml::to_string(&snapshot).unwrap();
        assert!(yaml.contains("os_family: macos"));
        assert!(yaml.contains("ffmpeg_present: true"));
    }
}
