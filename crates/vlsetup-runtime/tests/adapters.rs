//! Adapter behavior against the real host, without assuming what is installed.

use std::time::Duration;

use vlsetup_core::{OsFamily, ProbeOptions, SystemProbePort};
use vlsetup_runtime::{DefaultSystemProbe, RuntimeConfig};

#[tokio::test]
async fn probe_reports_host_family() {
    let probe = DefaultSystemProbe::new(Duration::from_secs(10));
    let snapshot = probe.probe(ProbeOptions { gpu_check: false }).await;

    assert_eq!(snapshot.os_family(), OsFamily::current());
    assert!(!snapshot.gpu_present());
    assert!(snapshot.gpu_names().is_empty());
}

#[tokio::test]
async fn ffmpeg_presence_matches_version_check() {
    let probe = DefaultSystemProbe::new(Duration::from_secs(10));
    let present = probe.ffmpeg_present().await;
    let check = probe.ffmpeg_check().await;

    assert_eq!(present, check.present);
    if let Some(line) = check.version {
        assert!(line.to_lowercase().contains("ffmpeg"));
    }
}

#[tokio::test]
async fn detailed_probe_agrees_with_port_probe() {
    let probe = DefaultSystemProbe::new(Duration::from_secs(10));
    let options = ProbeOptions { gpu_check: false };

    let (snapshot, version) = probe.probe_detailed(options).await;

    assert_eq!(snapshot, probe.probe(options).await);
    if version.is_some() {
        assert!(snapshot.ffmpeg_present());
    }
}

#[test]
fn runtime_config_defaults_are_bounded() {
    let config = RuntimeConfig::default();
    assert!(config.probe_timeout < config.font_timeout);
    assert!(config.probe_timeout < config.mirror_timeout);
    assert!(config.font_timeout < config.install_timeout);
    assert_eq!(
        config.mirror_script,
        std::path::PathBuf::from("core/pypi_autochoose.py")
    );
}
