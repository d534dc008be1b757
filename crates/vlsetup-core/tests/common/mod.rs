//! Recording fakes shared by the scenario tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vlsetup_core::{
    AppLauncherPort, CommandLine, ConfigStore, ConfigStoreError, FixedDecisions, FontOutcome,
    FontProvisionerPort, InstallError, LaunchError, LaunchedApp, MirrorError, MirrorSelectorPort,
    OsFamily, PackageInstallerPort, PackageSet, ProvisionError, SetupEvent, SetupEventSink,
    SetupOptions, SetupOrchestrator, SetupPorts, SystemProbePort,
};

// ---- probe ----

pub struct FakeProbe {
    pub os: OsFamily,
    pub gpus: Vec<String>,
    pub ffmpeg: bool,
}

#[async_trait]
impl SystemProbePort for FakeProbe {
    fn os_family(&self) -> OsFamily {
        self.os
    }

    async fn detect_gpus(&self) -> Vec<String> {
        self.gpus.clone()
    }

    async fn ffmpeg_present(&self) -> bool {
        self.ffmpeg
    }
}

// ---- installer ----

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallCall {
    Packages(PackageSet),
    Manifest(PathBuf),
}

/// Which installer call should fail, counted from 0 over `install` calls.
#[derive(Debug, Clone, Copy, Default)]
pub enum InstallFailure {
    #[default]
    None,
    Bootstrap,
    Runtime,
    ManifestMissing,
    ManifestFailed,
}

#[derive(Default)]
pub struct RecordingInstaller {
    pub calls: Mutex<Vec<InstallCall>>,
    pub failure: InstallFailure,
}

impl RecordingInstaller {
    pub fn failing(failure: InstallFailure) -> Self {
        Self {
            failure,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<InstallCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageInstallerPort for RecordingInstaller {
    async fn install(&self, packages: &PackageSet) -> Result<(), InstallError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(InstallCall::Packages(packages.clone()));
            calls.len() - 1
        };
        match (self.failure, index) {
            (InstallFailure::Bootstrap, 0) | (InstallFailure::Runtime, 1) => {
                Err(InstallError::ManagerFailed { code: Some(1) })
            }
            _ => Ok(()),
        }
    }

    async fn install_from_manifest(&self, manifest: &Path) -> Result<(), InstallError> {
        self.calls
            .lock()
            .unwrap()
            .push(InstallCall::Manifest(manifest.to_path_buf()));
        match self.failure {
            InstallFailure::ManifestMissing => Err(InstallError::ManifestMissing {
                path: manifest.to_path_buf(),
            }),
            InstallFailure::ManifestFailed => Err(InstallError::ManagerFailed { code: Some(1) }),
            _ => Ok(()),
        }
    }
}

// ---- fonts ----

pub enum FontBehavior {
    Install(&'static str),
    Unsupported,
    Fail,
}

pub struct RecordingFonts {
    pub behavior: FontBehavior,
    pub attempts: AtomicUsize,
}

impl RecordingFonts {
    pub fn new(behavior: FontBehavior) -> Self {
        Self {
            behavior,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FontProvisionerPort for RecordingFonts {
    async fn provision_fonts(&self) -> Result<FontOutcome, ProvisionError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            FontBehavior::Install(manager) => Ok(FontOutcome::Installed {
                manager: manager.to_string(),
            }),
            FontBehavior::Unsupported => Ok(FontOutcome::UnsupportedDistribution),
            FontBehavior::Fail => Err(ProvisionError {
                command: "sudo apt-get update".to_string(),
                reason: "exit status 100".to_string(),
                stderr: "E: Could not open lock file\n".to_string(),
                manual_command: "sudo apt install fonts-noto-cjk".to_string(),
            }),
        }
    }
}

// ---- config ----

#[derive(Default)]
pub struct MemoryConfig {
    pub values: Mutex<HashMap<String, String>>,
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
}

impl ConfigStore for MemoryConfig {
    fn read(&self, key: &str) -> Result<Option<String>, ConfigStoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ConfigStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---- mirror ----

#[derive(Default)]
pub struct RecordingMirror {
    pub calls: AtomicUsize,
    pub fail: bool,
}

#[async_trait]
impl MirrorSelectorPort for RecordingMirror {
    async fn select_mirror(&self) -> Result<(), MirrorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(MirrorError::Missing("core/pypi_autochoose.py".to_string()))
        } else {
            Ok(())
        }
    }
}

// ---- launcher ----

#[derive(Default)]
pub struct RecordingLauncher {
    pub launched: Mutex<Vec<CommandLine>>,
    pub missing: bool,
}

impl AppLauncherPort for RecordingLauncher {
    fn launch(&self, command: &CommandLine) -> Result<LaunchedApp, LaunchError> {
        if self.missing {
            return Err(LaunchError::NotFound {
                program: command.program.clone(),
            });
        }
        self.launched.lock().unwrap().push(command.clone());
        Ok(LaunchedApp { pid: Some(4242) })
    }
}

// ---- events ----

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Mutex<Vec<SetupEvent>>,
}

impl RecordingEvents {
    pub fn events(&self) -> Vec<SetupEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl SetupEventSink for RecordingEvents {
    fn emit(&self, event: SetupEvent) {
        self.events.lock().unwrap().push(event);
    }
}

// ---- harness ----

/// All fakes for one run, kept so tests can inspect them afterwards.
pub struct Harness {
    pub probe: Arc<FakeProbe>,
    pub installer: Arc<RecordingInstaller>,
    pub fonts: Arc<RecordingFonts>,
    pub config: Arc<MemoryConfig>,
    pub decisions: Arc<FixedDecisions>,
    pub mirror: Arc<RecordingMirror>,
    pub launcher: Arc<RecordingLauncher>,
    pub events: Arc<RecordingEvents>,
}

impl Harness {
    pub fn new(os: OsFamily) -> Self {
        Self {
            probe: Arc::new(FakeProbe {
                os,
                gpus: Vec::new(),
                ffmpeg: true,
            }),
            installer: Arc::new(RecordingInstaller::default()),
            fonts: Arc::new(RecordingFonts::new(FontBehavior::Install("apt-get"))),
            config: Arc::new(MemoryConfig::default()),
            decisions: Arc::new(FixedDecisions::default()),
            mirror: Arc::new(RecordingMirror::default()),
            launcher: Arc::new(RecordingLauncher::default()),
            events: Arc::new(RecordingEvents::default()),
        }
    }

    pub fn with_probe(mut self, gpus: &[&str], ffmpeg: bool) -> Self {
        let os = self.probe.os;
        self.probe = Arc::new(FakeProbe {
            os,
            gpus: gpus.iter().map(|g| (*g).to_string()).collect(),
            ffmpeg,
        });
        self
    }

    pub fn with_installer(mut self, installer: RecordingInstaller) -> Self {
        self.installer = Arc::new(installer);
        self
    }

    pub fn with_fonts(mut self, behavior: FontBehavior) -> Self {
        self.fonts = Arc::new(RecordingFonts::new(behavior));
        self
    }

    pub fn with_decisions(mut self, decisions: FixedDecisions) -> Self {
        self.decisions = Arc::new(decisions);
        self
    }

    pub fn with_mirror(mut self, mirror: RecordingMirror) -> Self {
        self.mirror = Arc::new(mirror);
        self
    }

    pub fn with_launcher(mut self, launcher: RecordingLauncher) -> Self {
        self.launcher = Arc::new(launcher);
        self
    }

    pub fn ports(&self) -> SetupPorts {
        SetupPorts {
            probe: self.probe.clone(),
            installer: self.installer.clone(),
            fonts: self.fonts.clone(),
            config: self.config.clone(),
            decisions: self.decisions.clone(),
            mirror: self.mirror.clone(),
            launcher: self.launcher.clone(),
            events: self.events.clone(),
        }
    }

    pub fn orchestrator(&self, options: SetupOptions) -> SetupOrchestrator {
        SetupOrchestrator::new(self.ports(), options)
    }
}
