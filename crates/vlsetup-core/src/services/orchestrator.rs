//! The setup orchestrator.
//!
//! Runs every [`SetupStep`] in order against the injected ports. Mandatory
//! step failures stop the run with a [`SetupError`]; advisory failures are
//! reported as [`AdvisoryWarning`]s and the run continues.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::{
    CapabilitySnapshot, CodecGuidance, CommandLine, DEFAULT_LANGUAGE, DISPLAY_LANGUAGE_KEY,
    DisplayLanguage, FONT_PACKAGE_HINT, FailurePolicy, NumericRuntime, OsFamily, PackageSet,
    SetupStep, find_language,
};
use crate::events::{AdvisoryWarning, SetupEvent};
use crate::ports::{
    AppLauncherPort, ConfigStore, DecisionSource, FontOutcome, FontProvisionerPort, LaunchedApp,
    MirrorSelectorPort, PackageInstallerPort, ProbeOptions, SetupEventSink, SystemProbePort,
};

use super::error::SetupError;

/// Every collaborator the orchestrator needs.
#[derive(Clone)]
pub struct SetupPorts {
    pub probe: Arc<dyn SystemProbePort>,
    pub installer: Arc<dyn PackageInstallerPort>,
    pub fonts: Arc<dyn FontProvisionerPort>,
    pub config: Arc<dyn ConfigStore>,
    pub decisions: Arc<dyn DecisionSource>,
    pub mirror: Arc<dyn MirrorSelectorPort>,
    pub launcher: Arc<dyn AppLauncherPort>,
    pub events: Arc<dyn SetupEventSink>,
}

/// Run-level settings.
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Requirements manifest installed by `InstallFullManifest`.
    pub manifest: PathBuf,
    /// Run the GPU probe (ignored on macOS).
    pub gpu_check: bool,
    /// Offer the PyPI mirror step.
    pub configure_mirror: bool,
    /// Application to start at the end; `None` skips the launch.
    pub launch: Option<CommandLine>,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            manifest: PathBuf::from("requirements.txt"),
            gpu_check: true,
            configure_mirror: false,
            launch: Some(CommandLine::default_launch()),
        }
    }
}

/// Outcome of a run that reached the end.
#[derive(Debug, Clone)]
pub struct SetupReport {
    /// Language code written (or meant to be written) to the config.
    pub language: String,
    pub capabilities: CapabilitySnapshot,
    pub runtime: NumericRuntime,
    /// `None` when font provisioning did not apply or failed.
    pub fonts: Option<FontOutcome>,
    pub launched: Option<LaunchedApp>,
    pub skipped: Vec<SetupStep>,
    pub warnings: Vec<AdvisoryWarning>,
}

impl SetupReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Collects advisory results while the run progresses.
#[derive(Default)]
struct RunLog {
    skipped: Vec<SetupStep>,
    warnings: Vec<AdvisoryWarning>,
}

/// Drives one setup run.
pub struct SetupOrchestrator {
    ports: SetupPorts,
    options: SetupOptions,
}

impl SetupOrchestrator {
    pub fn new(ports: SetupPorts, options: SetupOptions) -> Self {
        Self { ports, options }
    }

    pub fn options(&self) -> &SetupOptions {
        &self.options
    }

    /// Run every step in order.
    ///
    /// Returns the report when the run reached `Launch` (even if the launch
    /// itself failed), or the first mandatory failure.
    pub async fn run(&self) -> Result<SetupReport, SetupError> {
        self.emit(SetupEvent::RunStarted);
        info!(manifest = %self.options.manifest.display(), "setup run started");

        match self.run_steps().await {
            Ok(report) => {
                info!(warnings = report.warnings.len(), "setup run finished");
                self.emit(SetupEvent::Finished {
                    warnings: report.warnings.len(),
                });
                Ok(report)
            }
            Err(err) => {
                debug_assert_eq!(
                    err.step().policy(),
                    FailurePolicy::Mandatory,
                    "{} stopped the run but is not mandatory",
                    err.step()
                );
                warn!(step = %err.step(), exit_code = err.exit_code(), error = %err, "setup run failed");
                self.emit(SetupEvent::Failed {
                    step: err.step(),
                    message: err.to_string(),
                    remediation: err.remediation(),
                });
                Err(err)
            }
        }
    }

    async fn run_steps(&self) -> Result<SetupReport, SetupError> {
        let mut log = RunLog::default();

        self.bootstrap_deps().await?;
        let language = self.select_language(&mut log);
        self.configure_mirror(&mut log).await;
        let capabilities = self.probe_capabilities().await;
        let runtime = self.install_numeric_runtime(&capabilities).await?;
        self.install_full_manifest().await?;
        let fonts = self.provision_fonts(&capabilities, &mut log).await;
        self.verify_codec(&capabilities)?;
        let launched = self.launch(&mut log);

        Ok(SetupReport {
            language: language.code.to_string(),
            capabilities,
            runtime,
            fonts,
            launched,
            skipped: log.skipped,
            warnings: log.warnings,
        })
    }

    async fn bootstrap_deps(&self) -> Result<(), SetupError> {
        let step = SetupStep::BootstrapDeps;
        self.begin(step);

        let packages = PackageSet::bootstrap(self.ports.decisions.is_interactive());
        self.ports
            .installer
            .install(&packages)
            .await
            .map_err(SetupError::Bootstrap)?;

        self.succeed(step, Some(packages.specifiers.join(", ")));
        Ok(())
    }

    fn select_language(&self, log: &mut RunLog) -> DisplayLanguage {
        let step = SetupStep::SelectLanguage;
        self.begin(step);

        let stored = match self.ports.config.read(DISPLAY_LANGUAGE_KEY) {
            Ok(value) => value,
            Err(e) => {
                self.advise(
                    log,
                    AdvisoryWarning::new(step, format!("could not read stored language: {e}")),
                );
                None
            }
        };
        let offered = stored
            .as_deref()
            .and_then(find_language)
            .map_or(DEFAULT_LANGUAGE, |lang| lang.code);
        debug!(stored = ?stored, offered, "offering display language");

        let chosen = match self.ports.decisions.choose_language(offered) {
            Ok(code) => code,
            Err(e) => {
                self.advise(
                    log,
                    AdvisoryWarning::new(step, format!("language prompt failed ({e}); using {offered}")),
                );
                offered.to_string()
            }
        };

        let language = match find_language(&chosen) {
            Some(lang) => *lang,
            None => {
                self.advise(
                    log,
                    AdvisoryWarning::new(
                        step,
                        format!("unknown language code '{chosen}'; using {DEFAULT_LANGUAGE}"),
                    ),
                );
                find_language(DEFAULT_LANGUAGE).copied().unwrap_or(DisplayLanguage {
                    label: DEFAULT_LANGUAGE,
                    code: DEFAULT_LANGUAGE,
                })
            }
        };

        if let Err(e) = self.ports.config.write(DISPLAY_LANGUAGE_KEY, language.code) {
            self.advise(
                log,
                AdvisoryWarning::new(step, format!("could not save display language: {e}"))
                    .with_manual_command(format!("{DISPLAY_LANGUAGE_KEY}: {}", language.code)),
            );
        }

        self.emit(SetupEvent::LanguageSelected {
            code: language.code.to_string(),
            label: language.label.to_string(),
        });
        self.succeed(step, Some(language.label.to_string()));
        language
    }

    async fn configure_mirror(&self, log: &mut RunLog) {
        let step = SetupStep::ConfigureMirror;

        if !self.options.configure_mirror {
            self.skip(log, step, "not requested");
            return;
        }
        self.begin(step);

        match self.ports.decisions.confirm_mirror() {
            Ok(true) => {}
            Ok(false) => {
                self.skip(log, step, "declined");
                return;
            }
            Err(e) => {
                self.advise(log, AdvisoryWarning::new(step, format!("mirror prompt failed: {e}")));
                self.skip(log, step, "no answer");
                return;
            }
        }

        match self.ports.mirror.select_mirror().await {
            Ok(()) => self.succeed(step, None),
            Err(e) => {
                self.advise(
                    log,
                    AdvisoryWarning::new(step, format!("{e}; continuing with the current index")),
                );
            }
        }
    }

    async fn probe_capabilities(&self) -> CapabilitySnapshot {
        let step = SetupStep::ProbeCapabilities;
        self.begin(step);

        let snapshot = self
            .ports
            .probe
            .probe(ProbeOptions {
                gpu_check: self.options.gpu_check,
            })
            .await;
        info!(
            os = %snapshot.os_family(),
            gpus = ?snapshot.gpu_names(),
            ffmpeg = snapshot.ffmpeg_present(),
            "capabilities detected"
        );

        self.emit(SetupEvent::CapabilitiesDetected {
            snapshot: snapshot.clone(),
        });
        self.succeed(step, None);
        snapshot
    }

    async fn install_numeric_runtime(
        &self,
        capabilities: &CapabilitySnapshot,
    ) -> Result<NumericRuntime, SetupError> {
        let step = SetupStep::InstallNumericRuntime;
        self.begin(step);

        let runtime = NumericRuntime::select(capabilities.os_family(), capabilities.gpu_present());
        self.emit(SetupEvent::RuntimeSelected { runtime });

        self.ports
            .installer
            .install(&runtime.package_set())
            .await
            .map_err(|source| SetupError::NumericRuntime { runtime, source })?;

        self.succeed(step, Some(runtime.label().to_string()));
        Ok(runtime)
    }

    async fn install_full_manifest(&self) -> Result<(), SetupError> {
        let step = SetupStep::InstallFullManifest;
        self.begin(step);

        self.ports
            .installer
            .install_from_manifest(&self.options.manifest)
            .await
            .map_err(SetupError::Manifest)?;

        self.succeed(step, Some(self.options.manifest.display().to_string()));
        Ok(())
    }

    async fn provision_fonts(
        &self,
        capabilities: &CapabilitySnapshot,
        log: &mut RunLog,
    ) -> Option<FontOutcome> {
        let step = SetupStep::ProvisionFonts;

        if capabilities.os_family() != OsFamily::Linux {
            self.skip(log, step, "only needed on Linux");
            return None;
        }
        self.begin(step);

        match self.ports.fonts.provision_fonts().await {
            Ok(FontOutcome::Installed { manager }) => {
                self.succeed(step, Some(format!("installed with {manager}")));
                Some(FontOutcome::Installed { manager })
            }
            Ok(FontOutcome::UnsupportedDistribution) => {
                self.advise(
                    log,
                    AdvisoryWarning::new(
                        step,
                        format!(
                            "unrecognized Linux distribution; install {FONT_PACKAGE_HINT} \
                             (or your distribution's Noto CJK package) manually"
                        ),
                    ),
                );
                Some(FontOutcome::UnsupportedDistribution)
            }
            Err(e) => {
                let mut message = e.to_string();
                if let Some(tail) = e.stderr_tail() {
                    message.push_str(&format!(" ({tail})"));
                }
                self.advise(
                    log,
                    AdvisoryWarning::new(step, message).with_manual_command(e.manual_command()),
                );
                None
            }
        }
    }

    fn verify_codec(&self, capabilities: &CapabilitySnapshot) -> Result<(), SetupError> {
        let step = SetupStep::VerifyCodec;
        self.begin(step);

        if capabilities.ffmpeg_present() {
            self.succeed(step, None);
            return Ok(());
        }

        let guidance = CodecGuidance::for_os(capabilities.os_family());
        self.emit(SetupEvent::CodecMissing {
            guidance: guidance.clone(),
        });
        Err(SetupError::CodecMissing { guidance })
    }

    fn launch(&self, log: &mut RunLog) -> Option<LaunchedApp> {
        let step = SetupStep::Launch;

        let Some(command) = self.options.launch.clone() else {
            self.skip(log, step, "disabled");
            return None;
        };
        self.begin(step);

        self.emit(SetupEvent::LaunchPending {
            command: command.clone(),
        });

        match self.ports.launcher.launch(&command) {
            Ok(app) => {
                info!(command = %command, pid = ?app.pid, "application launched");
                self.emit(SetupEvent::Launched {
                    command,
                    pid: app.pid,
                });
                self.succeed(step, None);
                Some(app)
            }
            Err(e) => {
                self.advise(
                    log,
                    AdvisoryWarning::new(step, e.to_string()).with_manual_command(command.to_string()),
                );
                None
            }
        }
    }

    // ---- event helpers ----

    fn emit(&self, event: SetupEvent) {
        self.ports.events.emit(event);
    }

    fn begin(&self, step: SetupStep) {
        debug!(step = %step, "step started");
        self.emit(SetupEvent::StepStarted {
            step,
            position: step.position(),
            total: SetupStep::ORDER.len(),
            policy: step.policy(),
        });
    }

    fn succeed(&self, step: SetupStep, detail: Option<String>) {
        debug!(step = %step, "step succeeded");
        self.emit(SetupEvent::StepSucceeded { step, detail });
    }

    fn skip(&self, log: &mut RunLog, step: SetupStep, reason: &str) {
        debug!(step = %step, reason, "step skipped");
        log.skipped.push(step);
        self.emit(SetupEvent::StepSkipped {
            step,
            reason: reason.to_string(),
        });
    }

    fn advise(&self, log: &mut RunLog, warning: AdvisoryWarning) {
        debug_assert_eq!(
            warning.step.policy(),
            FailurePolicy::Advisory,
            "{} reported a warning but is mandatory",
            warning.step
        );
        warn!(step = %warning.step, manual = ?warning.manual_command, "{}", warning.message);
        self.emit(SetupEvent::Advisory {
            warning: warning.clone(),
        });
        log.warnings.push(warning);
    }
}
