#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use config::YamlConfigStore;
pub use domain::{
    ACCELERATED_INDEX_URL, BOOTSTRAP_PACKAGES, CapabilitySnapshot, CodecGuidance, CommandLine,
    DEFAULT_LANGUAGE, DISPLAY_LANGUAGE_KEY, DISPLAY_LANGUAGES, DisplayLanguage, FailurePolicy,
    FontPackagePlan, INTERACTIVE_PROMPT_PACKAGE, LinuxDistro, NumericRuntime, OsFamily,
    PackageSet, SetupStep, find_language,
};
pub use events::{AdvisoryWarning, SetupEvent};
pub use ports::{
    AppLauncherPort, ConfigStore, ConfigStoreError, DecisionError, DecisionSource,
    FixedDecisions, FontOutcome, FontProvisionerPort, InstallError, LaunchError, LaunchedApp,
    MirrorError, MirrorSelectorPort, NoopSetupEvents, PackageInstallerPort, ProbeOptions,
    ProvisionError, SetupEventSink, SystemProbePort,
};
pub use services::{SetupError, SetupOptions, SetupOrchestrator, SetupPorts, SetupReport};

// Dev-dependencies used only by integration tests or mock-based unit tests
#[cfg(test)]
use tokio_test as _;
