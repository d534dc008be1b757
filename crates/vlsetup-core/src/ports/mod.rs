//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the orchestrator expects from the host. They
//! contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No process or filesystem details in signatures (paths excepted)
//! - Commands are argument lists, never shell strings
//! - Ports report errors; the orchestrator decides whether they are fatal

pub mod app_launcher;
pub mod config_store;
pub mod decision_source;
pub mod event_sink;
pub mod font_provisioner;
pub mod mirror_selector;
pub mod package_installer;
pub mod system_probe;

pub use app_launcher::{AppLauncherPort, LaunchError, LaunchedApp};
pub use config_store::{ConfigStore, ConfigStoreError};
pub use decision_source::{DecisionError, DecisionSource, FixedDecisions};
pub use event_sink::{NoopSetupEvents, SetupEventSink};
pub use font_provisioner::{FontOutcome, FontProvisionerPort, ProvisionError};
pub use mirror_selector::{MirrorError, MirrorSelectorPort};
pub use package_installer::{InstallError, PackageInstallerPort};
pub use system_probe::{ProbeOptions, SystemProbePort};

#[cfg(test)]
pub use decision_source::MockDecisionSource;
