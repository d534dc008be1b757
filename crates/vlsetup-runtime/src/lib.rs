#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]

pub mod command;
mod config;
mod fonts;
mod installer;
mod launcher;
mod mirror;
pub mod system;

pub use command::{CommandError, CommandOutput, CommandSpec, OutputMode};
pub use config::RuntimeConfig;
pub use fonts::SystemFontProvisioner;
pub use installer::PipInstaller;
pub use launcher::DetachedLauncher;
pub use mirror::ScriptMirrorSelector;

// Re-export system probe implementation
pub use system::{DefaultSystemProbe, ToolCheck};

#[cfg(test)]
use tokio_test as _;
