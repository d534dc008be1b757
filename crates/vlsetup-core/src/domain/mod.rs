//! Domain types for the setup run.
//!
//! Everything here is pure data plus decision functions. Nothing in this
//! module spawns processes or touches the filesystem except
//! [`LinuxDistro::detect`], which only checks for marker files.

mod capabilities;
mod codec;
mod command;
mod fonts;
mod language;
mod numeric_runtime;
mod packages;
mod platform;
mod steps;

pub use capabilities::CapabilitySnapshot;
pub use codec::CodecGuidance;
pub use command::CommandLine;
pub use fonts::{FONT_PACKAGE_HINT, FontPackagePlan};
pub use language::{
    DEFAULT_LANGUAGE, DISPLAY_LANGUAGE_KEY, DISPLAY_LANGUAGES, DisplayLanguage, find_language,
};
pub use numeric_runtime::{ACCELERATED_INDEX_URL, NumericRuntime};
pub use packages::{BOOTSTRAP_PACKAGES, INTERACTIVE_PROMPT_PACKAGE, PackageSet};
pub use platform::{DEBIAN_MARKER, LinuxDistro, OsFamily, REDHAT_MARKER};
pub use steps::{FailurePolicy, SetupStep};
