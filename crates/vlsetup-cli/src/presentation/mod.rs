//! Console presentation for setup runs.
//!
//! Format-only: nothing here decides what happens next. The reporter turns
//! [`SetupEvent`](vlsetup_core::SetupEvent)s into lines; panels and the banner
//! are plain string builders so they can be checked in tests.

pub mod banner;
pub mod panels;
pub mod reporter;

// ANSI color codes for better UX
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const BOLD: &str = "\x1b[1m";
pub const RESET: &str = "\x1b[0m";

pub use banner::render_banner;
pub use panels::render_panel;
pub use reporter::ConsoleReporter;
