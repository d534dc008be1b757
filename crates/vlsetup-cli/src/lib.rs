#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Dev-dependencies used only by integration tests
#[cfg(test)]
use tokio_test as _;

// Used by the binary target (and tokio by async tests)
use dotenvy as _;
use tokio as _;

pub mod bootstrap;
pub mod commands;
pub mod decisions;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod utils;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap, init_tracing};
pub use commands::{Commands, ConfigCommand};
pub use decisions::TerminalDecisions;
pub use parser::Cli;
pub use presentation::ConsoleReporter;
