//! Command handlers.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<...>`
//! - Thin wrappers that:
//!   1. Validate CLI-specific input
//!   2. Call core services or ports from the context
//!   3. Format output for the terminal
//!
//! Handlers should NOT build adapters or contain setup logic.

pub mod config;
pub mod install;
pub mod languages;
pub mod probe;
