//! Services that orchestrate ports into use cases.

mod error;
mod orchestrator;

pub use error::SetupError;
pub use orchestrator::{SetupOptions, SetupOrchestrator, SetupPorts, SetupReport};
