//! PyPI mirror selection port.
//!
//! How a mirror is chosen is the collaborator's business; the orchestrator
//! only asks for it to happen and reports failure as a warning.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::package_installer::describe_exit;

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("mirror selector exited with {}", describe_exit(.code))]
    Failed { code: Option<i32> },

    #[error("mirror selector not found at {0}")]
    Missing(String),

    #[error("failed to start mirror selector: {0}")]
    Launch(String),

    #[error("mirror selector timed out after {}s", .after.as_secs())]
    Timeout { after: Duration },
}

#[async_trait]
pub trait MirrorSelectorPort: Send + Sync {
    /// Pick and configure the fastest reachable package index.
    async fn select_mirror(&self) -> Result<(), MirrorError>;
}
