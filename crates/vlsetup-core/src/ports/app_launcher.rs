//! Downstream application launcher port.

use thiserror::Error;

use crate::domain::CommandLine;

/// A started application process. The launcher does not wait for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchedApp {
    pub pid: Option<u32>,
}

#[derive(Debug, Error)]
pub enum LaunchError {
    /// The program is not on `PATH`.
    #[error("'{program}' was not found on PATH")]
    NotFound { program: String },

    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Port for starting the application detached from the setup run.
pub trait AppLauncherPort: Send + Sync {
    /// Start `command` and return immediately.
    fn launch(&self, command: &CommandLine) -> Result<LaunchedApp, LaunchError>;
}
