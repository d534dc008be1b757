//! Mirror selection by delegating to the project's own picker script.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;
use vlsetup_core::{MirrorError, MirrorSelectorPort};

use crate::command::{CommandError, CommandSpec, OutputMode};

/// Runs `<python> <script>`; the script measures mirrors and writes pip's config.
#[derive(Debug, Clone)]
pub struct ScriptMirrorSelector {
    python: PathBuf,
    script: PathBuf,
    timeout: Duration,
}

impl ScriptMirrorSelector {
    pub fn new(python: impl Into<PathBuf>, script: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            python: python.into(),
            script: script.into(),
            timeout,
        }
    }
}

#[async_trait]
impl MirrorSelectorPort for ScriptMirrorSelector {
    async fn select_mirror(&self) -> Result<(), MirrorError> {
        if !self.script.is_file() {
            return Err(MirrorError::Missing(self.script.display().to_string()));
        }

        let spec = CommandSpec::new(&self.python)
            .arg(&self.script)
            .env("PYTHONIOENCODING", "utf-8")
            .output(OutputMode::Inherit)
            .timeout(self.timeout);
        info!(command = %spec, "selecting PyPI mirror");

        let output = spec.run().await.map_err(|e| match e {
            CommandError::Timeout { after, .. } => MirrorError::Timeout { after },
            other => MirrorError::Launch(other.to_string()),
        })?;

        if output.success {
            Ok(())
        } else {
            Err(MirrorError::Failed { code: output.code })
        }
    }
}
