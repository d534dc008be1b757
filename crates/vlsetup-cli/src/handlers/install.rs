//! Install command handler.

use std::process::ExitCode;

use anyhow::Result;
use tracing::info;

use crate::bootstrap::CliContext;

/// Run the full setup sequence.
///
/// Progress and failures are already rendered by the console reporter, so
/// this only maps the outcome to a process exit code.
pub async fn execute(ctx: &CliContext) -> Result<ExitCode> {
    match ctx.orchestrator().run().await {
        Ok(report) => {
            info!(
                language = %report.language,
                runtime = %report.runtime,
                warnings = report.warnings.len(),
                skipped = report.skipped.len(),
                "setup completed"
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => Ok(ExitCode::from(err.exit_code())),
    }
}
