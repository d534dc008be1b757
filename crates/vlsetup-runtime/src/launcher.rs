//! Detached launch of the downstream application.

use std::process::{Command, Stdio};

use tracing::{debug, info};
use vlsetup_core::{AppLauncherPort, CommandLine, LaunchError, LaunchedApp};

/// Starts the application in the background and returns immediately.
///
/// On Unix the child gets its own process group so a Ctrl+C in the setup
/// terminal does not reach it. Stdin is detached; output still goes to the
/// terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedLauncher;

impl DetachedLauncher {
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
fn detach(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(windows)]
fn detach(cmd: &mut Command) {
    use std::os::windows::process::CommandExt;
    const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
    cmd.creation_flags(CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_cmd: &mut Command) {}

impl AppLauncherPort for DetachedLauncher {
    fn launch(&self, command: &CommandLine) -> Result<LaunchedApp, LaunchError> {
        let resolved = which::which(&command.program).map_err(|e| {
            debug!(program = %command.program, error = %e, "launcher lookup failed");
            LaunchError::NotFound {
                program: command.program.clone(),
            }
        })?;

        let mut cmd = Command::new(&resolved);
        cmd.args(&command.args).stdin(Stdio::null());
        detach(&mut cmd);

        let child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        let pid = child.id();
        info!(command = %command, pid, "launched detached process");
        // Dropping `Child` neither waits for nor kills the process.
        drop(child);

        Ok(LaunchedApp { pid: Some(pid) })
    }
}
