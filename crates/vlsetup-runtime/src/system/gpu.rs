//! NVIDIA GPU detection.
//!
//! Queries the NVIDIA management library through its `nvidia-smi` front-end.
//! Anything other than a clean run with at least one device name means
//! "no GPU".

use std::time::Duration;

use tracing::debug;

use crate::command::{CommandSpec, OutputMode};

/// Names of NVIDIA GPUs, in the order the driver enumerates them.
pub async fn detect_nvidia_gpus(timeout: Duration) -> Vec<String> {
    let result = CommandSpec::new("nvidia-smi")
        .args(["--query-gpu=name", "--format=csv,noheader"])
        .output(OutputMode::Capture)
        .timeout(timeout)
        .run()
        .await;

    match result {
        Ok(output) if output.success => {
            let names = parse_gpu_names(&output.stdout);
            debug!(gpus = ?names, "nvidia-smi reported devices");
            names
        }
        Ok(output) => {
            debug!(code = ?output.code, stderr = %output.stderr.trim(), "nvidia-smi failed");
            Vec::new()
        }
        Err(e) => {
            debug!(error = %e, "nvidia-smi unavailable");
            Vec::new()
        }
    }
}

/// One device name per non-empty line of `--format=csv,noheader` output.
pub fn parse_gpu_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
