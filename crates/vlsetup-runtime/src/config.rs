//! Runtime adapter settings.

use std::path::PathBuf;
use std::time::Duration;

/// Interpreter, script location and timeouts shared by the adapters.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Python interpreter used for pip and the mirror script.
    pub python: PathBuf,
    /// Mirror-selection script, relative to the working directory.
    pub mirror_script: PathBuf,
    /// Bound on every pip invocation.
    pub install_timeout: Duration,
    /// Bound on `nvidia-smi` and `ffmpeg -version`.
    pub probe_timeout: Duration,
    /// Bound on the mirror script, which times downloads from each candidate.
    pub mirror_timeout: Duration,
    /// Bound on each font package manager command.
    pub font_timeout: Duration,
}

impl RuntimeConfig {
    /// `python` on Windows, `python3` elsewhere.
    pub fn default_python() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from("python")
        } else {
            PathBuf::from("python3")
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            python: Self::default_python(),
            mirror_script: PathBuf::from("core/pypi_autochoose.py"),
            install_timeout: Duration::from_secs(3600),
            probe_timeout: Duration::from_secs(30),
            mirror_timeout: Duration::from_secs(600),
            font_timeout: Duration::from_secs(900),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RuntimeConfig::default();
        assert_eq!(config.install_timeout, Duration::from_secs(3600));
        assert_eq!(config.probe_timeout, Duration::from_secs(30));
        assert_eq!(config.font_timeout, Duration::from_secs(900));
        assert_eq!(config.mirror_timeout, Duration::from_secs(600));
        assert!(config.python.to_string_lossy().starts_with("python"));
    }
}
