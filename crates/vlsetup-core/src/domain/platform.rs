//! Platform detection utilities.

use std::fmt;
use std::path::Path;

use serde::Serialize;

/// Marker file present on Debian, Ubuntu and derivatives.
pub const DEBIAN_MARKER: &str = "etc/debian_version";

/// Marker file present on RHEL, CentOS, Fedora and derivatives.
pub const REDHAT_MARKER: &str = "etc/redhat-release";

/// Operating system family of the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl OsFamily {
    /// Every family, in a stable order.
    pub const ALL: [Self; 4] = [Self::Windows, Self::MacOs, Self::Linux, Self::Other];

    /// Detect the family of the running host.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map a Rust platform identifier (`std::env::consts::OS`) to a family.
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "windows" => Self::Windows,
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            _ => Self::Other,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::MacOs => "macOS",
            Self::Linux => "Linux",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Linux distribution family, as far as font provisioning cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinuxDistro {
    Debian,
    RedHat,
    Unknown,
}

impl LinuxDistro {
    /// Detect the distribution family from marker files under `root`.
    ///
    /// `root` is `/` on a real host; tests point it at a temporary directory.
    /// The Debian marker wins when both are present.
    pub fn detect(root: &Path) -> Self {
        if root.join(DEBIAN_MARKER).exists() {
            Self::Debian
        } else if root.join(REDHAT_MARKER).exists() {
            Self::RedHat
        } else {
            Self::Unknown
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Debian => "Debian/Ubuntu",
            Self::RedHat => "RHEL/CentOS/Fedora",
            Self::Unknown => "unrecognized distribution",
        }
    }
}
