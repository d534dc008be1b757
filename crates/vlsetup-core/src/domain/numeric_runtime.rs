//! Numeric runtime selection (CUDA vs CPU PyTorch build).

use std::fmt;

use serde::Serialize;

use super::packages::PackageSet;
use super::platform::OsFamily;

/// Wheel index for the CUDA 11.8 builds.
pub const ACCELERATED_INDEX_URL: &str = "https://download.pytorch.org/whl/cu118";

const ACCELERATED_SPECIFIERS: [&str; 2] = ["torch==2.0.0", "torchaudio==2.0.0"];
const CPU_SPECIFIERS: [&str; 2] = ["torch==2.1.2", "torchaudio==2.1.2"];

/// Which build of the numeric runtime to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericRuntime {
    /// CUDA build, pinned, from the accelerated index.
    Accelerated,
    /// CPU-only build, pinned, from the default index.
    CpuOnly,
}

impl NumericRuntime {
    /// GPU present and not macOS selects the accelerated build; everything else is CPU-only.
    pub fn select(os_family: OsFamily, gpu_present: bool) -> Self {
        if gpu_present && os_family != OsFamily::MacOs {
            Self::Accelerated
        } else {
            Self::CpuOnly
        }
    }

    /// The pinned specifiers (and index) to hand to the package installer.
    pub fn package_set(self) -> PackageSet {
        match self {
            Self::Accelerated => {
                PackageSet::new(ACCELERATED_SPECIFIERS).with_index_url(ACCELERATED_INDEX_URL)
            }
            Self::CpuOnly => PackageSet::new(CPU_SPECIFIERS),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Accelerated => "CUDA",
            Self::CpuOnly => "CPU-only",
        }
    }
}

impl fmt::Display for NumericRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
