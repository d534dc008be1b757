//! FFmpeg install guidance.
//!
//! FFmpeg is never installed automatically. When it is missing the operator
//! gets the command for their platform's package manager and the run stops.

use serde::Serialize;

use super::platform::OsFamily;

/// Manual install instructions for FFmpeg on one OS family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodecGuidance {
    pub os_family: OsFamily,
    /// Commands to run, one per line. Linux offers two alternatives.
    pub commands: Vec<String>,
    /// Prerequisite or context note.
    pub note: Option<String>,
}

impl CodecGuidance {
    pub fn for_os(os_family: OsFamily) -> Self {
        let (commands, note): (Vec<&str>, &str) = match os_family {
            OsFamily::Windows => (
                vec!["choco install ffmpeg"],
                "Install Chocolatey first (https://chocolatey.org/)",
            ),
            OsFamily::MacOs => (
                vec!["brew install ffmpeg"],
                "Install Homebrew first (https://brew.sh/)",
            ),
            OsFamily::Linux => (
                vec![
                    "sudo apt install ffmpeg  # Ubuntu/Debian",
                    "sudo yum install ffmpeg  # CentOS/RHEL",
                ],
                "Use your distribution's package manager",
            ),
            OsFamily::Other => (
                Vec::new(),
                "Download a build for your platform from https://ffmpeg.org/download.html",
            ),
        };

        Self {
            os_family,
            commands: commands.into_iter().map(str::to_string).collect(),
            note: Some(note.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_family_names_its_package_manager() {
        for os in OsFamily::ALL {
            let guidance = CodecGuidance::for_os(os);
            let joined = guidance.commands.join("\n");
            match os {
                OsFamily::Windows => assert!(joined.starts_with("choco ")),
                OsFamily::MacOs => assert!(joined.starts_with("brew ")),
                OsFamily::Linux => {
                    assert!(joined.contains("sudo apt install ffmpeg"));
                    assert!(joined.contains("sudo yum install ffmpeg"));
                }
                OsFamily::Other => assert!(guidance.commands.is_empty()),
            }
            assert!(guidance.note.is_some());
        }
    }

    #[test]
    fn test_prerequisite_notes() {
        let mac = CodecGuidance::for_os(OsFamily::MacOs);
        assert!(mac.note.unwrap().contains("https://brew.sh/"));

        let win = CodecGuidance::for_os(OsFamily::Windows);
        assert!(win.note.unwrap().contains("Chocolatey"));
    }
}
