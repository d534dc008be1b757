//! CJK font package plans per Linux distribution.

use super::command::CommandLine;
use super::platform::LinuxDistro;

/// Package to ask for when the distribution is not recognized.
pub const FONT_PACKAGE_HINT: &str = "fonts-noto-cjk";

/// The commands that install Noto CJK fonts on one distribution family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontPackagePlan {
    /// Package manager name, for messages.
    pub manager: &'static str,
    pub package: &'static str,
    /// Run in order; each requires elevated privileges.
    pub commands: Vec<CommandLine>,
    /// What the operator should run by hand if the plan fails.
    pub manual_command: String,
}

impl FontPackagePlan {
    /// Plan for a distribution, or `None` when it is not recognized.
    pub fn for_distro(distro: LinuxDistro) -> Option<Self> {
        match distro {
            LinuxDistro::Debian => Some(Self {
                manager: "apt-get",
                package: "fonts-noto-cjk",
                commands: vec![
                    CommandLine::new("sudo", ["apt-get", "update"]),
                    CommandLine::new("sudo", ["apt-get", "install", "-y", "fonts-noto-cjk"]),
                ],
                manual_command: "sudo apt install fonts-noto-cjk".to_string(),
            }),
            LinuxDistro::RedHat => Some(Self {
                manager: "yum",
                package: "google-noto-sans-cjk-ttc-fonts",
                commands: vec![CommandLine::new(
                    "sudo",
                    ["yum", "install", "-y", "google-noto-sans-cjk-ttc-fonts"],
                )],
                manual_command: "sudo yum install google-noto-sans-cjk-ttc-fonts".to_string(),
            }),
            LinuxDistro::Unknown => None,
        }
    }
}
