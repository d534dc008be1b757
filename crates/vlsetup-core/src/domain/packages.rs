//! Package sets handed to the package installer.

use serde::Serialize;

/// Helper packages the installer itself relies on: HTTP for the mirror
/// picker, terminal rendering, and YAML round-tripping for the shared config.
pub const BOOTSTRAP_PACKAGES: [&str; 3] = ["requests", "rich", "ruamel.yaml"];

/// Extra package needed when prompts are interactive.
pub const INTERACTIVE_PROMPT_PACKAGE: &str = "InquirerPy";

/// An ordered list of specifiers, optionally from a non-default index.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PackageSet {
    pub specifiers: Vec<String>,
    pub index_url: Option<String>,
}

impl PackageSet {
    pub fn new<I, S>(specifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            specifiers: specifiers.into_iter().map(Into::into).collect(),
            index_url: None,
        }
    }

    /// The bootstrap set; interactive runs also get the prompt library.
    pub fn bootstrap(interactive: bool) -> Self {
        let mut set = Self::new(BOOTSTRAP_PACKAGES);
        if interactive {
            set.specifiers.push(INTERACTIVE_PROMPT_PACKAGE.to_string());
        }
        set
    }

    #[must_use]
    pub fn with_index_url(mut self, url: impl Into<String>) -> Self {
        self.index_url = Some(url.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.specifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_non_interactive() {
        let set = PackageSet::bootstrap(false);
        assert_eq!(set.specifiers, vec!["requests", "rich", "ruamel.yaml"]);
        assert!(set.index_url.is_none());
    }

    #[test]
    fn test_bootstrap_interactive_adds_prompt_library() {
        let set = PackageSet::bootstrap(true);
        assert_eq!(set.specifiers.last().unwrap(), INTERACTIVE_PROMPT_PACKAGE);
    }

    #[test]
    fn test_empty_set() {
        assert!(PackageSet::default().is_empty());
        assert!(!PackageSet::new(["rich"]).is_empty());
    }
}
