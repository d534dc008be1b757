//! Operator decisions (language choice, mirror consent).
//!
//! The terminal implementation lives in the CLI. [`FixedDecisions`] answers
//! from configuration without prompting.

use thiserror::Error;

use crate::domain::DEFAULT_LANGUAGE;

/// A decision could not be obtained.
#[derive(Debug, Error)]
pub enum DecisionError {
    /// The prompt could not read input (closed stdin, not a terminal).
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// The operator aborted the prompt.
    #[error("prompt cancelled")]
    Cancelled,
}

/// Source of operator decisions.
#[cfg_attr(test, mockall::automock)]
pub trait DecisionSource: Send + Sync {
    /// Whether decisions come from a person at a terminal.
    fn is_interactive(&self) -> bool;

    /// Pick a display language code, offering `default_code` as the default.
    fn choose_language(&self, default_code: &str) -> Result<String, DecisionError>;

    /// Whether to run the PyPI mirror picker.
    fn confirm_mirror(&self) -> Result<bool, DecisionError>;
}

/// Non-interactive decisions taken from flags.
#[derive(Debug, Clone, Default)]
pub struct FixedDecisions {
    /// Explicit language code; `None` keeps the offered default.
    pub language: Option<String>,
    /// Answer to the mirror question.
    pub configure_mirror: bool,
}

impl FixedDecisions {
    pub fn new(language: Option<String>, configure_mirror: bool) -> Self {
        Self {
            language,
            configure_mirror,
        }
    }
}

impl DecisionSource for FixedDecisions {
    fn is_interactive(&self) -> bool {
        false
    }

    fn choose_language(&self, default_code: &str) -> Result<String, DecisionError> {
        let code = self
            .language
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(if default_code.is_empty() {
                DEFAULT_LANGUAGE
            } else {
                default_code
            });
        Ok(code.trim().to_string())
    }

    fn confirm_mirror(&self) -> Result<bool, DecisionError> {
        Ok(self.configure_mirror)
    }
}
