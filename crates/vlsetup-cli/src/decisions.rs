//! Terminal-backed `DecisionSource`.

use tracing::debug;
use vlsetup_core::{
    DEFAULT_LANGUAGE, DISPLAY_LANGUAGES, DecisionError, DecisionSource, DisplayLanguage,
    find_language,
};

use crate::presentation::{BOLD, RESET};
use crate::utils::input::{prompt_confirmation_with_default, prompt_string_with_default};

/// Asks the operator on stdin/stdout.
///
/// A language given up front (`--language`) is used without prompting.
#[derive(Debug, Clone, Default)]
pub struct TerminalDecisions {
    preset_language: Option<String>,
}

impl TerminalDecisions {
    pub fn new(preset_language: Option<String>) -> Self {
        Self {
            preset_language: preset_language.filter(|code| !code.trim().is_empty()),
        }
    }
}

/// Resolve a menu answer: empty picks `default_code`, a number picks that
/// row (1-based), anything else is looked up as a language code.
pub fn parse_language_choice(input: &str, default_code: &str) -> Option<&'static DisplayLanguage> {
    let input = input.trim();
    if input.is_empty() {
        return find_language(default_code).or_else(|| find_language(DEFAULT_LANGUAGE));
    }
    if let Ok(index) = input.parse::<usize>() {
        return index.checked_sub(1).and_then(|i| DISPLAY_LANGUAGES.get(i));
    }
    find_language(input)
}

fn print_language_menu(default_code: &str) {
    println!("\n{BOLD}Select display language{RESET}");
    for (i, lang) in DISPLAY_LANGUAGES.iter().enumerate() {
        let marker = if lang.code.eq_ignore_ascii_case(default_code) {
            " (current)"
        } else {
            ""
        };
        println!("  {:>2}. {:<10} {}{}", i + 1, lang.code, lang.label, marker);
    }
}

fn prompt_error(e: &anyhow::Error) -> DecisionError {
    DecisionError::Prompt(format!("{e:#}"))
}

impl DecisionSource for TerminalDecisions {
    fn is_interactive(&self) -> bool {
        true
    }

    fn choose_language(&self, default_code: &str) -> Result<String, DecisionError> {
        if let Some(code) = &self.preset_language {
            debug!(code, "language preset on the command line");
            return Ok(code.trim().to_string());
        }

        print_language_menu(default_code);
        loop {
            let answer = prompt_string_with_default("Language (number or code)", Some(default_code))
                .map_err(|e| prompt_error(&e))?;
            match parse_language_choice(&answer, default_code) {
                Some(lang) => return Ok(lang.code.to_string()),
                None => eprintln!("Unknown choice '{answer}'. Enter a number from the list."),
            }
        }
    }

    fn confirm_mirror(&self) -> Result<bool, DecisionError> {
        prompt_confirmation_with_default("Pick the fastest PyPI mirror before installing?", true)
            .map_err(|e| prompt_error(&e))
    }
}
