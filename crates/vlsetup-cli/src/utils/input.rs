//! User input utilities for interactive command-line prompts.
//!
//! Input is read line by line from stdin. End of input reads as an empty
//! line, so every prompt falls back to its default when stdin is closed.

use anyhow::{Context, Result};
use std::io::{self, Write};

fn read_line() -> Result<String> {
    io::stdout().flush().context("Failed to flush prompt")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;

    Ok(input.trim().to_string())
}

/// Prompts the user for a string input with a default value.
///
/// If the user just presses Enter, the default value is returned.
///
/// # Arguments
///
/// * `prompt` - The message to display to the user
/// * `default` - Optional default value to suggest
pub fn prompt_string_with_default(prompt: &str, default: Option<&str>) -> Result<String> {
    if let Some(default_val) = default {
        print!("{prompt} [{default_val}]: ");
    } else {
        print!("{prompt}: ");
    }

    let input = read_line()?;
    if input.is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(input)
    }
}

/// Interpret a yes/no answer. Empty input takes `default`.
///
/// Returns `None` for anything that is not y/yes/n/no (case insensitive).
pub fn parse_yes_no(input: &str, default: bool) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Prompts the user for a yes/no confirmation with a default answer.
///
/// Accepts 'y', 'yes', 'n', 'no' (case insensitive) and re-prompts on
/// anything else.
///
/// # Errors
///
/// Returns an error if reading from stdin fails.
pub fn prompt_confirmation_with_default(prompt: &str, default: bool) -> Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        print!("{prompt} ({hint}): ");
        let input = read_line()?;
        match parse_yes_no(&input, default) {
            Some(answer) => return Ok(answer),
            None => {
                eprintln!("Please enter 'y' for yes or 'n' for no.");
                continue;
            }
        }
    }
}
