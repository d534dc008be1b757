//! Config command handler.
//!
//! Reads and writes the application's YAML config through the same store a
//! setup run uses.

use anyhow::{Result, bail};
use vlsetup_core::{ConfigStore, DISPLAY_LANGUAGE_KEY, DISPLAY_LANGUAGES, find_language};

use crate::bootstrap::CliContext;
use crate::commands::ConfigCommand;

/// Execute the config command.
pub async fn execute(ctx: &CliContext, command: ConfigCommand) -> Result<()> {
    let store = ctx.config_store();
    match command {
        ConfigCommand::Get { key } => match store.read(&key)? {
            Some(value) => println!("{value}"),
            None => eprintln!("'{key}' is not set in {}", store.path().display()),
        },
        ConfigCommand::Set { key, value } => {
            let value = normalize_value(&key, &value)?;
            store.write(&key, &value)?;
            println!("✓ {key} = {value} ({})", store.path().display());
        }
    }
    Ok(())
}

/// Check values for keys the setup run understands.
///
/// `display_language` must be a known code and is stored in its canonical
/// casing. Other keys pass through untouched.
pub fn normalize_value(key: &str, value: &str) -> Result<String> {
    if key != DISPLAY_LANGUAGE_KEY {
        return Ok(value.to_string());
    }
    match find_language(value) {
        Some(lang) => Ok(lang.code.to_string()),
        None => {
            let codes: Vec<&str> = DISPLAY_LANGUAGES.iter().map(|l| l.code).collect();
            bail!(
                "unknown display language '{value}' (expected one of: {})",
                codes.join(", ")
            )
        }
    }
}
