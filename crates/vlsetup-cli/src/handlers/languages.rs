//! Languages command handler.

use anyhow::Result;
use tracing::warn;
use vlsetup_core::{ConfigStore, DEFAULT_LANGUAGE, DISPLAY_LANGUAGE_KEY, DISPLAY_LANGUAGES};

use crate::bootstrap::CliContext;
use crate::presentation::{BOLD, GREEN, RESET};

/// List the display languages, marking the one currently configured.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let current = match ctx.config_store().read(DISPLAY_LANGUAGE_KEY) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "could not read current display language");
            None
        }
    };
    let current = current.as_deref().unwrap_or(DEFAULT_LANGUAGE);

    println!("{BOLD}{:<8} {:<12}{RESET}", "CODE", "LANGUAGE");
    for lang in DISPLAY_LANGUAGES {
        if lang.code.eq_ignore_ascii_case(current) {
            println!("{GREEN}{:<8} {:<12} *{RESET}", lang.code, lang.label);
        } else {
            println!("{:<8} {:<12}", lang.code, lang.label);
        }
    }
    Ok(())
}
