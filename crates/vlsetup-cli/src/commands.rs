//! Main commands enum and the config subcommands.

use clap::Subcommand;

/// Available commands. Running `vlsetup` without one is the same as `install`.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install dependencies, configure the app and launch it
    Install,

    /// Show what this machine offers without installing anything
    Probe {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read or write the application config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// List the selectable display languages
    Languages,
}

/// Config file command variants.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the value stored under a (dotted) key
    Get {
        /// Key such as "display_language" or "api.model"
        key: String,
    },
    /// Store a value under a (dotted) key
    Set {
        /// Key such as "display_language" or "api.model"
        key: String,
        /// Value to store
        value: String,
    },
}
