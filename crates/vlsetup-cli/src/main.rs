//! CLI entry point.
//!
//! Wiring happens in [`bootstrap`]; this file only parses arguments,
//! initializes logging and dispatches to handlers.

use std::process::ExitCode;

use clap::Parser;

use vlsetup_cli::{Cli, CliConfig, Commands, bootstrap, handlers, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before parsing so VLSETUP_* variables apply to flags
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let ctx = bootstrap(CliConfig::from_cli(&cli));

    match cli.command.unwrap_or(Commands::Install) {
        Commands::Install => return handlers::install::execute(&ctx).await,
        Commands::Probe { json } => handlers::probe::execute(&ctx, json).await?,
        Commands::Config { command } => handlers::config::execute(&ctx, command).await?,
        Commands::Languages => handlers::languages::execute(&ctx).await?,
    }

    Ok(ExitCode::SUCCESS)
}
