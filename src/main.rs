//! Binary entry point for the wellknown CLI.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use wellknown::{Cli, Command, commands, ui};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Silent by default; RUST_LOG=debug enables diagnostics.
            EnvFilter::new("warn")
        }))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let (title, result) = match cli.command {
        Command::Generate => (
            "Publish Failed",
            commands::generate::execute(cli.config.as_deref()),
        ),
        Command::Check => ("Check Failed", commands::check::execute(cli.config.as_deref())),
        Command::New { force } => ("Scaffold Failed", commands::new::execute(force)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::print_error_box(title, Some(&format!("{e:#}")));
            ExitCode::FAILURE
        },
    }
}
