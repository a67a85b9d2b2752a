//! Network Console - command-line entry point.

use std::process::ExitCode;

use clap::Parser;
use netconsole::{AppConfig, Cli, init_tracing, run};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => cli.apply_overrides(config),
        Err(error) => {
            eprintln!("error: configuration error: {error}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.log_level);
    tracing::debug!(?config, "configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(&cli.command, &config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(?error, "command failed");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
