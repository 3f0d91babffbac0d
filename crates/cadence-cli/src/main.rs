use cadence_core::error::ScheduleError;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod util;
mod views;

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    let config = config::Config::new().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load configuration, using defaults");
        config::Config::default()
    });

    let result = match cli.command {
        cli::Commands::Canonicalize(command) => commands::canonicalize::canonicalize_command(command),
        cli::Commands::Validate(command) => commands::validate::validate_command(command),
        cli::Commands::Expand(command) => commands::expand::expand_command(command, &config),
        cli::Commands::Next(command) => commands::next::next_command(command, &config),
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    match err.downcast_ref::<ScheduleError>() {
        Some(schedule_error) => {
            eprintln!(
                "{} [{}] {}",
                "Error:".style(error_style),
                schedule_error.code().yellow(),
                schedule_error
            );
            if let ScheduleError::SafetyCapExceeded { .. } = schedule_error {
                eprintln!("Hint: raise --max-candidates or move the anchor closer to now.");
            }
        }
        None => eprintln!("{} {:#}", "Error:".style(error_style), err),
    }
}
