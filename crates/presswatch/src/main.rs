//! Presswatch CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use presswatch::cli::Cli;
use presswatch::commands;
use presswatch::tui;

fn main() {
    // Load .env.local if it exists (for PRESSWATCH_SPREADSHEET_ID etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    let result = match &cli.command {
        Some(command) => commands::execute(&cli, command),
        // No subcommand = launch the TUI
        None => tui::run(&cli, None),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
