//! Command-line interface definition using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Presswatch - media-coverage timelines for city projects
#[derive(Parser, Debug)]
#[command(name = "presswatch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Identifier of the public spreadsheet
    #[arg(long, env = "PRESSWATCH_SPREADSHEET_ID")]
    pub spreadsheet: String,

    /// Name of the directory tab listing all projects
    #[arg(long, default_value = presswatch_sheets::DEFAULT_DIRECTORY_SHEET)]
    pub directory_sheet: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive timeline browser (default)
    Tui {
        /// Project to open on start
        #[arg(short, long)]
        project: Option<String>,
    },

    /// Print the project directory
    List {
        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Print the media coverage of one project
    Show {
        /// Project ID (names the per-project sheet)
        #[arg(required = true)]
        project: String,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Write a standalone HTML timeline page for one project
    Export {
        /// Project ID (names the per-project sheet)
        #[arg(required = true)]
        project: String,

        /// Output file
        #[arg(short, long, default_value = "timeline.html")]
        output: PathBuf,
    },
}

/// Output format for print commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Cli {
    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}
