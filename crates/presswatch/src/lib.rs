//! Presswatch binary library.
//!
//! Hosts the command-line interface, the non-interactive subcommands and
//! the terminal UI for browsing media-coverage timelines of city projects.

pub mod cli;
pub mod commands;
pub mod export;
pub mod tui;
