//! Subcommand execution.

use presswatch_models::Project;
use presswatch_sheets::{load_directory, load_project_events, SheetClient, SheetsError};
use presswatch_timeline::{map_to_timeline_items, MappedBatch};

use crate::cli::{Cli, Commands, OutputFormat};
use crate::export;
use crate::tui;

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute one subcommand.
pub fn execute(cli: &Cli, command: &Commands) -> Result<()> {
    match command {
        Commands::Tui { project } => tui::run(cli, project.clone()),
        Commands::List { format } => {
            let (runtime, client) = blocking_client(cli)?;
            let projects = runtime.block_on(load_directory(&client, &cli.directory_sheet))?;
            print_directory(&projects, *format);
            Ok(())
        }
        Commands::Show { project, format } => {
            let (runtime, client) = blocking_client(cli)?;
            let Some(batch) = runtime.block_on(load_batch(&client, project))? else {
                println!("No coverage sheet found for project '{project}' — nothing recorded yet.");
                return Ok(());
            };
            print_batch(&batch, *format);
            Ok(())
        }
        Commands::Export { project, output } => {
            let (runtime, client) = blocking_client(cli)?;
            let Some(batch) = runtime.block_on(load_batch(&client, project))? else {
                println!("No coverage sheet found for project '{project}' — nothing to export.");
                return Ok(());
            };
            export::write_page(output, project, &batch)?;
            println!(
                "Wrote {} ({} events, {} rows skipped)",
                output.display(),
                batch.items.len(),
                batch.skipped.len()
            );
            Ok(())
        }
    }
}

/// Runtime and sheet client for the blocking subcommands.
fn blocking_client(cli: &Cli) -> Result<(tokio::runtime::Runtime, SheetClient)> {
    let runtime = tokio::runtime::Runtime::new()?;
    let client = SheetClient::new(cli.spreadsheet.clone())?;
    Ok((runtime, client))
}

/// Loads and maps one project's events.
///
/// `Ok(None)` means the project has no coverage sheet yet, which gets a
/// softer message than a real failure.
async fn load_batch(
    client: &SheetClient,
    project: &str,
) -> std::result::Result<Option<MappedBatch>, SheetsError> {
    match load_project_events(client, project).await {
        Ok(events) => Ok(Some(map_to_timeline_items(&events))),
        Err(SheetsError::SheetNotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn print_directory(projects: &[Project], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(projects).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            if projects.is_empty() {
                println!("No projects in the directory.");
                return;
            }
            println!("{:<10} {:<40} {:<20} STATUS", "ID", "NAME", "CATEGORY");
            for project in projects {
                let status = project
                    .completed_date
                    .as_deref()
                    .map(|d| format!("completed {d}"))
                    .unwrap_or_else(|| "in progress".to_string());
                println!(
                    "{:<10} {:<40} {:<20} {}",
                    project.project_id, project.project_name, project.category, status
                );
            }
        }
    }
}

fn print_batch(batch: &MappedBatch, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "items": batch.items,
                "skipped": batch.skipped.len(),
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            if batch.is_empty() {
                println!("No media coverage recorded for this project yet.");
            } else {
                for item in &batch.items {
                    println!("{}\n", item.text);
                }
                println!("{} events", batch.items.len());
            }
            if !batch.skipped.is_empty() {
                println!("{} rows skipped (unreadable dates)", batch.skipped.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_execute_list_surfaces_load_failure() {
        let cli = Cli::parse_from([
            "presswatch",
            "--spreadsheet",
            "definitely-not-a-real-spreadsheet-id",
            "list",
        ]);
        let Some(command) = cli.command.as_ref() else {
            panic!("expected a subcommand");
        };

        // A bogus spreadsheet id cannot yield a directory; the command
        // reports the failure as an error instead of panicking.
        assert!(execute(&cli, command).is_err());
    }
}
