//! Background fetch worker for the TUI.
//!
//! The event loop sends [`FetchCommand`]s over a tokio channel; the worker
//! performs the sheet loads on the runtime and reports back over a std
//! mpsc channel that the event loop drains every tick. Project results are
//! tagged with the generation from the command so the controller can
//! discard stale ones; the worker additionally aborts a superseded
//! in-flight project task since its result would be thrown away anyway.

use std::sync::mpsc;

use presswatch_sheets::{load_directory, load_project_events, SheetClient, SheetsError};
use presswatch_timeline::{map_to_timeline_items, MappedBatch};
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Load failures surfaced to the UI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The project has no coverage sheet.
    #[error("no sheet found for project '{0}'")]
    NotFound(String),

    /// A sheet exists but its header row is unusable.
    #[error("sheet '{sheet}' is missing required columns: {columns}")]
    Schema {
        sheet: String,
        columns: String,
    },

    /// Network or HTTP failure.
    #[error("network error: {0}")]
    Network(String),

    /// The response could not be parsed.
    #[error("unreadable response: {0}")]
    Malformed(String),
}

impl From<SheetsError> for LoadError {
    fn from(err: SheetsError) -> Self {
        match err {
            SheetsError::SheetNotFound(sheet) => LoadError::NotFound(sheet),
            SheetsError::MissingColumns { sheet, columns } => LoadError::Schema {
                sheet,
                columns: columns.join(", "),
            },
            SheetsError::Http(e) => LoadError::Network(e.to_string()),
            SheetsError::Status(status) => LoadError::Network(format!("HTTP status {status}")),
            SheetsError::Malformed(detail) => LoadError::Malformed(detail),
        }
    }
}

/// Commands sent to the worker.
#[derive(Debug, Clone)]
pub enum FetchCommand {
    /// Fetch the project directory.
    LoadDirectory,
    /// Fetch and map one project's coverage sheet.
    LoadProject { project_id: String, generation: u64 },
}

/// Results sent back to the event loop.
#[derive(Debug)]
pub enum FetchMessage {
    DirectoryLoaded(Vec<presswatch_models::Project>),
    DirectoryFailed(LoadError),
    ProjectLoaded { generation: u64, batch: MappedBatch },
    ProjectFailed { generation: u64, error: LoadError },
}

/// Spawns the fetch worker on the given runtime.
///
/// Returns the command sender; dropping it shuts the worker down.
pub fn spawn_worker(
    handle: &tokio::runtime::Handle,
    client: SheetClient,
    directory_sheet: String,
    tx: mpsc::Sender<FetchMessage>,
) -> UnboundedSender<FetchCommand> {
    let (cmd_tx, mut cmd_rx) = tokio::sync::mpsc::unbounded_channel::<FetchCommand>();

    handle.spawn(async move {
        let mut in_flight: Option<tokio::task::JoinHandle<()>> = None;

        while let Some(command) = cmd_rx.recv().await {
            match command {
                FetchCommand::LoadDirectory => {
                    let client = client.clone();
                    let sheet = directory_sheet.clone();
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let message = match load_directory(&client, &sheet).await {
                            Ok(projects) => FetchMessage::DirectoryLoaded(projects),
                            Err(e) => FetchMessage::DirectoryFailed(e.into()),
                        };
                        let _ = tx.send(message);
                    });
                }
                FetchCommand::LoadProject {
                    project_id,
                    generation,
                } => {
                    // The controller would discard this task's result
                    // anyway; stop paying for the fetch.
                    if let Some(task) = in_flight.take() {
                        if !task.is_finished() {
                            debug!("aborting superseded fetch");
                            task.abort();
                        }
                    }

                    let client = client.clone();
                    let tx = tx.clone();
                    in_flight = Some(tokio::spawn(async move {
                        let message = match load_project_events(&client, &project_id).await {
                            Ok(events) => FetchMessage::ProjectLoaded {
                                generation,
                                batch: map_to_timeline_items(&events),
                            },
                            Err(e) => FetchMessage::ProjectFailed {
                                generation,
                                error: e.into(),
                            },
                        };
                        let _ = tx.send(message);
                    }));
                }
            }
        }
    });

    cmd_tx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_from_sheet_not_found() {
        let error: LoadError = SheetsError::SheetNotFound("7".to_string()).into();
        assert_eq!(error, LoadError::NotFound("7".to_string()));
    }

    #[test]
    fn test_load_error_from_missing_columns() {
        let error: LoadError = SheetsError::MissingColumns {
            sheet: "projects".to_string(),
            columns: vec!["project_id".to_string(), "category".to_string()],
        }
        .into();

        assert_eq!(
            error.to_string(),
            "sheet 'projects' is missing required columns: project_id, category"
        );
    }

    #[test]
    fn test_worker_round_trip() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (tx, rx) = mpsc::channel();

        // Point the client at an unroutable endpoint; the worker must
        // still answer every command with a failure message.
        let client = SheetClient::with_endpoint("http://127.0.0.1:1", "sheet-id").unwrap();
        let cmd_tx = spawn_worker(runtime.handle(), client, "projects".to_string(), tx);

        cmd_tx.send(FetchCommand::LoadDirectory).unwrap();
        let message = rx.recv_timeout(std::time::Duration::from_secs(10)).unwrap();
        assert!(matches!(message, FetchMessage::DirectoryFailed(_)));

        cmd_tx
            .send(FetchCommand::LoadProject {
                project_id: "2".to_string(),
                generation: 1,
            })
            .unwrap();
        let message = rx.recv_timeout(std::time::Duration::from_secs(10)).unwrap();
        match message {
            FetchMessage::ProjectFailed { generation, .. } => assert_eq!(generation, 1),
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
