//! Directory and project-sheet loaders.
//!
//! Both loaders fetch raw rows from the gviz client, fail the whole call
//! when required columns are missing, and convert the surviving rows into
//! typed records at the boundary.

use presswatch_models::project::COL_COMPLETED_DATE;
use presswatch_models::{MediaEvent, Project};
use tracing::debug;

use crate::error::{Result, SheetsError};
use crate::gviz::{SheetClient, SheetSelector};
use crate::validate::missing_columns;

/// Default name of the directory tab.
pub const DEFAULT_DIRECTORY_SHEET: &str = "projects";

/// Loads the project directory from the named tab.
///
/// Rows with a blank `project_id` cannot name a per-project sheet and are
/// skipped.
pub async fn load_directory(client: &SheetClient, sheet: &str) -> Result<Vec<Project>> {
    let rows = client
        .fetch_rows(&SheetSelector::Name(sheet.to_string()))
        .await?;

    let missing = missing_columns(&rows, &Project::REQUIRED_COLUMNS);
    if !missing.is_empty() {
        return Err(SheetsError::MissingColumns {
            sheet: sheet.to_string(),
            columns: missing,
        });
    }

    // The completion date is optional; its absence never blocks the load.
    if !missing_columns(&rows, &[COL_COMPLETED_DATE]).is_empty() {
        debug!(
            sheet,
            column = COL_COMPLETED_DATE,
            "optional column absent; all projects will show as in progress"
        );
    }

    let total = rows.len();
    let projects: Vec<Project> = rows.iter().filter_map(Project::from_row).collect();

    if projects.len() < total {
        debug!(
            skipped = total - projects.len(),
            "directory rows without project_id skipped"
        );
    }

    Ok(projects)
}

/// Loads the media events of one project from the tab named by its id.
pub async fn load_project_events(
    client: &SheetClient,
    project_id: &str,
) -> Result<Vec<MediaEvent>> {
    let rows = client
        .fetch_rows(&SheetSelector::Name(project_id.to_string()))
        .await?;

    let missing = missing_columns(&rows, &MediaEvent::REQUIRED_COLUMNS);
    if !missing.is_empty() {
        return Err(SheetsError::MissingColumns {
            sheet: project_id.to_string(),
            columns: missing,
        });
    }

    debug!(project = project_id, rows = rows.len(), "project sheet loaded");

    Ok(rows.iter().map(MediaEvent::from_row).collect())
}
