//! Project records from the directory sheet.
//!
//! The directory sheet lists one row per city project. Each row names the
//! per-project sheet (via `project_id`) that holds that project's media
//! coverage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Column name for the project identifier.
pub const COL_PROJECT_ID: &str = "project_id";

/// Column name for the display name.
pub const COL_PROJECT_NAME: &str = "project_name";

/// Column name for the grouping category.
pub const COL_CATEGORY: &str = "category";

/// Column name for the optional completion date.
pub const COL_COMPLETED_DATE: &str = "completed_date";

/// A city project listed in the directory sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable identifier; also the name of the per-project sheet.
    pub project_id: String,

    /// Display label.
    pub project_name: String,

    /// Grouping key.
    pub category: String,

    /// Completion date as raw day/month/year text; `None` means in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
}

impl Project {
    /// Columns the directory sheet must carry.
    pub const REQUIRED_COLUMNS: [&'static str; 3] =
        [COL_PROJECT_ID, COL_PROJECT_NAME, COL_CATEGORY];

    /// Builds a project from a directory-sheet row.
    ///
    /// Returns `None` when the row has a blank `project_id`: such a row
    /// cannot name a per-project sheet and is unusable.
    pub fn from_row(row: &HashMap<String, String>) -> Option<Self> {
        let project_id = non_blank(row.get(COL_PROJECT_ID))?;

        Some(Self {
            project_id,
            project_name: row
                .get(COL_PROJECT_NAME)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            category: row
                .get(COL_CATEGORY)
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            completed_date: non_blank(row.get(COL_COMPLETED_DATE)),
        })
    }

    /// True when the project has a recorded completion date.
    pub fn is_completed(&self) -> bool {
        self.completed_date.is_some()
    }
}

/// Trims the value and drops it when empty.
fn non_blank(value: Option<&String>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
