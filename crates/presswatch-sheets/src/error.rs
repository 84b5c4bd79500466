//! Error types for spreadsheet access.

use thiserror::Error;

/// Errors that can occur while loading sheet data.
#[derive(Error, Debug)]
pub enum SheetsError {
    /// A sheet is missing required columns; fatal for that sheet's load.
    #[error("sheet '{sheet}' is missing required columns: {}", columns.join(", "))]
    MissingColumns {
        /// Sheet that failed validation.
        sheet: String,
        /// Required columns absent from the header row.
        columns: Vec<String>,
    },

    /// The requested sheet/tab does not exist in the spreadsheet.
    #[error("sheet '{0}' not found")]
    SheetNotFound(String),

    /// Network-level failure.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with an unexpected HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// The response body was not a gviz payload.
    #[error("malformed gviz response: {0}")]
    Malformed(String),
}

/// Result type alias for sheet operations.
pub type Result<T> = std::result::Result<T, SheetsError>;
