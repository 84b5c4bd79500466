//! Public spreadsheet access for Presswatch.
//!
//! This crate talks to the gviz JSON export of a public Google spreadsheet
//! and turns sheet tabs into row maps keyed by header-row column names. On
//! top of that it provides schema validation and the two loaders the rest
//! of the system uses: the project directory and a single project's media
//! events.
//!
//! Nothing here is authenticated; the spreadsheet must be shared publicly.

pub mod error;
pub mod gviz;
pub mod loader;
pub mod validate;

pub use error::{Result, SheetsError};
pub use gviz::{SheetClient, SheetRow, SheetSelector};
pub use loader::{load_directory, load_project_events, DEFAULT_DIRECTORY_SHEET};
pub use validate::missing_columns;
