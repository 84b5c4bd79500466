//! Error types for the normalization pipeline.

use thiserror::Error;

/// Failure to turn raw sheet text into a calendar date.
///
/// Row level and recoverable: callers drop the affected row instead of
/// failing the batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The cell was empty or whitespace.
    #[error("empty date cell")]
    Empty,

    /// The text matched no accepted date shape or named an impossible day.
    #[error("unrecognized date: '{0}'")]
    Unrecognized(String),
}
