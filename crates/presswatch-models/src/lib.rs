//! Core data models for Presswatch.
//!
//! This crate provides the record shapes shared across the Presswatch
//! system: projects from the directory sheet and media events from the
//! per-project sheets. Rows arrive from the spreadsheet collaborator as
//! loosely keyed string maps; they are converted into these records once,
//! at the boundary, so downstream code never re-checks field presence.

pub mod event;
pub mod project;

pub use event::MediaEvent;
pub use project::Project;
