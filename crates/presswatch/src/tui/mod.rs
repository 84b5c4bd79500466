//! Terminal user interface.
//!
//! A small set of views driven by the [`controller::Controller`] state
//! machine:
//! - project selector with fuzzy filtering
//! - loading view while a sheet fetch is in flight
//! - timeline view with a pannable axis and a detail pane
//! - error view with retry
//!
//! Sheet fetches run on a background tokio runtime; see [`fetch`].

mod app;
mod controller;
mod events;
mod fetch;
mod theme;
mod timeline;
mod ui;

pub use app::App;
pub use controller::{Controller, Effect, State};
pub use events::run;
