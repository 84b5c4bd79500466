//! TUI application state.
//!
//! Wraps the [`Controller`] with view concerns: the selector's fuzzy
//! filter and cursor, the timeline's pan/zoom state, and the channel pair
//! to the fetch worker. The event loop forwards key events here and drains
//! the worker's messages once per tick.

use std::sync::mpsc;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use tokio::sync::mpsc::UnboundedSender;

use super::controller::{Controller, Effect, State};
use super::fetch::{FetchCommand, FetchMessage};
use super::timeline::TimelineState;

/// Spinner frames for the loading views.
pub const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct App {
    /// The state machine driving which view is shown.
    pub controller: Controller,
    /// Selector filter text.
    pub filter: String,
    /// Cursor position within the filtered project list.
    pub selected: usize,
    /// Timeline pan/zoom/selection.
    pub timeline_state: TimelineState,
    /// Refit the timeline on the next draw (set after a load).
    pub pending_fit: bool,
    /// Advances every tick; drives the spinner.
    pub spinner_frame: usize,
    /// Set to exit the event loop.
    pub should_quit: bool,

    cmd_tx: UnboundedSender<FetchCommand>,
    msg_rx: mpsc::Receiver<FetchMessage>,
    matcher: SkimMatcherV2,
    /// Project to open once the directory arrives (`--project` flag).
    pending_project: Option<String>,
}

impl App {
    /// Creates the app and requests the initial directory load.
    pub fn new(
        cmd_tx: UnboundedSender<FetchCommand>,
        msg_rx: mpsc::Receiver<FetchMessage>,
        initial_project: Option<String>,
    ) -> Self {
        let app = Self {
            controller: Controller::new(),
            filter: String::new(),
            selected: 0,
            timeline_state: TimelineState::default(),
            pending_fit: false,
            spinner_frame: 0,
            should_quit: false,
            cmd_tx,
            msg_rx,
            matcher: SkimMatcherV2::default(),
            pending_project: initial_project,
        };
        app.dispatch(app.controller.begin());
        app
    }

    /// Indices into `controller.projects` matching the filter, best first.
    pub fn filtered_projects(&self) -> Vec<usize> {
        if self.filter.is_empty() {
            return (0..self.controller.projects.len()).collect();
        }

        let mut scored: Vec<(i64, usize)> = self
            .controller
            .projects
            .iter()
            .enumerate()
            .filter_map(|(index, project)| {
                let haystack = format!(
                    "{} {} {}",
                    project.project_id, project.project_name, project.category
                );
                self.matcher
                    .fuzzy_match(&haystack, &self.filter)
                    .map(|score| (score, index))
            })
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, index)| index).collect()
    }

    /// Moves the selector cursor, clamped to the filtered list.
    pub fn move_selection(&mut self, delta: i64) {
        let len = self.filtered_projects().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected.min(len - 1) as i64;
        self.selected = (current + delta).clamp(0, len as i64 - 1) as usize;
    }

    /// Types into the filter and resets the cursor.
    pub fn push_filter(&mut self, c: char) {
        self.filter.push(c);
        self.selected = 0;
    }

    /// Deletes the last filter character.
    pub fn pop_filter(&mut self) {
        self.filter.pop();
        self.selected = 0;
    }

    /// Picks the project under the cursor.
    pub fn pick_selected(&mut self) {
        let filtered = self.filtered_projects();
        let Some(&index) = filtered.get(self.selected.min(filtered.len().saturating_sub(1))) else {
            return;
        };
        let project_id = self.controller.projects[index].project_id.clone();
        self.pick(&project_id);
    }

    /// Picks a project by id, dispatching the fetch if one is needed.
    pub fn pick(&mut self, project_id: &str) {
        if let Some(effect) = self.controller.pick_project(project_id) {
            self.dispatch(effect);
        }
    }

    /// Leaves the timeline or error view for the selector.
    pub fn deselect(&mut self) {
        self.controller.deselect();
        self.timeline_state = TimelineState::default();
    }

    /// Retries the failed operation.
    pub fn retry(&mut self) {
        if let Some(effect) = self.controller.retry() {
            self.dispatch(effect);
        }
    }

    /// Drains worker messages and advances the spinner. Called every tick.
    pub fn on_tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);

        while let Ok(message) = self.msg_rx.try_recv() {
            self.apply(message);
        }
    }

    fn apply(&mut self, message: FetchMessage) {
        match message {
            FetchMessage::DirectoryLoaded(projects) => {
                self.controller.directory_loaded(projects);
                self.selected = 0;
                if let Some(project_id) = self.pending_project.take() {
                    self.pick(&project_id);
                }
            }
            FetchMessage::DirectoryFailed(error) => {
                self.controller.directory_failed(&error);
            }
            FetchMessage::ProjectLoaded { generation, batch } => {
                if self.controller.project_loaded(generation, batch) {
                    self.timeline_state = TimelineState::default();
                    self.pending_fit = true;
                }
            }
            FetchMessage::ProjectFailed { generation, error } => {
                self.controller.project_failed(generation, &error);
            }
        }
    }

    /// Name of the active project, for the timeline header.
    pub fn active_project_name(&self) -> Option<&str> {
        let active = self.controller.active.as_deref()?;
        self.controller
            .projects
            .iter()
            .find(|p| p.project_id == active)
            .map(|p| p.project_name.as_str())
            .or(Some(active))
    }

    /// Current spinner glyph.
    pub fn spinner(&self) -> &'static str {
        SPINNER[self.spinner_frame % SPINNER.len()]
    }

    /// Current state, shorthand for the views.
    pub fn state(&self) -> State {
        self.controller.state
    }

    fn dispatch(&self, effect: Effect) {
        let command = match effect {
            Effect::LoadDirectory => FetchCommand::LoadDirectory,
            Effect::LoadProject {
                project_id,
                generation,
            } => FetchCommand::LoadProject {
                project_id,
                generation,
            },
        };
        // A send failure means the worker is gone; the app is shutting
        // down anyway.
        let _ = self.cmd_tx.send(command);
    }
}
