//! Application controller state machine.
//!
//! Owns the current project and the current item batch. Transitions are
//! pure methods that return [`Effect`] values describing the fetch work to
//! start; the TUI layer performs the effects. Keeping the machine free of
//! IO makes the idempotence and supersession guarantees unit-testable.
//!
//! Every fetch is tagged with a generation number. Picking a project bumps
//! the generation, so a result arriving for an older pick is recognizably
//! stale and discarded: a slow response for project A can never clobber a
//! faster response already rendered for project B.

use presswatch_models::Project;
use presswatch_timeline::MappedBatch;

use super::fetch::LoadError;

/// Controller states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Directory fetch in flight; nothing selectable yet.
    Starting,
    /// Directory loaded, no project chosen.
    Selector,
    /// Project fetch in flight.
    Loading,
    /// Items rendered; an empty batch is a sub-state, not an error.
    Timeline,
    /// Last operation failed; retry available.
    Error,
}

/// Fetch work requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the project directory.
    LoadDirectory,
    /// Fetch and map one project's sheet.
    LoadProject {
        /// Sheet to fetch.
        project_id: String,
        /// Tag echoed back with the result.
        generation: u64,
    },
}

/// What retry should re-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryTarget {
    Directory,
    Project(String),
}

/// Details of the error state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    /// User-facing message.
    pub message: String,
    /// True for the softer "no coverage yet" case.
    pub soft: bool,
    /// What retry re-runs.
    pub retry: RetryTarget,
}

/// The application controller.
#[derive(Debug)]
pub struct Controller {
    /// Current state.
    pub state: State,
    /// Directory contents, loaded once.
    pub projects: Vec<Project>,
    /// Currently displayed project.
    pub active: Option<String>,
    /// Current item batch, replaced wholesale on every selection.
    pub batch: MappedBatch,
    /// Error details while in [`State::Error`].
    pub error: Option<ErrorState>,
    generation: u64,
    in_flight: Option<String>,
}

impl Controller {
    /// Creates the controller in its initial state.
    pub fn new() -> Self {
        Self {
            state: State::Starting,
            projects: Vec::new(),
            active: None,
            batch: MappedBatch::default(),
            error: None,
            generation: 0,
            in_flight: None,
        }
    }

    /// First effect to perform after construction.
    pub fn begin(&self) -> Effect {
        Effect::LoadDirectory
    }

    /// Directory fetch succeeded.
    pub fn directory_loaded(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.error = None;
        self.state = State::Selector;
    }

    /// Directory fetch failed.
    pub fn directory_failed(&mut self, error: &LoadError) {
        self.error = Some(ErrorState {
            message: error.to_string(),
            soft: false,
            retry: RetryTarget::Directory,
        });
        self.state = State::Error;
    }

    /// User picked a project.
    ///
    /// Re-picking the displayed project, or the one already being fetched,
    /// is a no-op so at most one fetch per project is ever in flight.
    pub fn pick_project(&mut self, project_id: &str) -> Option<Effect> {
        if self.state == State::Timeline && self.active.as_deref() == Some(project_id) {
            return None;
        }
        if self.state == State::Loading && self.in_flight.as_deref() == Some(project_id) {
            return None;
        }

        self.generation += 1;
        self.in_flight = Some(project_id.to_string());
        self.error = None;
        self.state = State::Loading;

        Some(Effect::LoadProject {
            project_id: project_id.to_string(),
            generation: self.generation,
        })
    }

    /// Project fetch succeeded. Returns false when the result was stale
    /// and discarded.
    pub fn project_loaded(&mut self, generation: u64, batch: MappedBatch) -> bool {
        if generation != self.generation {
            return false;
        }

        self.active = self.in_flight.take();
        self.batch = batch;
        self.error = None;
        // An empty batch still lands in Timeline; the view shows an
        // explicit empty message.
        self.state = State::Timeline;
        true
    }

    /// Project fetch failed. Stale failures are discarded.
    pub fn project_failed(&mut self, generation: u64, error: &LoadError) -> bool {
        if generation != self.generation {
            return false;
        }

        let soft = matches!(error, LoadError::NotFound(_));
        let message = if soft {
            "No media coverage recorded yet for this project.".to_string()
        } else {
            error.to_string()
        };
        let project = self.in_flight.take().unwrap_or_default();

        self.error = Some(ErrorState {
            message,
            soft,
            retry: RetryTarget::Project(project),
        });
        self.state = State::Error;
        true
    }

    /// User deselected; back to the selector, current batch discarded.
    /// Bumping the generation makes any in-flight result stale.
    pub fn deselect(&mut self) {
        self.generation += 1;
        self.in_flight = None;
        self.active = None;
        self.batch = MappedBatch::default();
        self.error = None;
        self.state = State::Selector;
    }

    /// Re-run the failed operation.
    pub fn retry(&mut self) -> Option<Effect> {
        let retry = self.error.as_ref()?.retry.clone();
        match retry {
            RetryTarget::Directory => {
                self.error = None;
                self.state = State::Starting;
                Some(Effect::LoadDirectory)
            }
            RetryTarget::Project(project_id) => {
                // Clear the error first so the pick guard cannot
                // short-circuit the retry.
                self.error = None;
                self.pick_project(&project_id)
            }
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
