//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record persisted under the `tasks` key.
//! - Provide the draft/patch shapes used by create and update.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `status` always matches one of the fixed column identifiers.
//! - A patch cannot carry an id, so merging can never change one.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Ids are allocated exclusively by the repository's create path.
pub type TaskId = Uuid;

/// Workflow column a task occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Created but not started.
    Todo,
    /// Work is in progress.
    Doing,
    /// Completed.
    Done,
}

impl Status {
    /// Fixed column order used for rendering and grouping.
    pub const ALL: [Status; 3] = [Status::Todo, Status::Doing, Status::Done];

    /// Returns the column identifier used on the wire and in headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Doing => "doing",
            Status::Done => "done",
        }
    }

    /// Parses a column identifier. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Status> {
        match value {
            "todo" => Some(Status::Todo),
            "doing" => Some(Status::Doing),
            "done" => Some(Status::Done),
            _ => None,
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical task record, the element type of the persisted `tasks` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable id assigned at creation.
    pub id: TaskId,
    /// Short display text. Never empty for a persisted task.
    pub title: String,
    /// Free-form detail text. May be empty.
    pub description: String,
    /// Column the task currently occupies.
    pub status: Status,
    /// Name of the board the task belongs to. Tasks with an empty board
    /// name are persisted but never displayed.
    pub board: String,
}

/// Create input: every `Task` field except the id, which the repository
/// assigns on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub board: String,
}

impl TaskDraft {
    /// Checks the presence rules for create input.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title)
    }
}

/// Partial update: only supplied fields are merged into the stored record.
///
/// There is deliberately no `id` field here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub board: Option<String>,
}

impl TaskPatch {
    /// Patch that only moves a task to another column.
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Applies the supplied fields to `task`, leaving the rest unchanged.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(board) = &self.board {
            task.board = board.clone();
        }
    }
}

impl Task {
    /// Checks the presence rules for a stored or about-to-be-stored record.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_title(&self.title)
    }
}

/// Presence-check failures for task input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `title` is empty or whitespace-only.
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

fn validate_title(title: &str) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::EmptyTitle);
    }
    Ok(())
}
