//! Task repository contract and key-value store implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the persisted `tasks` collection.
//! - Keep JSON encoding details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate the record before any storage mutation.
//! - Every mutation re-serializes and rewrites the entire collection; the
//!   stored value is always a valid JSON array of task records.
//! - Insertion order of the collection is preserved across mutations.
//! - Malformed stored data is recovered to an empty collection on read,
//!   never surfaced as an error to the caller.

use crate::model::task::{Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
use crate::store::{KvStore, StoreError};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Storage key holding the JSON array of task records.
pub const TASKS_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for task persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Store(StoreError),
    Serialize(serde_json::Error),
    NotFound(TaskId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode task collection: {err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    /// Returns the full collection in insertion order. An absent or
    /// malformed `tasks` key reads as an empty collection.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Validates the draft, assigns a fresh unique id, appends the record
    /// and returns it as stored. Nothing is written on invalid input.
    fn create_task(&self, draft: &TaskDraft) -> RepoResult<Task>;
    /// Merges the supplied fields into the matching record and returns the
    /// updated task. A missing id is `RepoError::NotFound`; the collection
    /// is left untouched on any failure.
    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task>;
    /// Removes the matching record. Removing an id that does not exist is a
    /// no-op, not an error.
    fn remove_task(&self, id: TaskId) -> RepoResult<()>;
}

/// Key-value store backed task repository.
pub struct StoreTaskRepository<'s> {
    store: &'s KvStore,
}

impl<'s> StoreTaskRepository<'s> {
    pub fn new(store: &'s KvStore) -> Self {
        Self { store }
    }

    fn load(&self) -> RepoResult<Vec<Task>> {
        let Some(raw) = self.store.get_item(TASKS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => Ok(tasks),
            Err(err) => {
                warn!(
                    "event=tasks_load module=repo status=recovered error_code=malformed_tasks error={}",
                    err
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let encoded = serde_json::to_string(tasks).map_err(RepoError::Serialize)?;
        self.store.set_item(TASKS_KEY, &encoded)?;
        Ok(())
    }

    fn allocate_id(&self, existing: &[Task]) -> TaskId {
        // v4 collisions are not a practical concern, but uniqueness is a
        // stated contract, so check against the loaded collection anyway.
        loop {
            let id = Uuid::new_v4();
            if !existing.iter().any(|task| task.id == id) {
                return id;
            }
        }
    }
}

impl TaskRepository for StoreTaskRepository<'_> {
    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.load()
    }

    fn create_task(&self, draft: &TaskDraft) -> RepoResult<Task> {
        draft.validate()?;

        let mut tasks = self.load()?;
        let task = Task {
            id: self.allocate_id(&tasks),
            title: draft.title.clone(),
            description: draft.description.clone(),
            status: draft.status,
            board: draft.board.clone(),
        };
        tasks.push(task.clone());
        self.save(&tasks)?;
        Ok(task)
    }

    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        let mut tasks = self.load()?;
        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            return Err(RepoError::NotFound(id));
        };

        let mut updated = tasks[index].clone();
        patch.apply_to(&mut updated);
        updated.validate()?;

        tasks[index] = updated.clone();
        self.save(&tasks)?;
        Ok(updated)
    }

    fn remove_task(&self, id: TaskId) -> RepoResult<()> {
        let mut tasks = self.load()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);

        // Absent id: leave storage byte-for-byte unchanged.
        if tasks.len() == before {
            return Ok(());
        }

        self.save(&tasks)?;
        Ok(())
    }
}
