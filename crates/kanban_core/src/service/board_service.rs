//! Board use-case service.
//!
//! # Responsibility
//! - Derive boards and column views from the persisted task collection.
//! - Resolve and persist the active board selection.
//! - Provide stable CRUD entry points for presentation callers.
//!
//! # Invariants
//! - Boards have no stored identity; they exist exactly while at least one
//!   task carries their non-empty name.
//! - No hidden shared state: every call reads fresh persisted state and
//!   returns it, so a render after a mutation always sees the write.

use crate::model::task::{Status, Task, TaskDraft, TaskId, TaskPatch};
use crate::repo::prefs_repo::{PrefsRepository, Theme};
use crate::repo::task_repo::{RepoResult, TaskRepository};

/// One rendered column: a status and the board's tasks occupying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub status: Status,
    pub tasks: Vec<Task>,
}

/// Full render model for one board, one column per known status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub board: String,
    pub columns: Vec<Column>,
}

/// Use-case service combining task and preference persistence.
pub struct BoardService<R: TaskRepository, P: PrefsRepository> {
    tasks: R,
    prefs: P,
}

impl<R: TaskRepository, P: PrefsRepository> BoardService<R, P> {
    /// Creates a service over the provided repository implementations.
    pub fn new(tasks: R, prefs: P) -> Self {
        Self { tasks, prefs }
    }

    /// Returns distinct non-empty board names in first-appearance order.
    pub fn boards(&self) -> RepoResult<Vec<String>> {
        let tasks = self.tasks.list_tasks()?;
        let mut boards: Vec<String> = Vec::new();
        for task in &tasks {
            if task.board.is_empty() {
                continue;
            }
            if !boards.iter().any(|name| name == &task.board) {
                boards.push(task.board.clone());
            }
        }
        Ok(boards)
    }

    /// Resolves the board to display.
    ///
    /// The stored selection wins while it still names an existing board;
    /// otherwise the first derived board is used. `None` means there are no
    /// boards at all.
    pub fn active_board(&self) -> RepoResult<Option<String>> {
        let boards = self.boards()?;
        if boards.is_empty() {
            return Ok(None);
        }

        if let Some(stored) = self.prefs.active_board()? {
            if boards.iter().any(|name| name == &stored) {
                return Ok(Some(stored));
            }
        }

        Ok(boards.first().cloned())
    }

    /// Persists `board` as the active selection.
    pub fn switch_board(&self, board: &str) -> RepoResult<()> {
        self.prefs.set_active_board(board)
    }

    /// Builds the column view for `board` from a fresh read.
    ///
    /// Tasks keep collection insertion order within their column. Statuses
    /// with no tasks still produce an (empty) column.
    pub fn board_view(&self, board: &str) -> RepoResult<BoardView> {
        let tasks = self.tasks.list_tasks()?;
        let columns = Status::ALL
            .iter()
            .map(|&status| Column {
                status,
                tasks: tasks
                    .iter()
                    .filter(|task| task.board == board && task.status == status)
                    .cloned()
                    .collect(),
            })
            .collect();

        Ok(BoardView {
            board: board.to_string(),
            columns,
        })
    }

    /// Returns the full task collection in insertion order.
    pub fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        self.tasks.list_tasks()
    }

    /// Creates a task from the draft and returns it with its assigned id.
    pub fn add_task(&self, draft: &TaskDraft) -> RepoResult<Task> {
        self.tasks.create_task(draft)
    }

    /// Merges `patch` into the task identified by `id`.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn edit_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        self.tasks.update_task(id, patch)
    }

    /// Deletes the task identified by `id`. Deleting twice is a no-op.
    pub fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.tasks.remove_task(id)
    }

    /// Returns the sidebar visibility preference.
    pub fn sidebar_visible(&self) -> RepoResult<bool> {
        self.prefs.sidebar_visible()
    }

    /// Persists the sidebar visibility preference.
    pub fn set_sidebar_visible(&self, visible: bool) -> RepoResult<()> {
        self.prefs.set_sidebar_visible(visible)
    }

    /// Returns the theme preference.
    pub fn theme(&self) -> RepoResult<Theme> {
        self.prefs.theme()
    }

    /// Persists the theme preference.
    pub fn set_theme(&self, theme: Theme) -> RepoResult<()> {
        self.prefs.set_theme(theme)
    }
}
