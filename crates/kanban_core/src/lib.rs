//! Core domain logic for the kanban task board.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{Status, Task, TaskDraft, TaskId, TaskPatch, TaskValidationError};
pub use repo::prefs_repo::{PrefsRepository, StorePrefsRepository, Theme};
pub use repo::task_repo::{RepoError, RepoResult, StoreTaskRepository, TaskRepository};
pub use seed::{initial_tasks, initialize_store};
pub use service::board_service::{BoardService, BoardView, Column};
pub use store::{open_store, open_store_in_memory, KvStore, StoreError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
