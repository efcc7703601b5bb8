//! One-time store bootstrap from the bundled default dataset.
//!
//! # Responsibility
//! - Populate an empty store with the bundled tasks and default preferences.
//! - Detect existing data and leave it untouched on every later run.
//!
//! # Invariants
//! - Bootstrap is idempotent: it writes only when the `tasks` key is absent.
//! - This is not a migration system; no schema versioning of task records.

use crate::model::task::Task;
use crate::repo::prefs_repo::{PrefsRepository, StorePrefsRepository};
use crate::repo::task_repo::{RepoError, RepoResult, TASKS_KEY};
use crate::store::KvStore;
use log::info;

const INITIAL_TASKS_JSON: &str = include_str!("initial_tasks.json");

/// Returns the bundled default dataset.
///
/// Decoding a bundled constant cannot fail for any shipped build; the error
/// path exists so a bad dataset fails loudly instead of seeding garbage.
pub fn initial_tasks() -> RepoResult<Vec<Task>> {
    serde_json::from_str(INITIAL_TASKS_JSON).map_err(RepoError::Serialize)
}

/// Seeds an empty store with the bundled dataset and default preferences.
///
/// Returns `true` when seeding happened, `false` when existing data was
/// detected and nothing was written.
pub fn initialize_store(store: &KvStore) -> RepoResult<bool> {
    if store.get_item(TASKS_KEY)?.is_some() {
        info!("event=store_seed module=seed status=skipped reason=existing_data");
        return Ok(false);
    }

    let tasks = initial_tasks()?;
    let encoded = serde_json::to_string(&tasks).map_err(RepoError::Serialize)?;
    store.set_item(TASKS_KEY, &encoded)?;
    StorePrefsRepository::new(store).set_sidebar_visible(true)?;

    info!(
        "event=store_seed module=seed status=ok task_count={}",
        tasks.len()
    );
    Ok(true)
}
