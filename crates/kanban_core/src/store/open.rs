//! Connection bootstrap and the string key-value API.
//!
//! # Responsibility
//! - Open file or in-memory stores and configure connection pragmas.
//! - Trigger schema migrations before returning a usable store.
//! - Expose the string-keyed get/set/remove surface the repositories use.
//!
//! # Invariants
//! - Returned stores have migrations fully applied.
//! - `set_item` replaces any previous value for the key (last write wins).

use super::migrations::apply_migrations;
use super::StoreResult;
use log::{error, info};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Durable string-keyed value store, the sole persistence surface of core.
///
/// Values are opaque UTF-8 strings; the repositories decide the encoding
/// (JSON for the task collection, raw flags for preferences).
pub struct KvStore {
    conn: Connection,
}

impl KvStore {
    /// Returns the stored value for `key`, or `None` when the key is absent.
    pub fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value;",
            [key, value],
        )?;
        Ok(())
    }

    /// Removes `key` if present. Removing an absent key is a no-op.
    pub fn remove_item(&self, key: &str) -> StoreResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Opens a store file and applies all pending migrations.
///
/// # Side effects
/// - Performs connection bootstrap and migration checks.
/// - Emits `store_open` logging events with duration and status.
pub fn open_store(path: impl AsRef<Path>) -> StoreResult<KvStore> {
    let started_at = Instant::now();
    info!("event=store_open module=store status=start mode=file");

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=store_open module=store status=error mode=file duration_ms={} error_code=store_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, "file", started_at)
}

/// Opens an in-memory store and applies all pending migrations.
///
/// Used by tests and throwaway sessions; same bootstrap path as files.
pub fn open_store_in_memory() -> StoreResult<KvStore> {
    let started_at = Instant::now();
    info!("event=store_open module=store status=start mode=memory");

    let conn = match Connection::open_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=store_open module=store status=error mode=memory duration_ms={} error_code=store_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    finish_open(conn, "memory", started_at)
}

fn finish_open(mut conn: Connection, mode: &str, started_at: Instant) -> StoreResult<KvStore> {
    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=store_open module=store status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(KvStore { conn })
        }
        Err(err) => {
            error!(
                "event=store_open module=store status=error mode={} duration_ms={} error_code=store_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(conn)?;
    Ok(())
}
