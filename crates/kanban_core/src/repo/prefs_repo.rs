//! User preference repository over the key-value store.
//!
//! # Responsibility
//! - Persist the active board selection, sidebar visibility and theme.
//! - Own the legacy value encodings of each preference key.
//!
//! # Invariants
//! - `activeBoard` holds a JSON-encoded string; malformed values read as
//!   absent rather than erroring.
//! - `showSideBar` holds the raw strings `"true"`/`"false"`; anything else
//!   reads as the default (visible).
//! - `light-theme` holds the raw strings `"enabled"`/`"disabled"`; anything
//!   else reads as the default (dark).

use crate::repo::task_repo::{RepoError, RepoResult};
use crate::store::KvStore;

/// Storage key holding the JSON-encoded active board name.
pub const ACTIVE_BOARD_KEY: &str = "activeBoard";
/// Storage key holding the sidebar visibility flag.
pub const SHOW_SIDEBAR_KEY: &str = "showSideBar";
/// Storage key holding the theme preference.
pub const THEME_KEY: &str = "light-theme";

/// Display theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Returns the stored flag value for this theme.
    pub fn as_flag(self) -> &'static str {
        match self {
            Theme::Light => "enabled",
            Theme::Dark => "disabled",
        }
    }
}

/// Repository interface for persisted user preferences.
pub trait PrefsRepository {
    /// Returns the stored board selection, if any. The caller decides
    /// whether the name still refers to an existing board.
    fn active_board(&self) -> RepoResult<Option<String>>;
    /// Persists the board selection.
    fn set_active_board(&self, board: &str) -> RepoResult<()>;
    /// Returns the sidebar visibility preference, defaulting to visible.
    fn sidebar_visible(&self) -> RepoResult<bool>;
    /// Persists the sidebar visibility preference.
    fn set_sidebar_visible(&self, visible: bool) -> RepoResult<()>;
    /// Returns the theme preference, defaulting to dark.
    fn theme(&self) -> RepoResult<Theme>;
    /// Persists the theme preference.
    fn set_theme(&self, theme: Theme) -> RepoResult<()>;
}

/// Key-value store backed preferences repository.
pub struct StorePrefsRepository<'s> {
    store: &'s KvStore,
}

impl<'s> StorePrefsRepository<'s> {
    pub fn new(store: &'s KvStore) -> Self {
        Self { store }
    }
}

impl PrefsRepository for StorePrefsRepository<'_> {
    fn active_board(&self) -> RepoResult<Option<String>> {
        let Some(raw) = self.store.get_item(ACTIVE_BOARD_KEY)? else {
            return Ok(None);
        };
        // Stored as a JSON string; a malformed value reads as no selection.
        Ok(serde_json::from_str::<String>(&raw).ok())
    }

    fn set_active_board(&self, board: &str) -> RepoResult<()> {
        let encoded = serde_json::to_string(board).map_err(RepoError::Serialize)?;
        self.store.set_item(ACTIVE_BOARD_KEY, &encoded)?;
        Ok(())
    }

    fn sidebar_visible(&self) -> RepoResult<bool> {
        let stored = self.store.get_item(SHOW_SIDEBAR_KEY)?;
        Ok(stored.as_deref() != Some("false"))
    }

    fn set_sidebar_visible(&self, visible: bool) -> RepoResult<()> {
        let flag = if visible { "true" } else { "false" };
        self.store.set_item(SHOW_SIDEBAR_KEY, flag)?;
        Ok(())
    }

    fn theme(&self) -> RepoResult<Theme> {
        let stored = self.store.get_item(THEME_KEY)?;
        let theme = match stored.as_deref() {
            Some("enabled") => Theme::Light,
            _ => Theme::Dark,
        };
        Ok(theme)
    }

    fn set_theme(&self, theme: Theme) -> RepoResult<()> {
        self.store.set_item(THEME_KEY, theme.as_flag())?;
        Ok(())
    }
}
