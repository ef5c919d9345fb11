//! User snapshot store
//!
//! Whole-collection persistence: every save serializes the complete user list
//! and replaces the backing file; every load reads it back in full. There is
//! no incremental or transactional write, matching the application's
//! save-on-logout model.

use std::path::PathBuf;

use crate::error::WalletbookResult;
use crate::models::User;

use super::file_io::{read_json_or_default, write_json_atomic};

/// Persists the full user list as a single JSON snapshot
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    /// Create a store backed by the given snapshot file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load all users. A missing, unreadable, or corrupt snapshot yields an
    /// empty list; this never fails.
    pub fn load_all(&self) -> Vec<User> {
        read_json_or_default(&self.path)
    }

    /// Overwrite the snapshot with the given users
    pub fn save_all(&self, users: &[User]) -> WalletbookResult<()> {
        write_json_atomic(&self.path, &users)
    }
}
