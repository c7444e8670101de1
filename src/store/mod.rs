//! User record persistence.
//!
//! The engine only needs load/save by id plus a full listing for the
//! leaderboard. The surrounding storefront normally provides its own
//! implementation over its document store.
//!
//! Stores shared between processes also hand out a [`RecordLock`] so a
//! read-modify-write of one user is exclusive across all of them.

pub mod json;
pub mod memory;

pub use json::JsonUserStore;
pub use memory::MemoryUserStore;

use crate::core::error::Result;
use crate::profile::UserRecord;
use std::fs;
use std::path::PathBuf;
use uuid::Uuid;

pub trait UserStore: Send + Sync {
    /// Load one user, or `LoyaltyError::NotFound`.
    fn load(&self, id: Uuid) -> Result<UserRecord>;

    /// Insert or replace a user. Must be all-or-nothing.
    fn save(&self, record: &UserRecord) -> Result<()>;

    /// Snapshot of every user. No ordering guarantee.
    fn list(&self) -> Result<Vec<UserRecord>>;

    /// Exclusive access to one user's record until the returned guard drops.
    ///
    /// The engine already serializes callers within one process; stores that
    /// live in a single process keep this default.
    fn lock_record(&self, _id: Uuid) -> Result<RecordLock> {
        Ok(RecordLock::unlocked())
    }
}

/// Guard returned by [`UserStore::lock_record`].
///
/// A file-backed lock removes its lock file on drop.
#[derive(Debug)]
#[must_use]
pub struct RecordLock {
    path: Option<PathBuf>,
}

impl RecordLock {
    /// A guard that holds nothing.
    pub fn unlocked() -> Self {
        Self { path: None }
    }

    /// Guard owning the lock file at `path`.
    pub fn file(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn is_held(&self) -> bool {
        self.path.is_some()
    }
}

impl Drop for RecordLock {
    fn drop(&mut self) {
        if let Some(path) = &self.path {
            if let Err(e) = fs::remove_file(path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to release record lock");
            }
        }
    }
}
