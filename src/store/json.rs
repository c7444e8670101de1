//! One pretty-printed JSON document per user under a directory.
//!
//! Several processes may share a directory (each CLI invocation is one).
//! A read-modify-write holds `<id>.lock`, created with `create_new`, and
//! saves go through a uniquely named temp file renamed over the record.

use super::{RecordLock, UserStore};
use crate::core::constants::{LOCK_POLL_INTERVAL, LOCK_STALE_AFTER, LOCK_WAIT_TIMEOUT};
use crate::core::error::{LoyaltyError, Result};
use crate::profile::UserRecord;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime};
use tempfile::NamedTempFile;
use uuid::Uuid;

pub struct JsonUserStore {
    dir: PathBuf,
    lock_timeout: Duration,
}

impl JsonUserStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            lock_timeout: LOCK_WAIT_TIMEOUT,
        })
    }

    /// How long `lock_record` waits for another holder before failing.
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn lock_path_for(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.lock", id))
    }
}

/// True if the lock file was last touched longer ago than `LOCK_STALE_AFTER`,
/// i.e. its holder most likely died without cleaning up.
fn is_stale(path: &Path) -> bool {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .and_then(|modified| SystemTime::now().duration_since(modified).ok())
        .is_some_and(|age| age > LOCK_STALE_AFTER)
}

impl UserStore for JsonUserStore {
    fn load(&self, id: Uuid) -> Result<UserRecord> {
        let json = match fs::read_to_string(self.path_for(id)) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoyaltyError::not_found("user", id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, record: &UserRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;

        // Write beside the target then rename, so readers never see half a file
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(record.id))
            .map_err(|e| LoyaltyError::Storage(e.error))?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<UserRecord>> {
        let mut users = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();

            // Only process .json files
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let parsed = fs::read_to_string(&path)
                .map_err(LoyaltyError::from)
                .and_then(|json| serde_json::from_str::<UserRecord>(&json).map_err(Into::into));
            match parsed {
                Ok(user) => users.push(user),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable user record");
                }
            }
        }

        Ok(users)
    }

    fn lock_record(&self, id: Uuid) -> Result<RecordLock> {
        let path = self.lock_path_for(id);
        let started = Instant::now();

        loop {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(RecordLock::file(path)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e.into()),
            }

            if is_stale(&path) {
                tracing::warn!(path = %path.display(), "Removing stale record lock");
                match fs::remove_file(&path) {
                    Ok(()) => continue,
                    Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                    Err(e) => return Err(e.into()),
                }
            }

            if started.elapsed() >= self.lock_timeout {
                return Err(LoyaltyError::Storage(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("user {} is locked by another process", id),
                )));
            }
            thread::sleep(LOCK_POLL_INTERVAL);
        }
    }
}
