//! File service for Cubby.
//!
//! The service owns the active and trash stores and implements the
//! lifecycle between them: soft delete stamps the deletion time onto the
//! file name and moves it into trash, restore strips the stamp and moves
//! it back, and the purge sweep permanently removes entries older than the
//! retention window.
//!
//! Every name-bearing input is sanitized here before it touches a store.
//! Mutations of a given trash entry (restore, purge-unlink, a delete
//! landing on that key) serialize through a per-entry lock table, so a
//! background sweep racing a user-triggered restore resolves to a clean
//! `NotFound` for the loser. Moves between the stores are single renames,
//! never copy-then-delete.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{debug, warn};

use super::active::ActiveStore;
use super::name::{sanitize_file_name, StampedName};
use super::trash::TrashStore;
use crate::{CubbyError, Result};

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// File service managing the active store, the trash store and the
/// lifecycle between them.
pub struct FileService {
    active: ActiveStore,
    trash: TrashStore,
    /// Per-stamped-name locks serializing trash entry mutations.
    entry_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl FileService {
    /// Create a new FileService with stores rooted at the given paths.
    ///
    /// Both directories are created if they don't exist.
    pub fn new(active_root: impl Into<PathBuf>, trash_root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            active: ActiveStore::new(active_root)?,
            trash: TrashStore::new(trash_root)?,
            entry_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Get the active store.
    pub fn active(&self) -> &ActiveStore {
        &self.active
    }

    /// Get the trash store.
    pub fn trash(&self) -> &TrashStore {
        &self.trash
    }

    /// Get (or create) the lock for a stamped entry.
    ///
    /// Stale entries (no other holder) are pruned on each call so the
    /// table stays bounded by the number of in-flight operations.
    fn entry_lock(&self, stamped: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .entry_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(stamped.to_string()).or_default().clone()
    }

    /// Create a new file in the active store.
    pub fn create(&self, name: &str, content: &[u8]) -> Result<String> {
        let name = sanitize_file_name(name)?;
        self.active.create(&name, content)?;
        Ok(name)
    }

    /// Read the full content of an active file.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let name = sanitize_file_name(name)?;
        self.active.read(&name)
    }

    /// Overwrite the content of an existing active file.
    pub fn update(&self, name: &str, content: &[u8]) -> Result<String> {
        let name = sanitize_file_name(name)?;
        self.active.update(&name, content)?;
        Ok(name)
    }

    /// List the active file names, sorted.
    pub fn list_active(&self) -> Result<Vec<String>> {
        self.active.list()
    }

    /// Soft-delete an active file, moving it to trash under a stamped name.
    ///
    /// Returns the stamped trash name.
    pub fn delete(&self, name: &str) -> Result<String> {
        self.delete_at(name, now_ms())
    }

    /// Soft-delete with an injected deletion time.
    ///
    /// The stamp is advanced millisecond by millisecond when the candidate
    /// trash key is already taken, so an existing entry is never
    /// overwritten. The move itself is a single rename.
    pub fn delete_at(&self, name: &str, now_ms: i64) -> Result<String> {
        let name = sanitize_file_name(name)?;

        if !self.active.exists(&name) {
            return Err(CubbyError::NotFound(name));
        }

        let mut stamp = now_ms;
        loop {
            let stamped = StampedName::new(stamp, name.clone()).encode();
            let lock = self.entry_lock(&stamped);
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

            if self.trash.exists(&stamped) {
                stamp += 1;
                continue;
            }

            return match fs::rename(self.active.path_for(&name), self.trash.path_for(&stamped)) {
                Ok(()) => {
                    debug!(file = %name, trashed_as = %stamped, "File moved to trash");
                    Ok(stamped)
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // The active entry vanished between the check and the move.
                    Err(CubbyError::NotFound(name))
                }
                Err(e) => Err(e.into()),
            };
        }
    }

    /// Restore a trashed file back into the active store.
    ///
    /// The stamped name is decoded to recover the original file name.
    /// Fails with `Conflict` when the destination already exists; the
    /// trash entry is left untouched in that case. Returns the restored
    /// file name.
    pub fn restore(&self, stamped: &str) -> Result<String> {
        let stamped = sanitize_file_name(stamped)?;
        let decoded = StampedName::parse(&stamped)
            .ok_or_else(|| CubbyError::InvalidName(stamped.clone()))?;

        let lock = self.entry_lock(&stamped);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        if !self.trash.exists(&stamped) {
            return Err(CubbyError::NotFound(stamped));
        }

        if self.active.exists(&decoded.original) {
            return Err(CubbyError::Conflict(decoded.original));
        }

        match fs::rename(
            self.trash.path_for(&stamped),
            self.active.path_for(&decoded.original),
        ) {
            Ok(()) => {
                debug!(entry = %stamped, restored_as = %decoded.original, "File restored from trash");
                Ok(decoded.original)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // The purge sweep won the race on this entry.
                Err(CubbyError::NotFound(stamped))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List trash entry names, sorted.
    ///
    /// With `within_window` set, entries older than the retention window
    /// (and entries whose stamp does not parse) are filtered out.
    pub fn list_trash(&self, within_window: bool) -> Result<Vec<String>> {
        self.list_trash_at(within_window, now_ms())
    }

    /// List trash entry names against an injected clock value.
    pub fn list_trash_at(&self, within_window: bool, now_ms: i64) -> Result<Vec<String>> {
        if within_window {
            self.trash.list_within_window(now_ms)
        } else {
            self.trash.list_stamped()
        }
    }

    /// Permanently remove every trash entry older than the retention
    /// window at `now_ms`.
    ///
    /// Each entry is removed under its lock, so a concurrent restore of
    /// the same entry either completes first or observes `NotFound`.
    /// A failed unlink is logged and skipped; one bad entry never blocks
    /// purging the rest. Idempotent: a second sweep at the same clock
    /// value removes nothing.
    ///
    /// Returns the number of entries removed.
    pub fn purge(&self, now_ms: i64) -> Result<usize> {
        let mut removed = 0;

        for stamped in self.trash.list_expired(now_ms)? {
            let lock = self.entry_lock(&stamped);
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

            match self.trash.remove(&stamped) {
                Ok(true) => removed += 1,
                Ok(false) => {
                    // Raced with a restore; the entry is no longer ours to purge.
                }
                Err(e) => {
                    warn!(entry = %stamped, error = %e, "Failed to purge trash entry");
                }
            }
        }

        Ok(removed)
    }
}
