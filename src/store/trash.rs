//! The trash store: the directory of soft-deleted files pending purge.
//!
//! Entries are plain files named `<millis>_<original>`, where `millis` is
//! the deletion time. The store only deals in stamped names; moving files
//! in and out, and the locked purge sweep, are the service layer's job.

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::name::StampedName;
use crate::store::RETENTION_WINDOW_MS;
use crate::Result;

/// Directory of soft-deleted files keyed by stamped names.
#[derive(Debug, Clone)]
pub struct TrashStore {
    /// Root directory for trashed files.
    root: PathBuf,
}

impl TrashStore {
    /// Create a new TrashStore rooted at the given path.
    ///
    /// The root directory will be created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Get the root path of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the full path for a stamped name within the store.
    pub fn path_for(&self, stamped: &str) -> PathBuf {
        self.root.join(stamped)
    }

    /// Check if a stamped entry exists.
    pub fn exists(&self, stamped: &str) -> bool {
        self.path_for(stamped).is_file()
    }

    /// Whether an entry would be expired at `now_ms`.
    ///
    /// Entries with an unparseable stamp are treated as infinitely old,
    /// so they always count as expired.
    pub fn is_expired(stamped: &str, now_ms: i64) -> bool {
        match StampedName::parse(stamped) {
            Some(decoded) => decoded.age_ms(now_ms) > RETENTION_WINDOW_MS,
            None => true,
        }
    }

    /// List all stamped entry names present, sorted.
    pub fn list_stamped(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.path().is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    /// List stamped entries still within the retention window at `now_ms`.
    ///
    /// Entries whose stamp does not parse are excluded from the result but
    /// are left on disk; only the purge sweep deletes.
    pub fn list_within_window(&self, now_ms: i64) -> Result<Vec<String>> {
        let names = self
            .list_stamped()?
            .into_iter()
            .filter(|stamped| match StampedName::parse(stamped) {
                Some(decoded) => decoded.age_ms(now_ms) <= RETENTION_WINDOW_MS,
                None => false,
            })
            .collect();

        Ok(names)
    }

    /// List stamped entries whose age at `now_ms` exceeds the retention
    /// window, including entries with an unparseable stamp.
    pub fn list_expired(&self, now_ms: i64) -> Result<Vec<String>> {
        let names = self
            .list_stamped()?
            .into_iter()
            .filter(|stamped| Self::is_expired(stamped, now_ms))
            .collect();

        Ok(names)
    }

    /// Remove a single stamped entry.
    ///
    /// Returns `true` if the entry was removed, `false` if it didn't exist.
    pub fn remove(&self, stamped: &str) -> Result<bool> {
        match fs::remove_file(self.path_for(stamped)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
