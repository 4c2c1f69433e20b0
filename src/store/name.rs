//! File name sanitization and the stamped trash-name codec.
//!
//! Trash entries are stored under names of the form `<millis>_<original>`,
//! where `millis` is the deletion time in milliseconds since the Unix epoch.
//! The original name may itself contain `_`, so decoding splits at the
//! first separator only.

use crate::{CubbyError, Result};

/// Separator between the deletion stamp and the original name.
pub const STAMP_SEPARATOR: char = '_';

/// Sanitize a client-supplied file name for use under a managed root.
///
/// Strips any directory components (both `/` and `\` separators), which
/// neutralizes `..` traversal and absolute-path prefixes: only the final
/// path component survives. Fails with `InvalidName` if nothing usable
/// remains.
pub fn sanitize_file_name(raw: &str) -> Result<String> {
    let name = raw
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(CubbyError::InvalidName(raw.to_string()));
    }

    // Control characters (NUL, CR, LF) are never legal in a managed name.
    if name.chars().any(|c| c.is_control()) {
        return Err(CubbyError::InvalidName(raw.to_string()));
    }

    Ok(name.to_string())
}

/// A decoded trash entry key: deletion time plus the original file name.
///
/// The stringly `<millis>_<original>` form only exists at the storage
/// boundary; everything above it works with this record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StampedName {
    /// Deletion time in milliseconds since the Unix epoch.
    pub deleted_at_ms: i64,
    /// The file name as it appeared in the active store.
    pub original: String,
}

impl StampedName {
    /// Create a stamped name from a deletion time and an original name.
    pub fn new(deleted_at_ms: i64, original: impl Into<String>) -> Self {
        Self {
            deleted_at_ms,
            original: original.into(),
        }
    }

    /// Encode to the on-disk trash key: `<millis>_<original>`.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.deleted_at_ms, STAMP_SEPARATOR, self.original)
    }

    /// Decode a trash key, splitting at the first separator only.
    ///
    /// Returns `None` for keys with no separator, an unparseable stamp,
    /// or an empty original name.
    pub fn parse(stamped: &str) -> Option<Self> {
        let (stamp, original) = stamped.split_once(STAMP_SEPARATOR)?;
        let deleted_at_ms: i64 = stamp.parse().ok()?;

        if original.is_empty() {
            return None;
        }

        Some(Self {
            deleted_at_ms,
            original: original.to_string(),
        })
    }

    /// Age of this entry at `now_ms`, in milliseconds.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms - self.deleted_at_ms
    }
}
