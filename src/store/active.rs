//! The active store: the directory of live, user-visible files.
//!
//! Files are stored as plain files named exactly by their sanitized file
//! name, directly under the store root. Names are expected to be sanitized
//! before they reach this layer.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::{CubbyError, Result};

/// Directory of live files.
///
/// Supports exclusive create, read, overwrite-update and listing. Moves in
/// and out of the store (soft delete, restore) are performed by the service
/// layer via [`ActiveStore::path_for`] with atomic renames.
#[derive(Debug, Clone)]
pub struct ActiveStore {
    /// Root directory for live files.
    root: PathBuf,
}

impl ActiveStore {
    /// Create a new ActiveStore rooted at the given path.
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

    /// Get the full path for a file name within the store.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Check if a file exists in the store.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_file()
    }

    /// Create a new file with the given content.
    ///
    /// Fails with `AlreadyExists` if the name is already present. The
    /// create is exclusive, so two concurrent creates of the same name
    /// cannot both succeed.
    pub fn create(&self, name: &str, content: &[u8]) -> Result<()> {
        let path = self.path_for(name);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(CubbyError::AlreadyExists(name.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(content)?;
        Ok(())
    }

    /// Read the full content of a file.
    ///
    /// Fails with `NotFound` if the name is absent.
    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        match fs::read(self.path_for(name)) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(CubbyError::NotFound(name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the content of an existing file.
    ///
    /// Fails with `NotFound` if the name is absent.
    pub fn update(&self, name: &str, content: &[u8]) -> Result<()> {
        if !self.exists(name) {
            return Err(CubbyError::NotFound(name.to_string()));
        }

        fs::write(self.path_for(name), content)?;
        Ok(())
    }

    /// List the file names currently present, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, ActiveStore) {
        let temp_dir = TempDir::new().unwrap();
        let store = ActiveStore::new(temp_dir.path().join("files")).unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_new_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("files");

        assert!(!root.exists());

        let store = ActiveStore::new(&root).unwrap();

        assert!(root.exists());
        assert_eq!(store.root(), root);
    }

    #[test]
    fn test_create_and_read() {
        let (_temp_dir, store) = setup_store();
        let content = b"Hello, World!";

        store.create("hello.txt", content).unwrap();

        let loaded = store.read("hello.txt").unwrap();
        assert_eq!(loaded, content);
    }

    #[test]
    fn test_create_already_exists() {
        let (_temp_dir, store) = setup_store();

        store.create("dup.txt", b"first").unwrap();
        let result = store.create("dup.txt", b"second");

        assert!(matches!(result, Err(CubbyError::AlreadyExists(_))));

        // First content unchanged.
        assert_eq!(store.read("dup.txt").unwrap(), b"first");
    }

    #[test]
    fn test_read_not_found() {
        let (_temp_dir, store) = setup_store();

        let result = store.read("nonexistent.txt");

        assert!(matches!(result, Err(CubbyError::NotFound(_))));
    }

    #[test]
    fn test_update() {
        let (_temp_dir, store) = setup_store();

        store.create("notes.txt", b"v1").unwrap();
        store.update("notes.txt", b"v2").unwrap();

        assert_eq!(store.read("notes.txt").unwrap(), b"v2");
    }

    #[test]
    fn test_update_not_found() {
        let (_temp_dir, store) = setup_store();

        let result = store.update("nonexistent.txt", b"data");

        assert!(matches!(result, Err(CubbyError::NotFound(_))));
    }

    #[test]
    fn test_list_empty() {
        let (_temp_dir, store) = setup_store();

        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_sorted() {
        let (_temp_dir, store) = setup_store();

        store.create("b.txt", b"b").unwrap();
        store.create("a.txt", b"a").unwrap();
        store.create("c.txt", b"c").unwrap();

        assert_eq!(store.list().unwrap(), vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_exists() {
        let (_temp_dir, store) = setup_store();

        store.create("here.txt", b"data").unwrap();

        assert!(store.exists("here.txt"));
        assert!(!store.exists("gone.txt"));
    }

    #[test]
    fn test_binary_content() {
        let (_temp_dir, store) = setup_store();

        let content: Vec<u8> = (0..=255).collect();

        store.create("binary.bin", &content).unwrap();
        assert_eq!(store.read("binary.bin").unwrap(), content);
    }
}
