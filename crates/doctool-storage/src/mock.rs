//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Stores document contents in memory. Use the builder methods to configure
/// the mock with test data. Every `read()` is counted per path so tests can
/// assert how often a document was opened.
///
/// # Example
///
/// ```ignore
/// use std::path::Path;
/// use doctool_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("/docs/index.rst", "Home\n====\n");
///
/// assert!(storage.exists(Path::new("/docs/index.rst")));
/// assert!(storage.is_dir(Path::new("/docs")));
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    contents: RwLock<HashMap<PathBuf, String>>,
    dirs: RwLock<BTreeSet<PathBuf>>,
    reads: RwLock<HashMap<PathBuf, usize>>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with content.
    ///
    /// Every ancestor directory of `path` is registered as a directory.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path: PathBuf = path.into();
        {
            let mut dirs = self.dirs.write().unwrap();
            for ancestor in path.ancestors().skip(1) {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        self.contents.write().unwrap().insert(path, content.into());
        self
    }

    /// Register an (empty) directory.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        let path: PathBuf = path.into();
        {
            let mut dirs = self.dirs.write().unwrap();
            for ancestor in path.ancestors() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        self
    }

    /// Number of `read()` calls made for `path`, successful or not.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn read_count(&self, path: impl AsRef<Path>) -> usize {
        self.reads
            .read()
            .unwrap()
            .get(path.as_ref())
            .copied()
            .unwrap_or(0)
    }
}

impl Storage for MockStorage {
    fn read(&self, path: &Path) -> Result<String, StorageError> {
        *self
            .reads
            .write()
            .unwrap()
            .entry(path.to_path_buf())
            .or_insert(0) += 1;

        self.contents
            .read()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound)
                    .with_path(path)
                    .with_backend("Mock")
            })
    }

    fn exists(&self, path: &Path) -> bool {
        self.contents.read().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.read().unwrap().contains(path)
    }

    fn scan(&self, dir: &Path, extension: &str) -> Result<Vec<String>, StorageError> {
        if !self.is_dir(dir) {
            return Err(StorageError::not_found(dir).with_backend("Mock"));
        }

        let mut stems: Vec<String> = self
            .contents
            .read()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter(|p| p.extension().is_some_and(|ext| ext == extension))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        stems.sort();
        Ok(stems)
    }
}
