//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading source documents from a local directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Relative paths are resolved against the storage root. Absolute paths are
/// used as-is, which lets projects with absolute source directories share one
/// storage instance.
///
/// # Example
///
/// ```ignore
/// use std::path::{Path, PathBuf};
/// use doctool_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let text = storage.read(Path::new("index.rst"))?;
/// ```
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Root directory for relative document paths.
    root: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of this storage.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate that a path doesn't contain parent directory components.
    ///
    /// Rejects paths containing `..` so that a table of contents entry can't
    /// reach outside the documentation tree (e.g., `../../../etc/passwd`).
    fn validate_path(path: &Path) -> Result<(), StorageError> {
        let has_parent_dir = path
            .components()
            .any(|c| matches!(c, std::path::Component::ParentDir));

        if has_parent_dir {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    fn resolve(&self, path: &Path) -> Result<PathBuf, StorageError> {
        Self::validate_path(path)?;
        Ok(self.root.join(path))
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &Path) -> Result<String, StorageError> {
        let full_path = self.resolve(path)?;
        fs::read_to_string(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_file())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_ok_and(|p| p.is_dir())
    }

    fn scan(&self, dir: &Path, extension: &str) -> Result<Vec<String>, StorageError> {
        let full_dir = self.resolve(dir)?;
        let entries = fs::read_dir(&full_dir)
            .map_err(|e| StorageError::io(e, Some(full_dir.clone())).with_backend(BACKEND))?;

        let mut stems: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == extension))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .collect();
        stems.sort();

        tracing::debug!(dir = %full_dir.display(), count = stems.len(), "Scanned documents");
        Ok(stems)
    }
}
