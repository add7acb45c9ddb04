//! Backing store abstraction for doctool.
//!
//! The TOC engine never touches the filesystem directly. It asks a [`Storage`]
//! whether a document exists and reads its text through it. This enables:
//!
//! - **Unit testing** without touching the real filesystem
//! - **Clean separation** between TOC resolution and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Storage`] trait with `read()`, `exists()`, `is_dir()` and `scan()` methods
//! - [`FsStorage`] implementation for local directories
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::{Path, PathBuf};
//! use doctool_storage::{FsStorage, Storage};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! if storage.exists(Path::new("guide/index.rst")) {
//!     let text = storage.read(Path::new("guide/index.rst"))?;
//! }
//! ```

mod fs;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod storage;

pub use fs::FsStorage;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
