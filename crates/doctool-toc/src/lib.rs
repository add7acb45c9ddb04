//! Table of contents resolution for doctool.
//!
//! Turns the raw lines of a project's root index document into an ordered,
//! hierarchical navigation structure:
//!
//! ```text
//! raw lines ─► LinkExtractor ─► [TocEntry] ─► TreeMapper ─► Tree + AliasTree
//!                                                              │
//!                      first_link() ◄─ [TocItem] ◄─ linearize ◄┘
//! ```
//!
//! - [`LinkExtractor`] walks `toctree` blocks, follows nested index documents
//!   and keeps only entries that exist in the [`Storage`](doctool_storage::Storage).
//! - [`TreeMapper`] folds flat branch paths into a nested [`Node`] tree and
//!   resolves a display alias once per directory.
//! - [`linearize`] produces [`TocItem`] records with identifiers drawn from an
//!   [`IdSequence`], and synthetic index entries are removed afterwards.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use doctool_storage::{FsStorage, Storage};
//! use doctool_toc::{TocEngine, TocOptions};
//!
//! let storage = FsStorage::new(PathBuf::from("docs"));
//! let lines = storage.read("docs/index.rst".as_ref())?;
//! let options = TocOptions::new(PathBuf::from("docs"), "guide");
//! let toc = TocEngine::new(lines.lines(), options, &storage).build()?;
//! println!("{:?}", toc.first_link());
//! ```

mod engine;
mod extract;
mod ids;
mod item;
mod linearize;
mod options;
mod title;
mod tree;

pub use engine::{Toc, TocEngine, TocError};
pub use extract::{LinkExtractor, TocEntry};
pub use ids::IdSequence;
pub use item::{TocItem, find_first_link};
pub use linearize::{exclude_master_items, linearize};
pub use options::TocOptions;
pub use title::{MISSING_TITLE, TITLE_SYMBOLS, TitleResolver, seek_title_info, title_from_lines};
pub use tree::{AliasNode, AliasTree, Node, Tree, TreeMapper, humanize};
