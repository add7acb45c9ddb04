//! TOC engine orchestrating extraction, mapping and linearization.

use std::path::PathBuf;
use std::sync::OnceLock;

use doctool_storage::Storage;

use crate::extract::{LinkExtractor, TocEntry};
use crate::ids::IdSequence;
use crate::item::{TocItem, find_first_link};
use crate::linearize::{exclude_master_items, linearize};
use crate::options::TocOptions;
use crate::tree::{AliasTree, Tree, TreeMapper};

/// Errors raised for engine misuse.
///
/// Problems in the documents themselves never surface here; they degrade
/// to a partial tree.
#[derive(Debug, thiserror::Error)]
pub enum TocError {
    /// Base directory does not exist in the backing store.
    #[error("base directory not found: {}", .0.display())]
    MissingBaseDir(PathBuf),
}

/// Unbuilt table of contents for one project.
///
/// [`build`](Self::build) consumes the engine, so each engine is built once.
///
/// # Example
///
/// ```ignore
/// use doctool_storage::MockStorage;
/// use doctool_toc::{TocEngine, TocOptions};
///
/// let storage = MockStorage::new().with_file("/docs/intro.rst", "Intro\n=====\n");
/// let toc = TocEngine::new(["intro"], TocOptions::new("/docs", "guide"), &storage).build()?;
///
/// assert_eq!(toc.first_link(), Some("guide/intro.html"));
/// ```
pub struct TocEngine<'s> {
    lines: Vec<String>,
    options: TocOptions,
    storage: &'s dyn Storage,
    ids: IdSequence,
}

impl<'s> TocEngine<'s> {
    /// Create an engine over the lines of a root index document.
    ///
    /// Identifiers come from a fresh [`IdSequence`] unless one is supplied
    /// with [`with_ids`](Self::with_ids).
    #[must_use]
    pub fn new<I, S>(lines: I, options: TocOptions, storage: &'s dyn Storage) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            options,
            storage,
            ids: IdSequence::new(),
        }
    }

    /// Allocate identifiers from `ids` instead of a fresh sequence.
    #[must_use]
    pub fn with_ids(mut self, ids: IdSequence) -> Self {
        self.ids = ids;
        self
    }

    /// Input lines, as given.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Resolve the table of contents.
    pub fn build(self) -> Result<Toc, TocError> {
        if !self.storage.is_dir(&self.options.base_dir) {
            return Err(TocError::MissingBaseDir(self.options.base_dir));
        }

        let entries = LinkExtractor::new(self.storage, &self.options).extract(&self.lines);

        let mut tree = Tree::new();
        let mut aliases = AliasTree::new();
        let mapper = TreeMapper::new(self.storage, &self.options);
        for entry in &entries {
            mapper.map_entry(entry, &mut tree, &mut aliases);
        }

        let mut items = linearize(&tree, &aliases, &self.ids);
        exclude_master_items(&mut items, &self.options.suffix, &self.options.master_name);

        tracing::debug!(
            base_dir = %self.options.base_dir.display(),
            entries = entries.len(),
            items = items.len(),
            "Built table of contents"
        );

        Ok(Toc {
            entries,
            tree,
            aliases,
            items,
            suffix: self.options.suffix,
            master_name: self.options.master_name,
            first_link: OnceLock::new(),
        })
    }
}

/// Built table of contents.
#[derive(Debug)]
pub struct Toc {
    entries: Vec<TocEntry>,
    tree: Tree,
    aliases: AliasTree,
    items: Vec<TocItem>,
    suffix: String,
    master_name: String,
    first_link: OnceLock<Option<String>>,
}

impl Toc {
    /// Top-level items in navigation order.
    #[must_use]
    pub fn items(&self) -> &[TocItem] {
        &self.items
    }

    /// Take ownership of the top-level items.
    #[must_use]
    pub fn into_items(self) -> Vec<TocItem> {
        self.items
    }

    /// Extracted entries, in extraction order.
    #[must_use]
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    /// Nested tree the items were linearized from.
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Directory aliases.
    #[must_use]
    pub fn aliases(&self) -> &AliasTree {
        &self.aliases
    }

    /// First link in pre-order, computed once.
    #[must_use]
    pub fn first_link(&self) -> Option<&str> {
        self.first_link
            .get_or_init(|| find_first_link(&self.items).map(str::to_owned))
            .as_deref()
    }

    /// Linearize the stored tree again with identifiers from `ids`.
    ///
    /// Leaves this table of contents untouched.
    #[must_use]
    pub fn relinearize(&self, ids: &IdSequence) -> Vec<TocItem> {
        let mut items = linearize(&self.tree, &self.aliases, ids);
        exclude_master_items(&mut items, &self.suffix, &self.master_name);
        items
    }
}
