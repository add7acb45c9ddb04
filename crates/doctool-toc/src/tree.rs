//! Nested navigation tree built from flat entry paths.
//!
//! Each [`TocEntry`] branch like `setup/advanced/proxy` is folded into the
//! tree one segment at a time. Directory segments become [`Node::Directory`]
//! values and get a display alias resolved once from their own index
//! document; the final segment becomes a [`Node::Leaf`] keyed by the
//! document's title.
//!
//! Both maps preserve insertion order, which is the navigation order.

use std::path::Path;

use doctool_storage::Storage;
use indexmap::IndexMap;

use crate::extract::TocEntry;
use crate::options::TocOptions;
use crate::title::{MISSING_TITLE, TitleResolver};

/// Navigation tree keyed by segment name (directories) or title (leaves).
pub type Tree = IndexMap<String, Node>;

/// Directory aliases, mirroring the directory nodes of a [`Tree`].
pub type AliasTree = IndexMap<String, AliasNode>;

/// Node of the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A document, holding its relative link.
    Leaf(String),
    /// A directory with ordered children.
    Directory(Tree),
}

/// Display alias of a directory node and the aliases of its subdirectories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AliasNode {
    /// Human-readable directory title.
    pub alias: String,
    /// Aliases of nested directories.
    pub children: AliasTree,
}

/// Turn a path segment into a display name: `_` becomes a space, the first
/// character is upper-cased and the rest lower-cased.
#[must_use]
pub fn humanize(segment: &str) -> String {
    let spaced = segment.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Folds [`TocEntry`] values into a [`Tree`] and its [`AliasTree`].
pub struct TreeMapper<'a> {
    titles: TitleResolver<'a>,
    options: &'a TocOptions,
}

impl<'a> TreeMapper<'a> {
    /// Create a mapper resolving titles from `storage`.
    #[must_use]
    pub fn new(storage: &'a dyn Storage, options: &'a TocOptions) -> Self {
        Self {
            titles: TitleResolver::new(storage),
            options,
        }
    }

    /// Insert one entry into the tree.
    pub fn map_entry(&self, entry: &TocEntry, tree: &mut Tree, aliases: &mut AliasTree) {
        self.map_branch(&entry.branch, entry, &self.options.base_dir, tree, aliases);
    }

    fn map_branch(
        &self,
        branch: &str,
        entry: &TocEntry,
        level_dir: &Path,
        tree: &mut Tree,
        aliases: &mut AliasTree,
    ) {
        let Some((segment, rest)) = branch.split_once('/') else {
            let title = self.titles.resolve(&entry.absolute_link);
            let key = if title.is_empty() {
                humanize(branch)
            } else {
                title
            };
            tree.insert(key, Node::Leaf(entry.relative_link.clone()));
            return;
        };

        let segment_dir = level_dir.join(segment);

        if !matches!(tree.get(segment), Some(Node::Directory(_))) {
            let alias = self.directory_alias(segment, &segment_dir);
            tree.insert(segment.to_owned(), Node::Directory(Tree::new()));
            aliases.insert(
                segment.to_owned(),
                AliasNode {
                    alias,
                    children: AliasTree::new(),
                },
            );
        }

        let Some(Node::Directory(children)) = tree.get_mut(segment) else {
            return;
        };
        let alias_children = &mut aliases.entry(segment.to_owned()).or_default().children;

        self.map_branch(rest, entry, &segment_dir, children, alias_children);
    }

    /// Alias of a directory: the title of its index document, or the
    /// humanized segment in API mode or when no title is found.
    fn directory_alias(&self, segment: &str, segment_dir: &Path) -> String {
        if self.options.joined_mode {
            return humanize(segment);
        }

        let index_path = segment_dir.join(self.options.master_file_name());
        let title = self.titles.resolve(&index_path);
        if title.is_empty() || title == MISSING_TITLE {
            humanize(segment)
        } else {
            title
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use doctool_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn entry(branch: &str, relative: &str, absolute: &str) -> TocEntry {
        TocEntry {
            branch: branch.to_owned(),
            relative_link: relative.to_owned(),
            absolute_link: PathBuf::from(absolute),
        }
    }

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("getting_started"), "Getting started");
        assert_eq!(humanize("API"), "Api");
        assert_eq!(humanize("émoji_Docs"), "Émoji docs");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn test_leaf_keyed_by_title() {
        let storage = MockStorage::new().with_file("/docs/a.rst", "Alpha\n=====\n");
        let options = TocOptions::new("/docs", "g");
        let mapper = TreeMapper::new(&storage, &options);
        let mut tree = Tree::new();
        let mut aliases = AliasTree::new();

        mapper.map_entry(&entry("a", "g/a.html", "/docs/a.rst"), &mut tree, &mut aliases);

        assert_eq!(tree.get("Alpha"), Some(&Node::Leaf("g/a.html".to_owned())));
        assert!(aliases.is_empty());
    }

    #[test]
    fn test_leaf_with_empty_title_uses_segment() {
        let storage = MockStorage::new().with_file("/docs/release_notes.rst", "\n=====\n");
        let options = TocOptions::new("/docs", "g");
        let mapper = TreeMapper::new(&storage, &options);
        let mut tree = Tree::new();
        let mut aliases = AliasTree::new();

        mapper.map_entry(
            &entry(
                "release_notes",
                "g/release_notes.html",
                "/docs/release_notes.rst",
            ),
            &mut tree,
            &mut aliases,
        );

        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["Release notes"]);
    }

    #[test]
    fn test_directory_alias_from_index() {
        let storage = MockStorage::new()
            .with_file("/docs/sub/index.rst", "Sub Area\n========\n")
            .with_file("/docs/sub/leaf.rst", "Leaf Doc\n--------\n");
        let options = TocOptions::new("/docs", "g");
        let mapper = TreeMapper::new(&storage, &options);
        let mut tree = Tree::new();
        let mut aliases = AliasTree::new();

        mapper.map_entry(
            &entry("sub/leaf", "g/sub/leaf.html", "/docs/sub/leaf.rst"),
            &mut tree,
            &mut aliases,
        );

        let mut expected_children = Tree::new();
        expected_children.insert("Leaf Doc".to_owned(), Node::Leaf("g/sub/leaf.html".to_owned()));
        assert_eq!(tree.get("sub"), Some(&Node::Directory(expected_children)));
        assert_eq!(aliases["sub"].alias, "Sub Area");
    }

    #[test]
    fn test_directory_alias_falls_back_to_segment() {
        let storage = MockStorage::new().with_file("/docs/user_guide/leaf.rst", "Leaf\n----\n");
        let options = TocOptions::new("/docs", "g");
        let mapper = TreeMapper::new(&storage, &options);
        let mut tree = Tree::new();
        let mut aliases = AliasTree::new();

        mapper.map_entry(
            &entry(
                "user_guide/leaf",
                "g/user_guide/leaf.html",
                "/docs/user_guide/leaf.rst",
            ),
            &mut tree,
            &mut aliases,
        );

        assert_eq!(aliases["user_guide"].alias, "User guide");
    }

    #[test]
    fn test_api_mode_alias_ignores_index_title() {
        let storage = MockStorage::new()
            .with_file("/api/my_pkg/index.rst", "Fancy\n=====\n")
            .with_file("/api/my_pkg.core.rst", "core Module\n===========\n");
        let options = TocOptions::new("/api", "api").with_joined_mode(true);
        let mapper = TreeMapper::new(&storage, &options);
        let mut tree = Tree::new();
        let mut aliases = AliasTree::new();

        mapper.map_entry(
            &entry("my_pkg/core", "api/my_pkg.core.html", "/api/my_pkg.core.rst"),
            &mut tree,
            &mut aliases,
        );

        assert_eq!(aliases["my_pkg"].alias, "My pkg");
        assert_eq!(storage.read_count("/api/my_pkg/index.rst"), 0);
    }

    #[test]
    fn test_alias_resolved_once_per_directory() {
        let storage = MockStorage::new()
            .with_file("/docs/sub/index.rst", "Sub\n===\n")
            .with_file("/docs/sub/a.rst", "A\n=\n")
            .with_file("/docs/sub/b.rst", "B\n=\n")
            .with_file("/docs/sub/deep/c.rst", "C\n=\n");
        let options = TocOptions::new("/docs", "g");
        let mapper = TreeMapper::new(&storage, &options);
        let mut tree = Tree::new();
        let mut aliases = AliasTree::new();

        for (branch, absolute) in [
            ("sub/a", "/docs/sub/a.rst"),
            ("sub/b", "/docs/sub/b.rst"),
            ("sub/deep/c", "/docs/sub/deep/c.rst"),
        ] {
            mapper.map_entry(&entry(branch, "link", absolute), &mut tree, &mut aliases);
        }

        assert_eq!(storage.read_count("/docs/sub/index.rst"), 1);
        assert_eq!(storage.read_count("/docs/sub/deep/index.rst"), 1);
        assert_eq!(aliases["sub"].children["deep"].alias, "Deep");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let storage = MockStorage::new()
            .with_file("/docs/z.rst", "Zulu\n====\n")
            .with_file("/docs/a.rst", "Alpha\n=====\n")
            .with_file("/docs/m/x.rst", "X\n=\n");
        let options = TocOptions::new("/docs", "g");
        let mapper = TreeMapper::new(&storage, &options);
        let mut tree = Tree::new();
        let mut aliases = AliasTree::new();

        for (branch, absolute) in [
            ("z", "/docs/z.rst"),
            ("m/x", "/docs/m/x.rst"),
            ("a", "/docs/a.rst"),
        ] {
            mapper.map_entry(&entry(branch, "link", absolute), &mut tree, &mut aliases);
        }

        assert_eq!(tree.keys().collect::<Vec<_>>(), vec!["Zulu", "m", "Alpha"]);
    }

    #[test]
    fn test_leaf_replaced_by_directory_with_same_key() {
        let storage = MockStorage::new()
            .with_file("/docs/other.rst", "sub\n===\n")
            .with_file("/docs/sub/a.rst", "A\n=\n");
        let options = TocOptions::new("/docs", "g");
        let mapper = TreeMapper::new(&storage, &options);
        let mut tree = Tree::new();
        let mut aliases = AliasTree::new();

        let other = entry("other", "g/other.html", "/docs/other.rst");
        let nested = entry("sub/a", "g/sub/a.html", "/docs/sub/a.rst");
        mapper.map_entry(&other, &mut tree, &mut aliases);
        mapper.map_entry(&nested, &mut tree, &mut aliases);

        assert!(matches!(tree.get("sub"), Some(Node::Directory(_))));
        assert_eq!(tree.len(), 1);
    }
}
