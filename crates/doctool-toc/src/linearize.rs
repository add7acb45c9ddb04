//! Conversion of the nested tree into [`TocItem`] records.
//!
//! Items are registered in a flat arena keyed by identifier while the tree is
//! walked, with parent/children relationships tracked by indices. The nested
//! records are assembled from the arena once the walk is complete.

use std::collections::HashMap;

use crate::ids::IdSequence;
use crate::item::TocItem;
use crate::tree::{AliasTree, Node, Tree};

/// Linearize `tree` in insertion order, allocating identifiers from `ids`.
///
/// Among siblings, a document whose link already appears is dropped.
#[must_use]
pub fn linearize(tree: &Tree, aliases: &AliasTree, ids: &IdSequence) -> Vec<TocItem> {
    let mut registry = ItemRegistry::new();
    walk(tree, aliases, ids, None, &mut registry);
    registry.build()
}

/// Recursively remove items whose link path contains `master_name`.
///
/// The link path is the part of the link after the `{suffix}/` prefix, so a
/// project id that happens to contain the master name does not match.
pub fn exclude_master_items(items: &mut Vec<TocItem>, suffix: &str, master_name: &str) {
    items.retain(|item| {
        !item
            .link
            .as_deref()
            .is_some_and(|link| link_path(link, suffix).contains(master_name))
    });
    for item in items {
        exclude_master_items(&mut item.children, suffix, master_name);
    }
}

fn link_path<'a>(link: &'a str, suffix: &str) -> &'a str {
    link.strip_prefix(suffix)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(link)
}

fn walk(
    tree: &Tree,
    aliases: &AliasTree,
    ids: &IdSequence,
    parent: Option<u64>,
    registry: &mut ItemRegistry,
) {
    for (key, node) in tree {
        let id = ids.next_id();
        match node {
            Node::Leaf(link) => {
                registry.add(
                    TocItem {
                        id,
                        name: key.clone(),
                        alias: String::new(),
                        link: Some(link.clone()),
                        children: Vec::new(),
                    },
                    parent,
                );
            }
            Node::Directory(children) => {
                let alias = aliases.get(key);
                registry.add(
                    TocItem {
                        id,
                        name: key.clone(),
                        alias: alias.map(|a| a.alias.clone()).unwrap_or_default(),
                        link: None,
                        children: Vec::new(),
                    },
                    parent,
                );
                let empty = AliasTree::new();
                let child_aliases = alias.map_or(&empty, |a| &a.children);
                walk(children, child_aliases, ids, Some(id), registry);
            }
        }
    }
}

/// Flat item arena with lookup by identifier.
struct ItemRegistry {
    items: Vec<TocItem>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    by_id: HashMap<u64, usize>,
}

impl ItemRegistry {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            children: Vec::new(),
            roots: Vec::new(),
            by_id: HashMap::new(),
        }
    }

    /// Register `item` under the item with identifier `parent`, or at the top
    /// level. Documents whose link a sibling already has are dropped.
    fn add(&mut self, item: TocItem, parent: Option<u64>) {
        let parent_idx = parent.and_then(|id| self.by_id.get(&id).copied());
        let siblings = match parent_idx {
            Some(idx) => &self.children[idx],
            None => &self.roots,
        };

        if item.link.is_some()
            && siblings
                .iter()
                .any(|&i| self.items[i].link == item.link)
        {
            tracing::debug!(link = ?item.link, "Skipping duplicate toc item");
            return;
        }

        let idx = self.items.len();
        self.by_id.insert(item.id, idx);
        self.items.push(item);
        self.children.push(Vec::new());

        match parent_idx {
            Some(parent) => self.children[parent].push(idx),
            None => self.roots.push(idx),
        }
    }

    fn build(mut self) -> Vec<TocItem> {
        let roots = std::mem::take(&mut self.roots);
        roots.into_iter().map(|idx| self.assemble(idx)).collect()
    }

    fn assemble(&mut self, idx: usize) -> TocItem {
        let child_indices = std::mem::take(&mut self.children[idx]);
        let children = child_indices
            .into_iter()
            .map(|child| self.assemble(child))
            .collect();
        let mut item = std::mem::replace(
            &mut self.items[idx],
            TocItem {
                id: 0,
                name: String::new(),
                alias: String::new(),
                link: None,
                children: Vec::new(),
            },
        );
        item.children = children;
        item
    }
}
