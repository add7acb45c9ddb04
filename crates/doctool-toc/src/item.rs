//! TOC item records consumed by the rendering layer.

use serde::Serialize;

/// One entry of the linearized navigation tree.
///
/// Directories carry an `alias` and no `link`; documents carry a `link` and
/// an empty `alias`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocItem {
    /// Identifier from the [`IdSequence`](crate::IdSequence) used for the build.
    pub id: u64,
    /// Document title, or the raw segment name for directories.
    pub name: String,
    /// Directory display title. Empty for documents.
    pub alias: String,
    /// Link of the rendered page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub children: Vec<TocItem>,
}

impl TocItem {
    /// True if this item is a document.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.link.is_some()
    }
}

/// Pre-order search for the first link.
///
/// Continues with the next sibling when a subtree contains no link.
#[must_use]
pub fn find_first_link(items: &[TocItem]) -> Option<&str> {
    items.iter().find_map(|item| {
        item.link
            .as_deref()
            .or_else(|| find_first_link(&item.children))
    })
}
