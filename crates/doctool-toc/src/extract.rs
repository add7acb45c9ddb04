//! Link extraction from `toctree` blocks.
//!
//! Walks the lines of an index document, keeps lines that look like document
//! references, and follows nested index documents depth-first so that entries
//! come out in pre-order of the directory structure as written.

use std::path::PathBuf;

use doctool_storage::Storage;

use crate::options::TocOptions;
use crate::title::TITLE_SYMBOLS;

/// Line prefixes that mark reStructuredText markup rather than a document reference.
const DIRECTIVE_PREFIXES: [&str; 2] = ["..", ":"];

/// One resolved reference found in a `toctree` block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Path fragment as written in the directive, relative to the extraction root.
    pub branch: String,
    /// Link embedded in rendered output (e.g. `guide/setup/install.html`).
    pub relative_link: String,
    /// Source document location, used for existence checks and titles.
    pub absolute_link: PathBuf,
}

/// Extracts [`TocEntry`] values from index document lines.
///
/// An extractor is single-use: create it, call [`extract`](Self::extract).
pub struct LinkExtractor<'a> {
    storage: &'a dyn Storage,
    options: &'a TocOptions,
    hidden: bool,
    /// Index documents entered on the current recursion path.
    stack: Vec<PathBuf>,
    entries: Vec<TocEntry>,
}

impl<'a> LinkExtractor<'a> {
    /// Create an extractor for one project.
    #[must_use]
    pub fn new(storage: &'a dyn Storage, options: &'a TocOptions) -> Self {
        Self {
            storage,
            options,
            hidden: false,
            stack: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Extract every existing entry reachable from `lines`.
    #[must_use]
    pub fn extract<S: AsRef<str>>(mut self, lines: &[S]) -> Vec<TocEntry> {
        self.walk(lines);
        self.entries
    }

    fn walk<S: AsRef<str>>(&mut self, lines: &[S]) {
        for line in lines {
            let stripped = line.as_ref().trim();
            if stripped.is_empty() {
                continue;
            }

            if !self.hidden && stripped.contains(&self.options.hidden_marker) {
                self.hidden = true;
            } else if self.hidden && stripped.contains(&self.options.directive_marker) {
                self.hidden = false;
            }

            if self.hidden || !is_candidate(stripped) {
                continue;
            }

            let entry = self.resolve(stripped);
            if !self.storage.exists(&entry.absolute_link) {
                tracing::debug!(
                    branch = stripped,
                    path = %entry.absolute_link.display(),
                    "Skipping missing toctree entry"
                );
                continue;
            }

            let absolute_link = entry.absolute_link.clone();
            self.entries.push(entry);

            if !self.options.joined_mode {
                self.descend(stripped, absolute_link);
            }
        }
    }

    /// Follow a nested index document, prefixing its lines with its directory.
    fn descend(&mut self, branch: &str, index_path: PathBuf) {
        let Some((dir, name)) = branch.rsplit_once('/') else {
            return;
        };
        if name != self.options.master_name || dir.is_empty() {
            return;
        }
        if self.stack.contains(&index_path) {
            tracing::debug!(path = %index_path.display(), "Index already being expanded");
            return;
        }

        let content = match self.storage.read(&index_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(
                    path = %index_path.display(),
                    error = %e,
                    "Reading nested index failed"
                );
                return;
            }
        };

        let prepended: Vec<String> = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(|l| format!("{dir}/{l}"))
            .collect();

        self.stack.push(index_path);
        self.walk(&prepended);
        self.stack.pop();
    }

    fn resolve(&self, reference: &str) -> TocEntry {
        let target = if self.options.joined_mode {
            reference.replace('/', ".")
        } else {
            reference.to_owned()
        };

        TocEntry {
            branch: reference.to_owned(),
            relative_link: format!(
                "{}/{target}.{}",
                self.options.suffix, self.options.link_extension
            ),
            absolute_link: self
                .options
                .base_dir
                .join(format!("{target}.{}", self.options.source_extension)),
        }
    }
}

/// A line is a candidate reference unless it starts with markup.
fn is_candidate(stripped: &str) -> bool {
    !stripped.is_empty()
        && !TITLE_SYMBOLS.iter().any(|s| stripped.starts_with(*s))
        && !DIRECTIVE_PREFIXES.iter().any(|p| stripped.starts_with(p))
}
