//! Document title resolution.
//!
//! Titles follow reStructuredText section conventions: a line of punctuation
//! under the title text, optionally with a matching line above it.
//!
//! ```text
//! Underline only      Overline and underline
//!
//! Getting Started     ===============
//! ===============     Getting Started
//!                     ===============
//! ```

use std::path::Path;

use doctool_storage::Storage;

/// Title returned when a document is unreadable or has no title markup.
pub const MISSING_TITLE: &str = "@doctool.missing.title";

/// Section adornment characters, in lookup order.
pub const TITLE_SYMBOLS: [char; 7] = ['#', '*', '-', '^', '~', '=', '"'];

/// Find the first non-blank line starting with a title symbol.
///
/// Returns the line index and the matched symbol.
#[must_use]
pub fn seek_title_info<S: AsRef<str>>(lines: &[S]) -> Option<(usize, char)> {
    lines.iter().enumerate().find_map(|(index, line)| {
        let stripped = line.as_ref().trim();
        if stripped.is_empty() {
            return None;
        }
        TITLE_SYMBOLS
            .iter()
            .copied()
            .find(|symbol| stripped.starts_with(*symbol))
            .map(|symbol| (index, symbol))
    })
}

/// Extract the title text adjacent to the first adornment line.
///
/// Returns `None` when no adornment exists or the adjacent line is out of range.
#[must_use]
pub fn title_from_lines<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    let (index, symbol) = seek_title_info(lines)?;

    let overlined = lines
        .get(index + 2)
        .is_some_and(|line| line.as_ref().starts_with(symbol));

    let title_line = if overlined {
        lines.get(index + 1)
    } else {
        index.checked_sub(1).and_then(|i| lines.get(i))
    }?;

    Some(title_line.as_ref().trim().to_owned())
}

/// Resolves display titles of documents held in a [`Storage`].
#[derive(Clone, Copy)]
pub struct TitleResolver<'s> {
    storage: &'s dyn Storage,
}

impl<'s> TitleResolver<'s> {
    /// Create a resolver reading from `storage`.
    #[must_use]
    pub fn new(storage: &'s dyn Storage) -> Self {
        Self { storage }
    }

    /// Resolve the title of the document at `path`.
    ///
    /// Never fails: unreadable documents and documents without title markup
    /// resolve to [`MISSING_TITLE`].
    #[must_use]
    pub fn resolve(&self, path: &Path) -> String {
        let content = match self.storage.read(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Resolving title failed");
                return MISSING_TITLE.to_owned();
            }
        };

        let lines: Vec<&str> = content.lines().collect();
        title_from_lines(&lines).unwrap_or_else(|| {
            tracing::debug!(path = %path.display(), "No title markup found");
            MISSING_TITLE.to_owned()
        })
    }
}

#[cfg(test)]
mod tests {
    use doctool_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_seek_skips_blank_and_text_lines() {
        let lines = ["", "   ", "Title", "-----"];

        assert_eq!(seek_title_info(&lines), Some((3, '-')));
    }

    #[test]
    fn test_seek_uses_symbol_order() {
        // '#' is looked up before '='
        let lines = ["#=#=#"];

        assert_eq!(seek_title_info(&lines), Some((0, '#')));
    }

    #[test]
    fn test_seek_no_symbol() {
        let lines = ["Just text", "more text"];

        assert_eq!(seek_title_info(&lines), None);
    }

    #[test]
    fn test_underline_title() {
        let lines = ["Title", "=====", ""];

        assert_eq!(title_from_lines(&lines), Some("Title".to_owned()));
    }

    #[test]
    fn test_underline_title_at_end_of_file() {
        let lines = ["Title", "====="];

        assert_eq!(title_from_lines(&lines), Some("Title".to_owned()));
    }

    #[test]
    fn test_overline_title() {
        let lines = ["**********", "  Overlined  ", "**********", "", "Body"];

        assert_eq!(title_from_lines(&lines), Some("Overlined".to_owned()));
    }

    #[test]
    fn test_title_preceded_by_labels() {
        let lines = ["Getting Started", "~~~~~~~~~~~~~~~", "", "Intro text."];

        assert_eq!(title_from_lines(&lines), Some("Getting Started".to_owned()));
    }

    #[test]
    fn test_underline_on_first_line_without_overline() {
        let lines = ["=====", "Body"];

        assert_eq!(title_from_lines(&lines), None);
    }

    #[test]
    fn test_blank_line_above_underline_gives_empty_title() {
        let lines = ["", "====="];

        // Index 1, preceding line is blank.
        assert_eq!(title_from_lines(&lines), Some(String::new()));
    }

    #[test]
    fn test_resolve_reads_storage() {
        let storage = MockStorage::new().with_file("/docs/a.rst", "Alpha\n=====\n\nText\n");
        let resolver = TitleResolver::new(&storage);

        assert_eq!(resolver.resolve(Path::new("/docs/a.rst")), "Alpha");
    }

    #[test]
    fn test_resolve_crlf_content() {
        let storage = MockStorage::new().with_file("/docs/a.rst", "Alpha\r\n=====\r\n");
        let resolver = TitleResolver::new(&storage);

        assert_eq!(resolver.resolve(Path::new("/docs/a.rst")), "Alpha");
    }

    #[test]
    fn test_resolve_without_markup_is_sentinel() {
        let storage = MockStorage::new().with_file("/docs/plain.rst", "No title here.\nAt all.\n");
        let resolver = TitleResolver::new(&storage);

        assert_eq!(
            resolver.resolve(Path::new("/docs/plain.rst")),
            "@doctool.missing.title"
        );
    }

    #[test]
    fn test_resolve_missing_file_is_sentinel() {
        let storage = MockStorage::new();
        let resolver = TitleResolver::new(&storage);

        assert_eq!(resolver.resolve(Path::new("/docs/nope.rst")), MISSING_TITLE);
    }
}
