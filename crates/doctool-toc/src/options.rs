//! Engine options.

use std::path::PathBuf;

/// Options controlling how one project's table of contents is resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocOptions {
    /// Directory that entry paths are resolved against.
    pub base_dir: PathBuf,
    /// Link namespace prepended to every relative link (usually the project id).
    pub suffix: String,
    /// Base name of index documents (e.g. `index`).
    pub master_name: String,
    /// Navigation depth hint for the rendering layer. The engine never truncates.
    pub max_depth: u32,
    /// API dialect: entry paths are flattened with `.` and nested index
    /// documents are not followed.
    pub joined_mode: bool,
    /// Extension of source documents, without the dot.
    pub source_extension: String,
    /// Extension of rendered pages, without the dot.
    pub link_extension: String,
    /// Token that starts a hidden region.
    pub hidden_marker: String,
    /// Token that starts a new toctree block and ends a hidden region.
    pub directive_marker: String,
}

impl TocOptions {
    /// Options with defaults for an RST project rooted at `base_dir`.
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>, suffix: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            suffix: suffix.into(),
            master_name: "index".to_owned(),
            max_depth: 3,
            joined_mode: false,
            source_extension: "rst".to_owned(),
            link_extension: "html".to_owned(),
            hidden_marker: ":hidden:".to_owned(),
            directive_marker: ".. toctree::".to_owned(),
        }
    }

    /// Set the index document base name.
    #[must_use]
    pub fn with_master_name(mut self, master_name: impl Into<String>) -> Self {
        self.master_name = master_name.into();
        self
    }

    /// Set the depth hint.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable the API dialect.
    #[must_use]
    pub fn with_joined_mode(mut self, joined_mode: bool) -> Self {
        self.joined_mode = joined_mode;
        self
    }

    /// Set source and link extensions.
    #[must_use]
    pub fn with_extensions(
        mut self,
        source_extension: impl Into<String>,
        link_extension: impl Into<String>,
    ) -> Self {
        self.source_extension = source_extension.into();
        self.link_extension = link_extension.into();
        self
    }

    /// Set the hidden-region and directive markers.
    #[must_use]
    pub fn with_markers(
        mut self,
        hidden_marker: impl Into<String>,
        directive_marker: impl Into<String>,
    ) -> Self {
        self.hidden_marker = hidden_marker.into();
        self.directive_marker = directive_marker.into();
        self
    }

    /// File name of an index document, e.g. `index.rst`.
    #[must_use]
    pub fn master_file_name(&self) -> String {
        format!("{}.{}", self.master_name, self.source_extension)
    }
}
