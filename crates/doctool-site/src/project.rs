//! Documentation projects.
//!
//! A [`Project`] is one independently authored documentation tree: either
//! hand-written reStructuredText ([`ProjectKind::Rst`]) whose navigation
//! starts at the project's index document, or an API reference
//! ([`ProjectKind::Api`]) whose navigation is the sorted list of modules.

use std::path::{Path, PathBuf};

use doctool_config::{ProjectConfig, TocConfig};
use doctool_storage::{Storage, StorageError};
use doctool_toc::{IdSequence, TocEngine, TocError, TocItem, TocOptions};
use regex::RegexSet;

/// Kind of documentation project.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectKind {
    /// Hand-written documents rooted at an index document.
    Rst,
    /// Auto-generated API reference, one document per module.
    Api,
}

/// Error loading a project.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    /// Backing store failure (e.g. unreadable index or unscannable directory).
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    /// Table of contents build failure.
    #[error("TOC error: {0}")]
    Toc(#[from] TocError),
    /// Invalid module exclusion pattern.
    #[error("Invalid module pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// A loaded project with its resolved navigation.
#[derive(Clone, Debug)]
pub struct Project {
    id: String,
    name: String,
    rank: i64,
    kind: ProjectKind,
    maxdepth: u32,
    source_dir: PathBuf,
    toctree: Vec<TocItem>,
    first_link: Option<String>,
}

impl Project {
    /// Load a project and build its table of contents.
    ///
    /// Identifiers of the resulting items are drawn from `ids`.
    ///
    /// An RST project without an index document has an empty table of
    /// contents. An API project without an explicit module list uses every
    /// document found in its source directory except the index. Modules
    /// matching any of the project's `excluded_modules` are left out.
    pub fn load(
        config: &ProjectConfig,
        toc: &TocConfig,
        storage: &dyn Storage,
        ids: &IdSequence,
    ) -> Result<Self, ProjectError> {
        let kind = if config.api {
            ProjectKind::Api
        } else {
            ProjectKind::Rst
        };
        let options = toc_options(config, toc);

        let lines: Option<Vec<String>> = match kind {
            ProjectKind::Rst => {
                let index_path = config.source_dir.join(options.master_file_name());
                if storage.exists(&index_path) {
                    Some(storage.read(&index_path)?.lines().map(str::to_owned).collect())
                } else if storage.is_dir(&config.source_dir) {
                    tracing::debug!(
                        project = %config.id,
                        path = %index_path.display(),
                        "Index document not found, navigation is empty"
                    );
                    None
                } else {
                    tracing::warn!(
                        project = %config.id,
                        source_dir = %config.source_dir.display(),
                        "Source directory not found, navigation is empty"
                    );
                    None
                }
            }
            ProjectKind::Api => {
                let modules = if config.modules.is_empty() {
                    storage
                        .scan(&config.source_dir, &toc.source_extension)?
                        .into_iter()
                        .filter(|stem| stem != &config.master_doc)
                        .collect()
                } else {
                    config.modules.clone()
                };
                let excluded = RegexSet::new(&config.excluded_modules)?;
                Some(api_toctree(filter_modules(modules, &excluded, &config.id)))
            }
        };

        let (toctree, first_link) = match lines {
            Some(lines) => {
                let built = TocEngine::new(lines, options, storage)
                    .with_ids(ids.clone())
                    .build()?;
                let first_link = built.first_link().map(str::to_owned);
                (built.into_items(), first_link)
            }
            None => (Vec::new(), None),
        };

        tracing::info!(
            project = %config.id,
            kind = ?kind,
            items = toctree.len(),
            first_link = first_link.as_deref().unwrap_or(""),
            "Loaded project"
        );

        Ok(Self {
            id: config.id.clone(),
            name: config.name.clone(),
            rank: config.rank,
            kind,
            maxdepth: config.maxdepth,
            source_dir: config.source_dir.clone(),
            toctree,
            first_link,
        })
    }

    /// Unique project id, also the link namespace of its pages.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rank(&self) -> i64 {
        self.rank
    }

    #[must_use]
    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    /// Navigation depth hint for the rendering layer.
    #[must_use]
    pub fn maxdepth(&self) -> u32 {
        self.maxdepth
    }

    #[must_use]
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Top-level navigation items.
    #[must_use]
    pub fn toctree(&self) -> &[TocItem] {
        &self.toctree
    }

    /// Landing page of the project.
    #[must_use]
    pub fn first_link(&self) -> Option<&str> {
        self.first_link.as_deref()
    }
}

/// Engine options for one project.
fn toc_options(config: &ProjectConfig, toc: &TocConfig) -> TocOptions {
    TocOptions::new(config.source_dir.clone(), config.id.clone())
        .with_master_name(config.master_doc.clone())
        .with_max_depth(config.maxdepth)
        .with_joined_mode(config.api)
        .with_extensions(toc.source_extension.clone(), toc.link_extension.clone())
        .with_markers(toc.hidden_marker.clone(), toc.directive_marker.clone())
}

/// Drop the modules matched by any pattern in `excluded`.
fn filter_modules(modules: Vec<String>, excluded: &RegexSet, project: &str) -> Vec<String> {
    modules
        .into_iter()
        .filter(|module| {
            let keep = !excluded.is_match(module);
            if !keep {
                tracing::debug!(project, module = %module, "Module excluded");
            }
            keep
        })
        .collect()
}

/// Sorted module names as toctree lines, with `.` turned into `/`.
#[must_use]
pub fn api_toctree(mut modules: Vec<String>) -> Vec<String> {
    modules.sort();
    modules.dedup();
    modules.into_iter().map(|m| m.replace('.', "/")).collect()
}

#[cfg(test)]
mod tests {
    use doctool_config::DEFAULT_EXCLUDED_MODULES;
    use doctool_storage::MockStorage;
    use pretty_assertions::assert_eq;

    use super::*;

    fn project(id: &str, source_dir: &str) -> ProjectConfig {
        ProjectConfig {
            id: id.to_owned(),
            name: id.to_uppercase(),
            source_dir: PathBuf::from(source_dir),
            rank: 0,
            api: false,
            master_doc: "index".to_owned(),
            maxdepth: 2,
            modules: Vec::new(),
            excluded_modules: DEFAULT_EXCLUDED_MODULES
                .iter()
                .map(|p| (*p).to_owned())
                .collect(),
        }
    }

    fn api_project(id: &str, source_dir: &str, modules: &[&str]) -> ProjectConfig {
        ProjectConfig {
            api: true,
            modules: modules.iter().map(|m| (*m).to_owned()).collect(),
            ..project(id, source_dir)
        }
    }

    fn api_storage() -> MockStorage {
        MockStorage::new()
            .with_file("/api/index.rst", "API\n===\n")
            .with_file("/api/pkg.rst", "pkg package\n===========\n")
            .with_file("/api/pkg.core.rst", "pkg.core module\n===============\n")
            .with_file("/api/pkg.util.rst", "pkg.util module\n===============\n")
    }

    #[test]
    fn test_api_toctree_sorted_and_slashed() {
        let modules = vec![
            "pkg.util".to_owned(),
            "pkg".to_owned(),
            "pkg.core".to_owned(),
            "pkg".to_owned(),
        ];

        assert_eq!(api_toctree(modules), vec!["pkg", "pkg/core", "pkg/util"]);
    }

    #[test]
    fn test_load_rst_project() {
        let storage = MockStorage::new()
            .with_file(
                "/docs/guide/index.rst",
                "Guide\n=====\n\n.. toctree::\n\n   intro\n   setup/index\n",
            )
            .with_file("/docs/guide/intro.rst", "Introduction\n============\n")
            .with_file(
                "/docs/guide/setup/index.rst",
                "Setup\n=====\n\n.. toctree::\n\n   install\n",
            )
            .with_file("/docs/guide/setup/install.rst", "Install\n-------\n");
        let config = project("guide", "/docs/guide");

        let loaded =
            Project::load(&config, &TocConfig::default(), &storage, &IdSequence::new()).unwrap();

        assert_eq!(loaded.id(), "guide");
        assert_eq!(loaded.name(), "GUIDE");
        assert_eq!(loaded.kind(), ProjectKind::Rst);
        assert_eq!(loaded.maxdepth(), 2);
        let names: Vec<_> = loaded.toctree().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Introduction", "setup"]);
        assert_eq!(loaded.toctree()[1].alias, "Setup");
        assert_eq!(loaded.first_link(), Some("guide/intro.html"));
    }

    #[test]
    fn test_rst_project_without_index_is_empty() {
        let storage = MockStorage::new().with_file("/docs/guide/intro.rst", "Intro\n=====\n");
        let config = project("guide", "/docs/guide");

        let loaded =
            Project::load(&config, &TocConfig::default(), &storage, &IdSequence::new()).unwrap();

        assert!(loaded.toctree().is_empty());
        assert_eq!(loaded.first_link(), None);
    }

    #[test]
    fn test_custom_master_doc_and_extensions() {
        let storage = MockStorage::new()
            .with_file("/docs/contents.txt", ".. toctree::\n\n   page\n")
            .with_file("/docs/page.txt", "Page\n====\n");
        let config = ProjectConfig {
            master_doc: "contents".to_owned(),
            ..project("docs", "/docs")
        };
        let toc = TocConfig {
            source_extension: "txt".to_owned(),
            link_extension: "htm".to_owned(),
            ..TocConfig::default()
        };

        let loaded = Project::load(&config, &toc, &storage, &IdSequence::new()).unwrap();

        assert_eq!(loaded.first_link(), Some("docs/page.htm"));
    }

    #[test]
    fn test_load_api_project_with_modules() {
        let storage = api_storage();
        let config = api_project("api", "/api", &["pkg.util", "pkg", "pkg.core"]);

        let loaded =
            Project::load(&config, &TocConfig::default(), &storage, &IdSequence::new()).unwrap();

        assert_eq!(loaded.kind(), ProjectKind::Api);
        let names: Vec<_> = loaded.toctree().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["pkg package", "pkg"]);
        assert_eq!(loaded.toctree()[1].alias, "Pkg");
        let children: Vec<_> = loaded.toctree()[1]
            .children
            .iter()
            .map(|i| i.link.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(children, vec!["api/pkg.core.html", "api/pkg.util.html"]);
        assert_eq!(loaded.first_link(), Some("api/pkg.html"));
    }

    #[test]
    fn test_load_api_project_scans_source_dir() {
        let storage = api_storage();
        let config = api_project("api", "/api", &[]);

        let loaded =
            Project::load(&config, &TocConfig::default(), &storage, &IdSequence::new()).unwrap();

        let names: Vec<_> = loaded.toctree().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["pkg package", "pkg"]);
    }

    #[test]
    fn test_api_project_skips_test_and_build_modules() {
        let storage = api_storage()
            .with_file("/api/tests.rst", "tests package\n=============\n")
            .with_file("/api/build_utils.rst", "build_utils module\n==================\n");
        let config = api_project("api", "/api", &[]);

        let loaded =
            Project::load(&config, &TocConfig::default(), &storage, &IdSequence::new()).unwrap();

        let names: Vec<_> = loaded.toctree().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["pkg package", "pkg"]);
        assert_eq!(storage.read_count("/api/tests.rst"), 0);
    }

    #[test]
    fn test_api_project_custom_excluded_module() {
        let storage = api_storage();
        let mut config = api_project("api", "/api", &["pkg", "pkg.core", "pkg.util"]);
        config.excluded_modules.push(r"\.util$".to_owned());

        let loaded =
            Project::load(&config, &TocConfig::default(), &storage, &IdSequence::new()).unwrap();

        let children: Vec<_> = loaded.toctree()[1]
            .children
            .iter()
            .map(|i| i.link.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(children, vec!["api/pkg.core.html"]);
    }

    #[test]
    fn test_api_project_invalid_pattern_fails() {
        let storage = api_storage();
        let mut config = api_project("api", "/api", &["pkg"]);
        config.excluded_modules.push("(unclosed".to_owned());

        let result = Project::load(&config, &TocConfig::default(), &storage, &IdSequence::new());

        assert!(matches!(result, Err(ProjectError::Pattern(_))));
    }

    #[test]
    fn test_api_project_missing_dir_fails() {
        let storage = MockStorage::new();
        let config = api_project("api", "/nowhere", &[]);

        let result = Project::load(&config, &TocConfig::default(), &storage, &IdSequence::new());

        assert!(matches!(result, Err(ProjectError::Storage(_))));
    }

    #[test]
    fn test_api_project_listed_modules_missing_dir_fails() {
        let storage = MockStorage::new();
        let config = api_project("api", "/nowhere", &["pkg"]);

        let result = Project::load(&config, &TocConfig::default(), &storage, &IdSequence::new());

        assert!(matches!(
            result,
            Err(ProjectError::Toc(TocError::MissingBaseDir(_)))
        ));
    }

    #[test]
    fn test_ids_drawn_from_shared_sequence() {
        let storage = api_storage();
        let config = api_project("api", "/api", &["pkg"]);
        let ids = IdSequence::starting_at(40);

        let loaded = Project::load(&config, &TocConfig::default(), &storage, &ids).unwrap();

        assert_eq!(loaded.toctree()[0].id, 40);
        assert_eq!(ids.peek(), 41);
    }
}
