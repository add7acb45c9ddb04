//! Multi-project aggregation.
//!
//! [`Site::build`] loads every configured project concurrently, ranks them
//! and derives the site-wide redirect target. A project that fails to load
//! is logged and left out; it never aborts the whole site.
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use doctool_config::Config;
//! use doctool_site::Site;
//! use doctool_storage::FsStorage;
//!
//! let config = Config::load(None, None)?;
//! let storage = FsStorage::new(PathBuf::from("."));
//! let site = Site::build(&config, &storage);
//!
//! println!("{}", serde_json::to_string_pretty(&site.navigation())?);
//! ```

use doctool_config::Config;
use doctool_storage::Storage;
use doctool_toc::{IdSequence, TocItem};
use rayon::prelude::*;
use serde::Serialize;

use crate::project::{Project, ProjectKind};

/// Aggregated documentation site.
#[derive(Debug)]
pub struct Site {
    title: String,
    projects: Vec<Project>,
}

/// Navigation document handed to the rendering layer.
#[derive(Debug, Serialize)]
pub struct Navigation<'a> {
    /// Site title.
    pub title: &'a str,
    /// Landing page of the whole site.
    pub redirect: Option<&'a str>,
    /// Projects in rank order.
    pub projects: Vec<ProjectNavigation<'a>>,
}

/// Navigation of one project.
#[derive(Debug, Serialize)]
pub struct ProjectNavigation<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub rank: i64,
    pub api: bool,
    pub maxdepth: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_link: Option<&'a str>,
    pub toctree: &'a [TocItem],
}

impl Site {
    /// Load all projects of `config` from `storage`.
    ///
    /// Projects are built in parallel and share one identifier sequence, so
    /// item identifiers are unique across the site.
    #[must_use]
    pub fn build(config: &Config, storage: &dyn Storage) -> Self {
        let ids = IdSequence::new();
        let ranked = config.ranked_projects();

        // `collect` keeps the rank order of the parallel iterator.
        let projects: Vec<Project> = ranked
            .par_iter()
            .filter_map(|project| {
                match Project::load(project, &config.toc, storage, &ids) {
                    Ok(loaded) => Some(loaded),
                    Err(e) => {
                        tracing::warn!(project = %project.id, error = %e, "Failed to load project");
                        None
                    }
                }
            })
            .collect();

        tracing::info!(
            projects = projects.len(),
            configured = ranked.len(),
            "Built site"
        );

        Self {
            title: config.site.title.clone(),
            projects,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Loaded projects in rank order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Look up a loaded project by id.
    #[must_use]
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == id)
    }

    /// First link of the first ranked project that has one.
    #[must_use]
    pub fn redirect(&self) -> Option<&str> {
        self.projects.iter().find_map(Project::first_link)
    }

    /// Serializable navigation document.
    #[must_use]
    pub fn navigation(&self) -> Navigation<'_> {
        Navigation {
            title: &self.title,
            redirect: self.redirect(),
            projects: self
                .projects
                .iter()
                .map(|p| ProjectNavigation {
                    id: p.id(),
                    name: p.name(),
                    rank: p.rank(),
                    api: p.kind() == ProjectKind::Api,
                    maxdepth: p.maxdepth(),
                    first_link: p.first_link(),
                    toctree: p.toctree(),
                })
                .collect(),
        }
    }
}
