//! Configuration management for doctool.
//!
//! Parses `doctool.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! A configuration lists the documentation projects to aggregate:
//!
//! ```toml
//! [site]
//! title = "Platform Docs"
//! maxdepth = 3
//!
//! [[projects]]
//! id = "guide"
//! name = "User Guide"
//! source_dir = "guide"
//!
//! [[projects]]
//! id = "api"
//! source_dir = "${API_DOCS:-build/api}"
//! api = true
//! excluded_modules = ["^pkg\\.internal"]
//! ```
//!
//! Relative `source_dir` values are resolved against the directory of the
//! config file and normalized, so sibling directories (`../guide`) work.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `projects.source_dir` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "doctool.toml";

/// Module patterns every API project excludes (test and build packages).
pub const DEFAULT_EXCLUDED_MODULES: [&str; 2] = ["^test.*", "^build.*"];

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None/non-empty values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the depth hint of every project.
    pub maxdepth: Option<u32>,
    /// Keep only the projects with these ids.
    pub only: Vec<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,
    /// Table of contents parsing settings shared by all projects.
    pub toc: TocConfig,
    /// Projects as parsed from TOML (paths are relative strings).
    projects: Vec<ProjectConfigRaw>,

    /// Resolved projects (set after loading).
    #[serde(skip)]
    pub projects_resolved: Vec<ProjectConfig>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            toc: TocConfig::default(),
            projects: Vec::new(),
            projects_resolved: Vec::new(),
            config_path: None,
        }
    }
}

/// Site-wide configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title of the aggregated site.
    pub title: String,
    /// Default depth hint for project navigation.
    pub maxdepth: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            maxdepth: 3,
        }
    }
}

/// Table of contents parsing configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// Extension of source documents (without the dot).
    pub source_extension: String,
    /// Extension of rendered pages used in links (without the dot).
    pub link_extension: String,
    /// Token that starts a hidden region inside a toctree block.
    pub hidden_marker: String,
    /// Token that starts a new toctree block.
    pub directive_marker: String,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            source_extension: "rst".to_owned(),
            link_extension: "html".to_owned(),
            hidden_marker: ":hidden:".to_owned(),
            directive_marker: ".. toctree::".to_owned(),
        }
    }
}

/// Raw project configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ProjectConfigRaw {
    id: String,
    name: Option<String>,
    source_dir: Option<String>,
    rank: Option<i64>,
    api: bool,
    master_doc: Option<String>,
    maxdepth: Option<u32>,
    modules: Vec<String>,
    excluded_modules: Vec<String>,
}

/// Resolved project configuration with an absolute source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Unique project id, also the link namespace of the project's pages.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Directory holding the project's source documents.
    pub source_dir: PathBuf,
    /// Ordering among projects (lower first).
    pub rank: i64,
    /// Whether this is an auto-generated API reference project.
    pub api: bool,
    /// Base name of index documents.
    pub master_doc: String,
    /// Navigation depth hint handed to the rendering layer.
    pub maxdepth: u32,
    /// Dotted module names of an API project. Empty means "scan the source dir".
    pub modules: Vec<String>,
    /// Regex patterns of API modules left out of the navigation.
    ///
    /// Always starts with [`DEFAULT_EXCLUDED_MODULES`], followed by the
    /// project's own patterns.
    pub excluded_modules: Vec<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`projects.api.source_dir`").
        field: String,
        /// Error message (e.g., "${`API_DOCS`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `doctool.toml` in current directory and parents.
    /// Without any file, an empty configuration (no projects) is returned.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string, resolving paths against `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.resolve_projects(base_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Projects sorted by rank. Equal ranks keep their configuration order.
    #[must_use]
    pub fn ranked_projects(&self) -> Vec<&ProjectConfig> {
        let mut projects: Vec<&ProjectConfig> = self.projects_resolved.iter().collect();
        projects.sort_by_key(|p| p.rank);
        projects
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        if let Some(maxdepth) = settings.maxdepth {
            if maxdepth == 0 {
                return Err(ConfigError::Validation(
                    "maxdepth must be greater than 0".to_owned(),
                ));
            }
            for project in &mut self.projects_resolved {
                project.maxdepth = maxdepth;
            }
        }

        if !settings.only.is_empty() {
            if let Some(unknown) = settings
                .only
                .iter()
                .find(|id| !self.projects_resolved.iter().any(|p| &p.id == *id))
            {
                return Err(ConfigError::Validation(format!(
                    "unknown project id: {unknown}"
                )));
            }
            self.projects_resolved
                .retain(|p| settings.only.iter().any(|id| id == &p.id));
        }

        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_toc()?;
        self.validate_projects()?;
        Ok(())
    }

    fn validate_toc(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.toc.source_extension, "toc.source_extension")?;
        require_non_empty(&self.toc.link_extension, "toc.link_extension")?;
        require_non_empty(&self.toc.hidden_marker, "toc.hidden_marker")?;
        require_non_empty(&self.toc.directive_marker, "toc.directive_marker")?;
        if self.site.maxdepth == 0 {
            return Err(ConfigError::Validation(
                "site.maxdepth must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_projects(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for project in &self.projects_resolved {
            require_non_empty(&project.id, "projects.id")?;
            if project.id.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "projects.id cannot contain '/': {}",
                    project.id
                )));
            }
            if !seen.insert(project.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate project id: {}",
                    project.id
                )));
            }
            require_non_empty(
                &project.master_doc,
                &format!("projects.{}.master_doc", project.id),
            )?;
            if project.maxdepth == 0 {
                return Err(ConfigError::Validation(format!(
                    "projects.{}.maxdepth must be greater than 0",
                    project.id
                )));
            }
            for pattern in &project.excluded_modules {
                if let Err(e) = Regex::new(pattern) {
                    return Err(ConfigError::Validation(format!(
                        "projects.{}.excluded_modules: invalid pattern {pattern:?}: {e}",
                        project.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Expand and resolve raw projects against the config directory.
    fn resolve_projects(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let mut resolved = Vec::with_capacity(self.projects.len());

        for (position, raw) in self.projects.iter().enumerate() {
            let field = format!("projects.{}.source_dir", raw.id);
            let source_dir = match &raw.source_dir {
                Some(dir) => expand::expand_env(dir, &field)?,
                None => raw.id.clone(),
            };

            resolved.push(ProjectConfig {
                id: raw.id.clone(),
                name: raw.name.clone().unwrap_or_else(|| raw.id.clone()),
                source_dir: normalize_path(&config_dir.join(source_dir)),
                rank: raw
                    .rank
                    .unwrap_or_else(|| i64::try_from(position).unwrap_or(i64::MAX)),
                api: raw.api,
                master_doc: raw
                    .master_doc
                    .clone()
                    .unwrap_or_else(|| "index".to_owned()),
                maxdepth: raw.maxdepth.unwrap_or(self.site.maxdepth),
                modules: raw.modules.clone(),
                excluded_modules: excluded_modules(&raw.excluded_modules),
            });
        }

        self.projects_resolved = resolved;
        Ok(())
    }
}

/// Default exclusions followed by `extra`, without duplicates.
fn excluded_modules(extra: &[String]) -> Vec<String> {
    let mut patterns: Vec<String> = DEFAULT_EXCLUDED_MODULES
        .iter()
        .map(|p| (*p).to_owned())
        .collect();
    for pattern in extra {
        if !patterns.contains(pattern) {
            patterns.push(pattern.clone());
        }
    }
    patterns
}

/// Make `path` absolute and fold `.` and `..` components lexically.
///
/// Symlinks are not resolved and the path does not have to exist.
fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}
