//! CLI command implementations.

pub(crate) mod first_link;
pub(crate) mod projects;
pub(crate) mod toc;

use std::path::{Path, PathBuf};

use doctool_config::{CliSettings, Config};
use doctool_site::Site;
use doctool_storage::FsStorage;

use crate::error::CliError;

pub(crate) use first_link::FirstLinkArgs;
pub(crate) use projects::ProjectsArgs;
pub(crate) use toc::TocArgs;

/// Load configuration and build the site from the local filesystem.
///
/// Source directories are resolved against the config file, so the storage
/// root only matters for configs without a file.
fn load_site(config_path: Option<&Path>, settings: &CliSettings) -> Result<Site, CliError> {
    let config = Config::load(config_path, Some(settings))?;
    match &config.config_path {
        Some(path) => tracing::info!(path = %path.display(), "Loaded configuration"),
        None => tracing::info!("No configuration file found, using defaults"),
    }
    tracing::debug!(
        projects = config.projects_resolved.len(),
        maxdepth = ?settings.maxdepth,
        only = ?settings.only,
        "Building site"
    );

    let storage = FsStorage::new(PathBuf::from("."));
    let site = Site::build(&config, &storage);
    tracing::info!(
        loaded = site.projects().len(),
        configured = config.projects_resolved.len(),
        "Site built"
    );
    Ok(site)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use pretty_assertions::assert_eq;

    use super::*;

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_site_logs_config_and_projects() {
        let temp = tempfile::tempdir().unwrap();
        let site_dir = temp.path().join("site");
        let guide = temp.path().join("guide");
        fs::create_dir_all(&site_dir).unwrap();
        fs::create_dir_all(&guide).unwrap();
        fs::write(guide.join("index.rst"), ".. toctree::\n\n   intro\n").unwrap();
        fs::write(guide.join("intro.rst"), "Intro\n=====\n").unwrap();
        let config_path = site_dir.join("doctool.toml");
        fs::write(
            &config_path,
            "[[projects]]\nid = \"guide\"\nsource_dir = \"../guide\"\n",
        )
        .unwrap();
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let site = tracing::subscriber::with_default(subscriber, || {
            load_site(Some(&config_path), &CliSettings::default())
        })
        .unwrap();

        assert_eq!(site.redirect(), Some("guide/intro.html"));
        let logs = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Loaded configuration"));
        assert!(logs.contains("Site built"));
        assert!(logs.contains("loaded=1"));
    }

    #[test]
    fn test_load_site_missing_config() {
        let temp = tempfile::tempdir().unwrap();

        let result = load_site(
            Some(&temp.path().join("doctool.toml")),
            &CliSettings::default(),
        );

        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
