//! `doctool first-link` command implementation.

use std::path::PathBuf;

use clap::Args;
use doctool_config::CliSettings;
use doctool_site::Site;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the first-link command.
#[derive(Args)]
pub(crate) struct FirstLinkArgs {
    /// Path to configuration file (default: auto-discover doctool.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project to look up (default: the whole site).
    #[arg(short, long, value_name = "ID")]
    project: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl FirstLinkArgs {
    /// Execute the first-link command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            only: self.project.iter().cloned().collect(),
            ..CliSettings::default()
        };
        let site = super::load_site(self.config.as_deref(), &cli_settings)?;

        let link = resolve_first_link(&site, self.project.as_deref())?;
        output.data(link)?;
        Ok(())
    }
}

/// First link of project `id`, or the site redirect without one.
fn resolve_first_link<'a>(site: &'a Site, id: Option<&str>) -> Result<&'a str, CliError> {
    match id {
        Some(id) => site
            .project(id)
            .ok_or_else(|| CliError::Validation(format!("project {id} failed to load")))?
            .first_link()
            .ok_or_else(|| CliError::Validation(format!("project {id} has no pages"))),
        None => site
            .redirect()
            .ok_or_else(|| CliError::Validation("no project has pages".to_owned())),
    }
}
