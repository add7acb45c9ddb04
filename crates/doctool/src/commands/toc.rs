//! `doctool toc` command implementation.

use std::path::PathBuf;

use clap::Args;
use doctool_config::CliSettings;
use doctool_site::Site;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the toc command.
#[derive(Args)]
pub(crate) struct TocArgs {
    /// Path to configuration file (default: auto-discover doctool.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only include these projects (repeatable).
    #[arg(short, long = "project", value_name = "ID")]
    projects: Vec<String>,

    /// Depth hint for every project (overrides config).
    #[arg(long)]
    maxdepth: Option<u32>,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    compact: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl TocArgs {
    /// Execute the toc command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            maxdepth: self.maxdepth,
            only: self.projects,
        };
        let site = super::load_site(self.config.as_deref(), &cli_settings)?;

        if site.projects().is_empty() {
            output.warning("No projects loaded");
        }

        output.data(&render_navigation(&site, self.compact)?)?;
        Ok(())
    }
}

/// Serialize the navigation document of `site`.
fn render_navigation(site: &Site, compact: bool) -> Result<String, CliError> {
    let navigation = site.navigation();
    let json = if compact {
        serde_json::to_string(&navigation)?
    } else {
        serde_json::to_string_pretty(&navigation)?
    };
    Ok(json)
}
