//! `doctool projects` command implementation.

use std::path::PathBuf;

use clap::Args;
use doctool_config::CliSettings;
use doctool_site::{Project, ProjectKind, Site};
use doctool_toc::TocItem;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the projects command.
#[derive(Args)]
pub(crate) struct ProjectsArgs {
    /// Path to configuration file (default: auto-discover doctool.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProjectsArgs {
    /// Execute the projects command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let site = super::load_site(self.config.as_deref(), &CliSettings::default())?;

        output.highlight(&format!(
            "{} project(s) in {}",
            site.projects().len(),
            site.title()
        ));
        for (index, project) in site.projects().iter().enumerate() {
            output.data(&describe(index + 1, project))?;
        }
        Ok(())
    }
}

/// One listing line, e.g. `1. guide: User Guide (rank 0, rst, 12 items)`.
fn describe(position: usize, project: &Project) -> String {
    let kind = match project.kind() {
        ProjectKind::Rst => "rst",
        ProjectKind::Api => "api",
    };
    format!(
        "{position}. {}: {} (rank {}, {kind}, {} items)",
        project.id(),
        project.name(),
        project.rank(),
        count_items(project.toctree())
    )
}

fn count_items(items: &[TocItem]) -> usize {
    items
        .iter()
        .map(|item| 1 + count_items(&item.children))
        .sum()
}
