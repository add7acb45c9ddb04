//! doctool CLI - Documentation aggregator.
//!
//! Provides commands for:
//! - `toc`: Print the navigation document of all projects as JSON
//! - `first-link`: Print the landing page of the site or of one project
//! - `projects`: List configured projects in rank order

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{FirstLinkArgs, ProjectsArgs, TocArgs};
use output::Output;

/// doctool - Documentation aggregator.
#[derive(Parser)]
#[command(name = "doctool", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the navigation document as JSON.
    Toc(TocArgs),
    /// Print the first link of the site or of a project.
    FirstLink(FirstLinkArgs),
    /// List configured projects.
    Projects(ProjectsArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Toc(args) => args.verbose,
            Self::FirstLink(args) => args.verbose,
            Self::Projects(args) => args.verbose,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Toc(args) => args.execute(),
        Commands::FirstLink(args) => args.execute(),
        Commands::Projects(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
