//! Project model and multi-project aggregation for doctool.
//!
//! This crate provides:
//! - [`Project`]: one documentation project with its resolved navigation
//! - [`Site`]: all configured projects, ranked, with the site-wide redirect
//!   and the [`Navigation`] document fed to the rendering layer
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use doctool_config::Config;
//! use doctool_site::Site;
//! use doctool_storage::FsStorage;
//!
//! let config = Config::load(None, None)?;
//! let storage = FsStorage::new(PathBuf::from("."));
//! let site = Site::build(&config, &storage);
//!
//! if let Some(redirect) = site.redirect() {
//!     println!("landing page: {redirect}");
//! }
//! # Ok(())
//! # }
//! ```

mod project;
mod site;

pub use project::{Project, ProjectError, ProjectKind, api_toctree};
pub use site::{Navigation, ProjectNavigation, Site};
