//! Command implementations and the setup they share

pub mod create;
pub mod delete;
pub mod plan;
pub mod show;
pub mod validate;

use anyhow::{Context, Result};
use camino::Utf8Path;
use rdproject_core::{ConfigLoader, HostConfig};
use rdproject_projects::{ProjectManifest, ProjectSpec};
use tracing::debug;

use crate::cli::HostArgs;

/// Load host configuration and apply CLI overrides
pub fn load_host_config(args: &HostArgs) -> Result<HostConfig> {
    let loader = match &args.config {
        Some(path) => ConfigLoader::with_file(path.clone()),
        None => ConfigLoader::new(),
    };

    let mut config = loader.load().context("Failed to load host configuration")?;

    if let Some(datadir) = &args.datadir {
        config.datadir = datadir.clone();
    }
    if let Some(basedir) = &args.basedir {
        config.basedir = basedir.clone();
    }
    if let Some(templates_dir) = &args.templates_dir {
        config.templates_dir = Some(templates_dir.clone());
    }
    if args.skip_ownership {
        config.manage_ownership = false;
    }

    config.validate()?;
    debug!("Host configuration: {:?}", config);

    Ok(config)
}

/// Read and validate a project manifest
pub fn load_spec(manifest: &Utf8Path) -> Result<ProjectSpec> {
    let spec = ProjectManifest::from_file(manifest)
        .and_then(ProjectManifest::into_spec)
        .with_context(|| format!("Invalid project manifest: {}", manifest))?;
    Ok(spec)
}
