//! Create command

use anyhow::Result;
use rdproject_projects::ProjectConfigurator;

use super::{load_host_config, load_spec};
use crate::cli::{CreateArgs, HostArgs};
use crate::commands::plan::print_plan;
use crate::output;

pub fn run(args: CreateArgs, host: &HostArgs) -> Result<()> {
    let config = load_host_config(host)?;
    let spec = load_spec(&args.manifest)?;
    let configurator = ProjectConfigurator::from_host_config(&config);

    if args.dry_run {
        let plan = configurator.plan(&spec)?;
        print_plan(&plan, &config)?;
        output::info("Dry run, nothing written");
        return Ok(());
    }

    configurator.create(&spec)?;

    output::success(&format!("Project '{}' configured", spec.name()));
    output::kv("location", config.paths().project_dir(spec.name()).as_str());

    Ok(())
}
