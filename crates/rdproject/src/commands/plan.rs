//! Plan command: render property files without writing them

use anyhow::{Context, Result};
use rdproject_core::HostConfig;
use rdproject_projects::plan::PROPERTIES_TEMPLATE;
use rdproject_projects::{ProjectPlan, PropertyMap, TeraRenderer};
use serde::Serialize;
use std::collections::BTreeMap;

use super::{load_host_config, load_spec};
use crate::cli::PlanArgs;
use crate::output;

#[derive(Serialize)]
struct PlanOutput<'a> {
    project: &'a str,
    directories: Vec<String>,
    files: BTreeMap<String, &'a PropertyMap>,
}

pub fn run(args: PlanArgs, host: &crate::cli::HostArgs) -> Result<()> {
    let config = load_host_config(host)?;
    let spec = load_spec(&args.manifest)?;
    let plan = ProjectPlan::build(&spec, &config.paths())?;

    if args.json {
        let out = PlanOutput {
            project: spec.name(),
            directories: plan.directories().iter().map(|d| d.to_string()).collect(),
            files: plan
                .files()
                .into_iter()
                .map(|(path, properties)| (path.to_string(), properties))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&out).context("Failed to serialize plan to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    print_plan(&plan, &config)
}

/// Print directories and rendered files of a plan
pub fn print_plan(plan: &ProjectPlan, config: &HostConfig) -> Result<()> {
    let renderer = match &config.templates_dir {
        Some(dir) => TeraRenderer::with_templates_dir(dir.clone()),
        None => TeraRenderer::new(),
    };

    output::header("Directories");
    for dir in plan.directories() {
        println!("  {}", dir);
    }

    for (path, properties) in plan.files() {
        output::header(path.as_str());
        let rendered = renderer.render_to_string(&plan.cookbook, PROPERTIES_TEMPLATE, properties)?;
        print!("{}", rendered);
    }

    Ok(())
}
