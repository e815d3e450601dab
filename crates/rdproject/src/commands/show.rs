//! Show command: current property files of a project

use anyhow::{bail, Context, Result};
use rdproject_projects::parse_properties;
use rdproject_projects::plan::{ProjectLayout, PROJECT_PROPERTIES_FILE};
use rdproject_projects::ProjectRef;
use std::collections::BTreeMap;
use std::fs;
use tabled::{settings::Style, Table, Tabled};

use super::load_host_config;
use crate::cli::{HostArgs, ShowArgs};
use crate::output;

#[derive(Tabled)]
struct PropertyRow {
    key: String,
    value: String,
}

pub fn run(args: ShowArgs, host: &HostArgs) -> Result<()> {
    let config = load_host_config(host)?;
    let project = ProjectRef::new(&args.name)?;
    let layout = ProjectLayout::new(&config.paths(), project.name());

    if !layout.project_properties.exists() {
        bail!(
            "Project '{}' is not configured: {} not found",
            project.name(),
            layout.project_properties
        );
    }

    let mut files = BTreeMap::new();
    for path in [&layout.project_properties, &layout.scm_import_properties] {
        if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            let name = path.file_name().unwrap_or(PROJECT_PROPERTIES_FILE).to_string();
            files.insert(name, parse_properties(&text));
        }
    }

    if args.json {
        let json = serde_json::to_string_pretty(&files)
            .context("Failed to serialize properties to JSON")?;
        println!("{}", json);
        return Ok(());
    }

    if !layout.var_dir.is_dir() {
        output::warning(&format!("{} is missing, re-run create", layout.var_dir));
    }

    for (name, properties) in files {
        output::header(&name);
        let rows: Vec<PropertyRow> = properties
            .into_iter()
            .map(|(key, value)| PropertyRow { key, value })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{}", table);
    }

    Ok(())
}
