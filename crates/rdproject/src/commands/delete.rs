//! Delete command

use anyhow::Result;
use dialoguer::Confirm;
use rdproject_projects::{ProjectConfigurator, ProjectRef};

use super::load_host_config;
use crate::cli::{DeleteArgs, HostArgs};
use crate::output;

pub fn run(args: DeleteArgs, host: &HostArgs) -> Result<()> {
    let config = load_host_config(host)?;
    let project = ProjectRef::new(&args.name)?;
    let project_dir = config.paths().project_dir(project.name());

    if !project_dir.exists() {
        output::info(&format!("Project '{}' does not exist", project.name()));
        return Ok(());
    }

    // Confirm deletion
    if !args.force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete project '{}' and everything under {}?",
                project.name(),
                project_dir
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            output::info("Cancelled");
            return Ok(());
        }
    }

    ProjectConfigurator::from_host_config(&config).delete(&project)?;
    output::success(&format!("Project '{}' deleted", project.name()));

    Ok(())
}
