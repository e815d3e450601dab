//! Validate command

use anyhow::Result;

use super::load_spec;
use crate::cli::ValidateArgs;
use crate::output;

pub fn run(args: ValidateArgs) -> Result<()> {
    let spec = load_spec(&args.manifest)?;

    output::success(&format!("Manifest {} is valid", args.manifest));
    output::kv("project", spec.name());
    output::kv("sources", &spec.sources().len().to_string());
    output::kv(
        "scm import",
        if spec.scm_import().is_some() {
            "enabled"
        } else {
            "disabled"
        },
    );

    Ok(())
}
