//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// rdproject - Declarative Rundeck project configuration
#[derive(Parser, Debug)]
#[command(name = "rdproject")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(flatten)]
    pub host: HostArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Host settings, overriding the config file and environment
#[derive(Args, Debug, Default, Clone)]
pub struct HostArgs {
    /// Path to the host config file
    #[arg(short, long, global = true, env = "RDPROJECT_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    /// Project storage root
    #[arg(long, global = true)]
    pub datadir: Option<Utf8PathBuf>,

    /// Server base directory
    #[arg(long, global = true)]
    pub basedir: Option<Utf8PathBuf>,

    /// Directory of template namespaces searched before the built-in ones
    #[arg(long, global = true)]
    pub templates_dir: Option<Utf8PathBuf>,

    /// Leave owner and group of generated files untouched
    #[arg(long, global = true)]
    pub skip_ownership: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or update a project from a manifest
    Create(CreateArgs),

    /// Show the property files a manifest would produce
    Plan(PlanArgs),

    /// Validate a manifest without writing anything
    Validate(ValidateArgs),

    /// Delete a project and all its files
    Delete(DeleteArgs),

    /// Show the current configuration of a project
    Show(ShowArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project manifest (YAML or JSON)
    pub manifest: Utf8PathBuf,

    /// Print the plan instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Project manifest (YAML or JSON)
    pub manifest: Utf8PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Project manifest (YAML or JSON)
    pub manifest: Utf8PathBuf,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Project name
    pub name: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project name
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
