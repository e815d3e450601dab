//! rdproject CLI - Declarative Rundeck project configuration
//!
//! This is the main entry point for the rdproject command-line interface.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    // Run command
    match cli.command {
        Commands::Create(args) => commands::create::run(args, &cli.host),
        Commands::Plan(args) => commands::plan::run(args, &cli.host),
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Delete(args) => commands::delete::run(args, &cli.host),
        Commands::Show(args) => commands::show::run(args, &cli.host),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Info shows every directory and file the run changes
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
