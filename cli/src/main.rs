#![deny(missing_docs)]

//! # TSGen CLI
//!
//! Command Line Interface for the schema type synthesizer.
//!
//! Supported Commands:
//! - `types`: Prints a type alias per component schema.
//! - `inputs`: Prints the composed input shape of every operation.

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod config;
mod error;
mod inputs;
mod types;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI -> TypeScript type synthesis")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print one type alias per component schema.
    Types(types::TypesArgs),
    /// Print the composed input shape of every operation.
    Inputs(inputs::InputsArgs),
}

/// `RUST_LOG` takes precedence over `-v` when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from_level(level).into()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Types(args) => types::execute(args)?,
        Commands::Inputs(args) => inputs::execute(args)?,
    }

    Ok(())
}
