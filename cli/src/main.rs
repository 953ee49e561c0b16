#![deny(missing_docs)]

//! # oapispec CLI
//!
//! Command Line Interface for the Swagger 2.0 document generator.
//!
//! Supported Commands:
//! - `generate`: Manifest -> Swagger document (JSON or YAML).
//! - `schema-gen`: Rust struct -> Swagger definition.
//! - `validate`: Checks a JSON instance against a manifest model.
//! - `ui`: Writes a Swagger UI page.

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::error::CliResult;

mod error;
mod generate;
mod manifest;
mod schema_gen;
mod ui;
mod validate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Swagger 2.0 document generator")]
struct Cli {
    /// Log every assembly step (overrides RUST_LOG).
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble the document declared by a manifest.
    Generate(generate::GenerateArgs),
    /// Print the definition of a Rust struct.
    SchemaGen(schema_gen::SchemaGenArgs),
    /// Validate a JSON instance against a manifest model.
    Validate(validate::ValidateArgs),
    /// Write a Swagger UI page.
    Ui(ui::UiArgs),
}

/// Logs go to stderr so stdout only carries the document.
fn init_log(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

fn run(cli: &Cli) -> CliResult<bool> {
    match &cli.command {
        Commands::Generate(args) => generate::execute(args)?,
        Commands::SchemaGen(args) => schema_gen::execute(args)?,
        Commands::Validate(args) => return validate::execute(args),
        Commands::Ui(args) => ui::execute(args)?,
    }
    Ok(true)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_log(cli.verbose);

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
