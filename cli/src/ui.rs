#![deny(missing_docs)]

//! # UI Command
//!
//! Writes a Swagger UI page pointing at a published document.

use crate::error::CliResult;
use crate::generate::write_output;
use oapispec_core::generate_swagger_ui;
use std::path::PathBuf;

/// Arguments for the ui command.
#[derive(clap::Args, Debug, Clone)]
pub struct UiArgs {
    /// URL the page loads the document from.
    #[clap(long)]
    pub spec_url: String,

    /// Page title.
    #[clap(long)]
    pub title: Option<String>,

    /// Base URL of the swagger-ui-dist assets.
    #[clap(long)]
    pub asset_source: Option<String>,

    /// Output path for the HTML page. If not provided, prints to stdout.
    #[clap(long, env = "OAPISPEC_OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Executes the page generation.
pub fn execute(args: &UiArgs) -> CliResult<()> {
    let page = generate_swagger_ui(
        &args.spec_url,
        args.title.as_deref(),
        args.asset_source.as_deref(),
    );
    match &args.output {
        Some(path) => write_output(path, &page),
        None => {
            println!("{}", page);
            Ok(())
        }
    }
}
