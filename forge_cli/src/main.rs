//! # Forgequote CLI Application
//!
//! Terminal front end for the forging quote engine:
//!
//! - `forge weight` - ring / disc weight and material cost
//! - `forge quote` - multi-line quote totals from a JSON file
//! - `forge materials` - density table
//! - `forge profiles` - review model profiles from settings
//! - `forge review` - send a customer document to the review service
//!
//! Logs go to stderr (`RUST_LOG`, or `-v` for debug); results go to stdout.

mod args;
mod commands;
mod config;
mod gemini;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::args::{Cli, Commands};
use crate::commands::Outcome;
use crate::config::Settings;
use crate::gemini::GeminiClient;

fn init_logging(verbose: bool) {
    let default = if verbose {
        "forge_cli=debug,forge_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Dispatch a parsed command.
///
/// Settings are read only by the commands that use them, so a broken
/// settings file does not block `quote` or `materials`.
fn run(cli: Cli, out: &mut dyn Write) -> Result<Outcome> {
    let as_json = cli.global.json;
    let load_settings = || Settings::load(cli.global.config.as_deref());

    match cli.command {
        Commands::Weight(args) => {
            let settings = load_settings()?;
            let args = commands::complete_weight_args(args);
            commands::weight(&args, &settings, as_json, out)
        }
        Commands::Quote(args) => commands::quote(&args, as_json, out),
        Commands::Materials => commands::materials(as_json, out),
        Commands::Profiles => commands::profiles(&load_settings()?, as_json, out),
        Commands::Review(args) => {
            let settings = load_settings()?;
            let client = GeminiClient::new(&settings.review, args.api_key.clone())?;
            commands::review(&args, &settings, &client, as_json, out)
        }
    }
}

fn main() -> ExitCode {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let mut stdout = io::stdout().lock();
    match run(cli, &mut stdout) {
        Ok(Outcome::Done) | Ok(Outcome::NotReady) => ExitCode::SUCCESS,
        Ok(Outcome::Failed) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
