//! # onem
//!
//! Command line front end for the `onem` library: renders TOML/JSON screen
//! descriptors into the JSON document the ONEm platform accepts.
//!
//! ```bash
//! onem render signup.toml --pretty
//! onem check signup.toml
//! onem schema -o descriptor-schema.json
//! ```

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use colored::Colorize;

#[macro_use]
extern crate log;

/// Subcommand implementations.
mod commands;

#[derive(Parser, Debug)]
#[command(name = "onem", version, about = "Render ONEm menu and form descriptors")]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a descriptor into the platform JSON document.
    Render {
        /// Descriptor file (`.toml` or `.json`).
        input: PathBuf,
        /// Correlation id, overriding the one in the descriptor.
        #[arg(long)]
        corr_id: Option<String>,
        /// Indent the output.
        #[arg(long)]
        pretty: bool,
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a descriptor without rendering it.
    Check {
        /// Descriptor file (`.toml` or `.json`).
        input: PathBuf,
    },
    /// Print the JSON Schema of the descriptor format.
    Schema {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Render {
            input,
            corr_id,
            pretty,
            output,
        } => commands::render(&input, corr_id, pretty, output.as_deref()),
        Commands::Check { input } => {
            let summary = commands::check(&input)?;
            println!("{}", summary.green());
            Ok(())
        }
        Commands::Schema { output } => commands::schema(output.as_deref()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", format!("{e:#}").red());
            ExitCode::FAILURE
        }
    }
}
