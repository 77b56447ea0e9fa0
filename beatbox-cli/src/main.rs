//! BeatBox CLI - Command-line interface
//!
//! Resolves `mapbox://` locators and style resources using the BeatBox
//! library.

mod commands;
mod error;
mod logging;

use clap::{Parser, Subcommand};

use commands::common::ApiArgs;
use commands::{locator, style};
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "beatbox", version, about = "Translate mapbox:// locators into HTTP URLs")]
struct Cli {
    #[command(flatten)]
    api: ApiArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the components of a locator as JSON
    Parse {
        /// Locator, e.g. mapbox://styles/mapbox/streets-v11
        locator: String,
    },

    /// Convert locators to HTTP URLs
    Url {
        /// One or more locators
        #[arg(required = true)]
        locators: Vec<String>,
    },

    /// Rewrite the locators in a style document
    Translate {
        /// Local style file, style URL or style locator
        input: String,
    },

    /// List the resources a style depends on
    Resources {
        /// Style URL or style locator
        input: String,

        /// Print fetchable URLs one per line instead of JSON
        #[arg(long)]
        urls: bool,
    },
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Parse { locator } => locator::run_parse(&locator),
        Commands::Url { locators } => locator::run_url(&cli.api, &locators),
        Commands::Translate { input } => style::run_translate(&cli.api, &input),
        Commands::Resources { input, urls } => style::run_resources(&cli.api, &input, urls),
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    tracing::debug!(command = ?cli.command, "Running command");

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}
