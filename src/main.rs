//! histscrub - Shell history redaction engine
//!
//! This is the main entry point for the histscrub command-line application.
//! It loads configuration, sets up logging, and reports errors.

use clap::Parser;
use histscrub::cli::{Cli, CliApp};
use std::process;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
    let cli = Cli::parse();

    let app = match CliApp::new(&cli) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // RUST_LOG wins over the configured level
    let level = if cli.verbose {
        "debug"
    } else {
        app.config.logging.level.as_str()
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = app.run(&cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
