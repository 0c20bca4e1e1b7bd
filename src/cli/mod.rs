//! Command-line interface module for histscrub
//!
//! This module is organized into submodules:
//! - `args`: Command-line argument structures
//! - `handlers`: Command handler implementations

mod args;
mod handlers;

pub use args::*;
use handlers::*;

use crate::config::Config;
use crate::error::Result;
use crate::history::HistoryRedactor;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// histscrub - Shell history redaction engine
#[derive(Parser)]
#[command(name = "histscrub")]
#[command(about = "Redact shell history down to commands, subcommands and flag names")]
#[command(version, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Redact a history file and print it as JSON
    Redact(RedactArgs),
    /// Show a human-readable preview of a redacted history file
    Preview(PreviewArgs),
    /// Show which shell dialect a name maps to
    Classify(ClassifyArgs),
    /// Show configuration
    Config(ConfigArgs),
}

/// Main CLI application
pub struct CliApp {
    pub config: Config,
    pub history: HistoryRedactor,
    pub verbose: bool,
    pub quiet: bool,
}

impl CliApp {
    /// Create a new CLI application
    pub fn new(cli: &Cli) -> Result<Self> {
        let config_path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::default_config_path()?,
        };
        let config = Config::read_from_path(&config_path)?;
        // `config --validate` reports problems itself
        if !matches!(cli.command, Commands::Config(_)) {
            config.validate()?;
        }

        let history = HistoryRedactor::new(&config);

        Ok(Self {
            config,
            history,
            verbose: cli.verbose,
            quiet: cli.quiet,
        })
    }

    /// Run the CLI application
    pub fn run(&self, command: &Commands) -> Result<()> {
        match command {
            Commands::Redact(args) => handle_redact(self, args),
            Commands::Preview(args) => handle_preview(self, args),
            Commands::Classify(args) => handle_classify(self, args),
            Commands::Config(args) => handle_config(self, args),
        }
    }

    pub fn verbose_println(&self, message: &str) {
        if self.verbose && !self.quiet {
            eprintln!("[verbose] {}", message);
        }
    }
}
