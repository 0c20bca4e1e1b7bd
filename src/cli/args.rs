//! Command-line argument structures for histscrub

use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct RedactArgs {
    /// Shell dialect (defaults to the file name, then $SHELL)
    #[arg(short = 'S', long, value_enum)]
    pub shell: Option<ShellType>,

    /// Path to history file (located automatically if not provided)
    #[arg(short = 'F', long)]
    pub file: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short = 'O', long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Shell dialect (defaults to the file name, then $SHELL)
    #[arg(short = 'S', long, value_enum)]
    pub shell: Option<ShellType>,

    /// Path to history file (located automatically if not provided)
    #[arg(short = 'F', long)]
    pub file: Option<PathBuf>,

    /// Number of commands to show (defaults to preview.lines)
    #[arg(short = 'n', long)]
    pub lines: Option<usize>,

    /// Index of the first command to show
    #[arg(long, default_value = "0")]
    pub start: usize,
}

#[derive(Args)]
pub struct ClassifyArgs {
    /// File name or shell path to classify
    #[arg(value_name = "NAME")]
    pub name: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Write a default configuration file
    #[arg(long)]
    pub init: bool,

    /// Validate the loaded configuration
    #[arg(long)]
    pub validate: bool,
}

#[derive(clap::ValueEnum, Clone, Copy)]
pub enum ShellType {
    Zsh,
    Bash,
    Fish,
}

impl From<ShellType> for crate::shell::ShellType {
    fn from(shell: ShellType) -> Self {
        match shell {
            ShellType::Zsh => crate::shell::ShellType::Zsh,
            ShellType::Bash => crate::shell::ShellType::Bash,
            ShellType::Fish => crate::shell::ShellType::Fish,
        }
    }
}
