//! Configuration management for histscrub
//!
//! This module handles loading, validating, and saving the JSON
//! configuration: the subcommand whitelist, declared options, default
//! history file locations, and logging/preview settings.

use crate::error::{Error, Result};
use crate::shell::ShellType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".histscrub.json";

/// Programs known to dispatch on a second token
pub const DEFAULT_SUBCOMMAND_COMMANDS: &[&str] = &["git", "yarn", "npm", "aws", "gcloud", "go"];

/// Default number of commands shown by the preview
pub const DEFAULT_PREVIEW_LINES: usize = 10;

/// Main configuration structure for histscrub
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Redaction configuration
    pub redaction: RedactionConfig,

    /// Where to find history files
    pub import: ImportConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Preview rendering
    pub preview: PreviewConfig,
}

/// Configuration for the command redactor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactionConfig {
    /// Commands whose second token is kept as a subcommand
    pub subcommand_commands: Vec<String>,

    /// Options the redactor recognises per command, with their arity
    pub known_options: HashMap<String, Vec<OptionSpec>>,
}

/// A declared option of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Long name, without the leading `--`
    pub long: String,

    /// Single-character short name, without the leading `-`
    #[serde(default)]
    pub short: Option<char>,

    /// Whether the option requires an argument
    #[serde(default)]
    pub takes_value: bool,
}

/// Configuration for locating history files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Default history file per shell
    pub shell_history_paths: HashMap<String, PathBuf>,

    /// Directories scanned for files whose name contains "history"
    pub search_dirs: Vec<PathBuf>,
}

/// Configuration for logging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

/// Configuration for the human-readable preview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Number of commands to show
    pub lines: usize,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            subcommand_commands: DEFAULT_SUBCOMMAND_COMMANDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            known_options: HashMap::new(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        let mut shell_history_paths = HashMap::new();
        let mut search_dirs = Vec::new();

        if let Some(home) = home::home_dir() {
            shell_history_paths.insert("bash".to_string(), home.join(".bash_history"));
            shell_history_paths.insert("zsh".to_string(), home.join(".zsh_history"));
            shell_history_paths.insert(
                "fish".to_string(),
                home.join(".local/share/fish/fish_history"),
            );
            search_dirs.push(home.join(".local/share/fish"));
            search_dirs.push(home);
        }

        Self {
            shell_history_paths,
            search_dirs,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            lines: DEFAULT_PREVIEW_LINES,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path, falling back to defaults
    /// when the file does not exist
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let config = Self::read_from_path(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration without validating it
    pub fn read_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Result<PathBuf> {
        let home = home::home_dir().ok_or(Error::HomeDirectoryNotFound)?;
        Ok(home.join(DEFAULT_CONFIG_FILE))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self
            .redaction
            .subcommand_commands
            .iter()
            .any(|c| c.trim().is_empty())
        {
            return Err(Error::config_validation(
                "redaction.subcommand_commands",
                "entries must not be empty",
            ));
        }

        for (command, specs) in &self.redaction.known_options {
            if specs.iter().any(|s| s.long.is_empty()) {
                return Err(Error::ConfigValidation {
                    field: format!("redaction.known_options.{}", command),
                    reason: "every option needs a long name".to_string(),
                });
            }
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(Error::config_validation(
                    "logging.level",
                    "must be one of: trace, debug, info, warn, error",
                ));
            }
        }

        if self.preview.lines == 0 {
            return Err(Error::config_validation(
                "preview.lines",
                "must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Configured default history file for a shell, if any
    pub fn history_path_for(&self, shell: ShellType) -> Option<&PathBuf> {
        self.import.shell_history_paths.get(shell.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.redaction.subcommand_commands.len(), 6);
        assert!(config.redaction.subcommand_commands.contains(&"git".to_string()));
        assert!(config.redaction.known_options.is_empty());
        assert_eq!(config.preview.lines, DEFAULT_PREVIEW_LINES);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();

        config.redaction.subcommand_commands.push("  ".to_string());
        assert!(config.validate().is_err());

        config.redaction.subcommand_commands.pop();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        config.logging.level = "debug".to_string();
        config.preview.lines = 0;
        assert!(config.validate().is_err());

        config.preview.lines = 5;
        config.redaction.known_options.insert(
            "curl".to_string(),
            vec![OptionSpec {
                long: String::new(),
                short: Some('o'),
                takes_value: true,
            }],
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let config_path = temp_file.path().to_path_buf();

        let mut config = Config::default();
        config.preview.lines = 25;
        config.redaction.subcommand_commands.push("kubectl".to_string());
        config.redaction.known_options.insert(
            "curl".to_string(),
            vec![OptionSpec {
                long: "output".to_string(),
                short: Some('o'),
                takes_value: true,
            }],
        );

        config.save_to_path(&config_path).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.preview.lines, 25);
        assert!(loaded.redaction.subcommand_commands.contains(&"kubectl".to_string()));
        assert_eq!(loaded.redaction.known_options["curl"][0].short, Some('o'));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), r#"{"preview": {"lines": 3}}"#).unwrap();

        let loaded = Config::load_from_path(temp_file.path()).unwrap();
        assert_eq!(loaded.preview.lines, 3);
        assert_eq!(loaded.logging.level, "warn");
        assert_eq!(loaded.redaction.subcommand_commands.len(), 6);
    }

    #[test]
    fn test_read_skips_validation() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), r#"{"preview": {"lines": 0}}"#).unwrap();

        let raw = Config::read_from_path(temp_file.path()).unwrap();
        assert_eq!(raw.preview.lines, 0);
        assert!(Config::load_from_path(temp_file.path()).is_err());
    }

    #[test]
    fn test_missing_file_yields_default() {
        let loaded = Config::load_from_path(Path::new("/nonexistent/histscrub.json")).unwrap();
        assert_eq!(loaded.preview.lines, DEFAULT_PREVIEW_LINES);
    }
}
