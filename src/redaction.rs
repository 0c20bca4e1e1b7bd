//! Command redaction for histscrub
//!
//! Reduces a tokenized command line to its shape: the program name, an
//! optional subcommand for programs known to dispatch on one, and the names
//! of the flags that were passed. Argument values and positional arguments
//! never make it into a [`RedactedCommand`].

use crate::config::{OptionSpec, RedactionConfig};
use crate::error::{Error, Result};
use crate::tokenize::tokenize;
use crate::types::Fingerprint;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One successfully parsed history record with its arguments stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RedactedCommand {
    /// First token of the command line
    pub command: String,
    /// Second token, only for whitelisted commands; empty otherwise
    pub subcommand: String,
    /// Flag names in encounter order, without dashes or values
    pub options: Vec<String>,
    /// Number of shell words in the full command line
    pub num_tokens: usize,
    /// Length in characters (not bytes) of the original command line
    pub length: usize,
    /// Fingerprint of the original command line
    pub sha1: Fingerprint,
    /// When the command was issued, if the history format records it
    pub timestamp: Option<DateTime<Utc>>,
}

impl RedactedCommand {
    /// Single line preview suitable for showing a user
    pub fn preview(&self) -> String {
        let mut preview = format!("{} {}", self.command, self.subcommand);
        if !self.options.is_empty() {
            preview.push_str(" [flags: ");
            preview.push_str(&self.options.join(","));
            preview.push(']');
        }
        preview
    }
}

/// Turns token streams into [`RedactedCommand`]s
///
/// The subcommand whitelist and declared options are fixed when the
/// redactor is built.
#[derive(Debug, Clone)]
pub struct CommandRedactor {
    subcommand_commands: HashSet<String>,
    known_options: HashMap<String, Vec<OptionSpec>>,
}

impl CommandRedactor {
    /// Create a redactor with the default whitelist and no declared options
    pub fn new() -> Self {
        Self::from_config(&RedactionConfig::default())
    }

    /// Create a redactor from configuration
    pub fn from_config(config: &RedactionConfig) -> Self {
        Self {
            subcommand_commands: config.subcommand_commands.iter().cloned().collect(),
            known_options: config.known_options.clone(),
        }
    }

    /// Whether `command` is known to take a subcommand
    pub fn has_subcommand(&self, command: &str) -> bool {
        self.subcommand_commands.contains(command)
    }

    /// Tokenize and redact a single command line
    pub fn redact_line(
        &self,
        line: &str,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<RedactedCommand> {
        let tokens = tokenize(line)?;
        let mut redacted = self.redact(&tokens, line)?;
        redacted.timestamp = timestamp;
        Ok(redacted)
    }

    /// Redact an already tokenized command line.
    ///
    /// `original` is the exact text `tokens` came from; it is measured and
    /// fingerprinted but never stored.
    pub fn redact(&self, tokens: &[String], original: &str) -> Result<RedactedCommand> {
        let command = tokens
            .first()
            .filter(|command| !command.is_empty())
            .ok_or(Error::EmptyCommand)?;

        let (subcommand, args) = match tokens.get(1) {
            Some(sub) if self.has_subcommand(command) => (sub.clone(), &tokens[2..]),
            _ => (String::new(), &tokens[1..]),
        };

        let options = self.scan_options(command, args)?;

        Ok(RedactedCommand {
            command: command.clone(),
            subcommand,
            options,
            num_tokens: tokens.len(),
            length: original.chars().count(),
            sha1: Fingerprint::of(original),
            timestamp: None,
        })
    }

    /// Collect flag names from `args`.
    ///
    /// Options declared for `command` are matched first and arity-checked.
    /// Anything else that looks like a flag is recorded by name with its
    /// `=value` dropped. Positional arguments are skipped and `--` ends the
    /// scan.
    fn scan_options(&self, command: &str, args: &[String]) -> Result<Vec<String>> {
        let declared = self
            .known_options
            .get(command)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let mut options = Vec::new();
        let mut args = args.iter();

        while let Some(arg) = args.next() {
            if arg == "--" {
                break;
            }
            if arg.len() < 2 || !arg.starts_with('-') {
                continue;
            }

            let (flag, is_long) = match arg.strip_prefix("--") {
                Some(long) => (long, true),
                None => (&arg[1..], false),
            };
            let (name, inline_value) = match flag.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (flag, None),
            };
            if name.is_empty() {
                continue;
            }

            let recognised = if is_long {
                declared
                    .iter()
                    .find(|spec| spec.long == name)
                    .map(|spec| (name, spec.takes_value && inline_value.is_none()))
            } else {
                match_short_cluster(declared, name, inline_value.is_some())
            };

            match recognised {
                Some((recorded, needs_next)) => {
                    if needs_next && args.next().is_none() {
                        return Err(Error::MissingOptionArgument {
                            option: recorded.to_string(),
                        });
                    }
                    options.push(recorded.to_string());
                }
                None => options.push(name.to_string()),
            }
        }

        Ok(options)
    }
}

impl Default for CommandRedactor {
    fn default() -> Self {
        Self::new()
    }
}

/// Match a bundle of short flags against the declared options.
///
/// Every character up to the first value-taking option must be declared.
/// Returns the flag text to record (ending at the value-taking option, so
/// an attached value such as `-ofile` is cut off) and whether the value
/// must come from the next token.
fn match_short_cluster<'a>(
    declared: &[OptionSpec],
    cluster: &'a str,
    has_inline_value: bool,
) -> Option<(&'a str, bool)> {
    for (idx, c) in cluster.char_indices() {
        let spec = declared.iter().find(|spec| spec.short == Some(c))?;
        if spec.takes_value {
            let end = idx + c.len_utf8();
            let attached = end < cluster.len() || has_inline_value;
            return Some((&cluster[..end], !attached));
        }
    }
    Some((cluster, false))
}
