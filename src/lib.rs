//! histscrub - Shell history redaction engine
//!
//! This library turns a raw shell history file into a list of redacted
//! command records:
//! - Reassembling records across Bash, Zsh and Fish history formats
//! - Splitting each command line into shell words with quoting rules
//! - Keeping the command, subcommand and flag names while dropping every
//!   argument value
//! - Fingerprinting the original text so duplicates can be detected without
//!   storing it
//!
//! # Examples
//!
//! ```rust
//! use histscrub::CommandRedactor;
//!
//! let redactor = CommandRedactor::new();
//! let cmd = redactor.redact_line("git commit -m 'my secret message'", None)?;
//! assert_eq!(cmd.command, "git");
//! assert_eq!(cmd.subcommand, "commit");
//! assert_eq!(cmd.options, vec!["m"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::Path;

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod prelude;
pub mod redaction;
pub mod shell;
pub mod tokenize;
pub mod types;

pub use config::Config;
pub use error::{Error, ParseError, Result};
pub use history::{HistoryRedactor, HistoryStats, RecordAssembler, ShellHistory};
pub use redaction::{CommandRedactor, RedactedCommand};
pub use shell::ShellType;
pub use tokenize::tokenize;
pub use types::Fingerprint;

/// Redact a history file with the default configuration.
///
/// Returns `Ok(None)` when the file name does not classify as `target`.
pub fn redact_history_file(path: &Path, target: ShellType) -> Result<Option<ShellHistory>> {
    HistoryRedactor::default().redact_file(path, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_an_error() {
        let result = redact_history_file(Path::new("/nonexistent/.bash_history"), ShellType::Bash);
        assert!(matches!(result, Err(Error::HistoryFileNotFound { .. })));
    }

    #[test]
    fn test_dialect_mismatch_is_none() {
        let file = tempfile::Builder::new()
            .prefix("zsh_history")
            .tempfile()
            .unwrap();
        let result = redact_history_file(file.path(), ShellType::Bash).unwrap();
        assert!(result.is_none());
    }
}
