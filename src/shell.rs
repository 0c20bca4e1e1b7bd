//! Shell dialect classification
//!
//! Maps a history file name (or any shell identifier such as `$SHELL`) to one
//! of the history formats the engine understands.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The on-disk history dialect of a shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    Unknown,
}

impl ShellType {
    /// Classify a file name or shell identifier by substring.
    ///
    /// The match is case-sensitive. Names containing none of `bash`, `fish`
    /// or `zsh` are `Unknown`.
    pub fn classify(name: &str) -> Self {
        if name.contains("bash") {
            ShellType::Bash
        } else if name.contains("fish") {
            ShellType::Fish
        } else if name.contains("zsh") {
            ShellType::Zsh
        } else {
            ShellType::Unknown
        }
    }

    /// Classify the value of a `$SHELL`-style variable, looking only at the
    /// final path component.
    pub fn from_shell_path(shell: &str) -> Self {
        let name = shell.rsplit('/').next().unwrap_or(shell);
        Self::classify(name)
    }

    /// Lowercase identifier, as used in config keys
    pub fn as_str(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
            ShellType::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ShellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShellType::Bash => "Bash",
            ShellType::Zsh => "Zsh",
            ShellType::Fish => "Fish",
            ShellType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_history_file_names() {
        assert_eq!(ShellType::classify(".bash_history"), ShellType::Bash);
        assert_eq!(ShellType::classify(".zsh_history"), ShellType::Zsh);
        assert_eq!(
            ShellType::classify("/home/u/.local/share/fish/fish_history"),
            ShellType::Fish
        );
        assert_eq!(ShellType::classify(".histfile"), ShellType::Unknown);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(ShellType::classify("BASH_HISTORY"), ShellType::Unknown);
    }

    #[test]
    fn test_from_shell_path() {
        assert_eq!(ShellType::from_shell_path("/bin/zsh"), ShellType::Zsh);
        assert_eq!(
            ShellType::from_shell_path("/usr/local/bin/fish"),
            ShellType::Fish
        );
        assert_eq!(ShellType::from_shell_path("bash"), ShellType::Bash);
        assert_eq!(ShellType::from_shell_path("/bin/sh"), ShellType::Unknown);
    }

    #[test]
    fn test_display_and_as_str() {
        assert_eq!(ShellType::Zsh.to_string(), "Zsh");
        assert_eq!(ShellType::Fish.as_str(), "fish");
    }
}
