//! Type definitions for histscrub
//!
//! Type-safe wrappers around primitive values so a fingerprint is never
//! confused with the command text it was computed from.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;
use std::ops::Deref;

/// Hex-encoded SHA-1 digest of an original command line
///
/// Used downstream to detect exact duplicates without keeping the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute the fingerprint of a command line
    pub fn of(text: &str) -> Self {
        Self(hex::encode(Sha1::digest(text.as_bytes())))
    }

    /// Get a reference to the hex digest
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume self and return the hex digest
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for Fingerprint {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            Fingerprint::of("abc").as_str(),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            Fingerprint::of("").as_str(),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn test_stable_across_calls() {
        assert_eq!(
            Fingerprint::of("ls --foo=bar"),
            Fingerprint::of("ls --foo=bar")
        );
        assert_ne!(Fingerprint::of("ls"), Fingerprint::of("ls "));
    }

    #[test]
    fn test_hex_shape() {
        let fp = Fingerprint::of("git push --force");
        assert_eq!(fp.len(), 40);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_display_and_conversions() {
        let fp = Fingerprint::of("abc");
        let shown = format!("{}", fp);
        let as_ref: &str = fp.as_ref();
        assert_eq!(shown, as_ref);
        let raw: String = fp.clone().into();
        assert_eq!(raw, fp.into_string());
    }
}
