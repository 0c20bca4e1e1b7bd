//! Prelude module for histscrub
//!
//! This module re-exports commonly used types to reduce boilerplate
//! imports.
//!
//! # Usage
//!
//! ```rust
//! use histscrub::prelude::*;
//! ```

pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::history::{HistoryRedactor, ShellHistory};
pub use crate::redaction::{CommandRedactor, RedactedCommand};
pub use crate::shell::ShellType;
pub use crate::types::Fingerprint;

pub use chrono::{DateTime, Utc};
