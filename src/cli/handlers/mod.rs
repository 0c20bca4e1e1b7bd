//! Command handler implementations for histscrub CLI
//!
//! - `redact`: Redaction and preview of history files
//! - `config`: Configuration and classification handlers

mod config;
mod redact;

pub use config::*;
pub use redact::*;
