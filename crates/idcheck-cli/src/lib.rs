//! # idcheck-cli: Command-Line Interface
//!
//! Provides the `idcheck` binary over `idcheck-core`.
//!
//! ## Subcommands
//!
//! - `idcheck validate`: Validate one or more values of a kind; exit 1 if any fails.
//! - `idcheck inspect`: Full report for one value.
//! - `idcheck format`: Print form of a card number, IBAN, or ISBN.
//! - `idcheck mask`: Mask a card number.
//! - `idcheck convert`: ISBN-10 → ISBN-13.
//! - `idcheck kinds`: List supported identifier kinds.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from logic; handlers delegate to
//!   `idcheck-core`.
//! - Handlers return `anyhow::Result<u8>` where the `u8` is the exit code.
//!   `Err` is reserved for usage errors (bad config, unsupported country),
//!   never for invalid input.

pub mod config;
pub mod convert;
pub mod format;
pub mod inspect;
pub mod mask;
pub mod validate;

use anyhow::Result;
use serde::Serialize;

use crate::config::OutputFormat;

/// Exit code when every value is valid.
pub const EXIT_VALID: u8 = 0;

/// Exit code when at least one value is invalid.
pub const EXIT_INVALID: u8 = 1;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a single string result in the requested format.
pub fn print_value(output: OutputFormat, key: &str, value: &str) -> Result<()> {
    println!("{}", render_value(output, key, value)?);
    Ok(())
}

/// Render a single string result. Text is the bare value; JSON wraps it as
/// `{"<key>": "<value>"}`.
pub fn render_value(output: OutputFormat, key: &str, value: &str) -> Result<String> {
    match output {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => {
            let mut map = serde_json::Map::new();
            map.insert(key.to_string(), serde_json::Value::from(value));
            Ok(serde_json::to_string_pretty(&map)?)
        }
    }
}
