//! # Convert Subcommand
//!
//! Converts between ISBN-10 and ISBN-13. An ISBN-10 gains the `978` prefix
//! and a recomputed check digit; a `978` ISBN-13 converts back. `979`
//! ISBNs have no ISBN-10 form.

use anyhow::Result;
use clap::Args;

use idcheck_core::{isbn, IsbnVariant};

use crate::config::Settings;
use crate::{print_value, EXIT_INVALID, EXIT_VALID};

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// A valid ISBN-10, or a `978` ISBN-13 to convert back.
    pub isbn: String,
}

/// Convert `value` to the other ISBN form. `None` if it has none.
pub fn convert(value: &str) -> Option<(IsbnVariant, String)> {
    match isbn::variant(value)? {
        IsbnVariant::Isbn10 => {
            isbn::convert_isbn10_to_isbn13(value).map(|v| (IsbnVariant::Isbn13, v))
        }
        IsbnVariant::Isbn13 => {
            isbn::convert_isbn13_to_isbn10(value).map(|v| (IsbnVariant::Isbn10, v))
        }
    }
}

/// Execute the convert subcommand.
///
/// Exits 1 without output when the input is not a convertible ISBN.
pub fn run_convert(args: &ConvertArgs, settings: &Settings) -> Result<u8> {
    match convert(&args.isbn) {
        Some((target, converted)) => {
            tracing::debug!(to = %target, "converted ISBN");
            let key = match target {
                IsbnVariant::Isbn10 => "isbn10",
                IsbnVariant::Isbn13 => "isbn13",
            };
            print_value(settings.output, key, &converted)?;
            Ok(EXIT_VALID)
        }
        None => {
            eprintln!("INVALID: {:?} is not a convertible ISBN", args.isbn);
            Ok(EXIT_INVALID)
        }
    }
}
