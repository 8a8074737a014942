//! # Format Subcommand
//!
//! Prints the conventional display form of a card number (blocks of four),
//! an IBAN (blocks of four, upper case), or an ISBN (positional hyphens).
//! Formatting does not validate; run `validate` for that.

use anyhow::Result;
use clap::Args;

use idcheck_core::{iban, isbn, luhn, IdcheckError, IdentifierKind};

use crate::config::Settings;
use crate::{print_value, EXIT_VALID};

/// Arguments for the `format` subcommand.
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Identifier kind: card, iban, or isbn.
    pub kind: IdentifierKind,

    /// Value to format.
    pub value: String,
}

/// Display form of `value`, or an error for kinds without a formatter.
pub fn format_value(kind: IdentifierKind, value: &str) -> Result<String, IdcheckError> {
    match kind {
        IdentifierKind::Card => Ok(luhn::format(value)),
        IdentifierKind::Iban => Ok(iban::format(value)),
        IdentifierKind::Isbn => Ok(isbn::format(value)),
        other => Err(IdcheckError::UnsupportedOperation {
            operation: "format",
            kind: other,
        }),
    }
}

/// Execute the format subcommand.
pub fn run_format(args: &FormatArgs, settings: &Settings) -> Result<u8> {
    let formatted = format_value(args.kind, &args.value)?;
    print_value(settings.output, "formatted", &formatted)?;
    Ok(EXIT_VALID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_supported_kinds() {
        assert_eq!(
            format_value(IdentifierKind::Card, "4532015112830366").unwrap(),
            "4532 0151 1283 0366"
        );
        assert_eq!(
            format_value(IdentifierKind::Iban, "gb82west12345698765432").unwrap(),
            "GB82 WEST 1234 5698 7654 32"
        );
        assert_eq!(
            format_value(IdentifierKind::Isbn, "9780306406157").unwrap(),
            "978-0-306-40615-7"
        );
    }

    #[test]
    fn rejects_kind_without_formatter() {
        assert_eq!(
            format_value(IdentifierKind::Vin, "1HGBH41JXMN109186"),
            Err(IdcheckError::UnsupportedOperation {
                operation: "format",
                kind: IdentifierKind::Vin,
            })
        );
        let args = FormatArgs {
            kind: IdentifierKind::Email,
            value: "user@example.com".to_string(),
        };
        let err = run_format(&args, &Settings::default()).unwrap_err();
        assert!(err.to_string().contains("not supported for email"));
    }

    #[test]
    fn run_format_succeeds() {
        let args = FormatArgs {
            kind: IdentifierKind::Card,
            value: "4111111111111111".to_string(),
        };
        assert_eq!(run_format(&args, &Settings::default()).unwrap(), EXIT_VALID);
    }
}
