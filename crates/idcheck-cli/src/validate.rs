//! # Validate Subcommand
//!
//! Validates one or more values of a single identifier kind.
//!
//! ```text
//! idcheck validate card 4532015112830366 "4111 1111 1111 1111"
//! idcheck validate postal_code "SW1A 1AA" --country GB
//! ```
//!
//! Exit code is 0 when every value is valid and 1 otherwise. An unsupported
//! postal-code country is a usage error, not an invalid value.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use idcheck_core::IdentifierKind;

use crate::config::{OutputFormat, Settings};
use crate::{print_json, EXIT_INVALID, EXIT_VALID};

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Identifier kind (see `idcheck kinds`).
    pub kind: IdentifierKind,

    /// Values to validate.
    #[arg(required = true)]
    pub values: Vec<String>,

    /// ISO 3166-1 alpha-2 country for postal codes.
    #[arg(long)]
    pub country: Option<String>,
}

/// One line of `validate` output.
#[derive(Debug, Serialize)]
struct Outcome<'a> {
    value: &'a str,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, settings: &Settings) -> Result<u8> {
    let inspector = settings.inspector();
    let mut outcomes = Vec::with_capacity(args.values.len());

    for value in &args.values {
        let report = inspector
            .inspect(args.kind, value, args.country.as_deref())
            .with_context(|| format!("validating {} {value:?}", args.kind))?;
        outcomes.push(Outcome {
            value,
            valid: report.valid,
            reason: report.reason,
        });
    }

    let invalid = outcomes.iter().filter(|o| !o.valid).count();
    tracing::info!(
        kind = %args.kind,
        total = outcomes.len(),
        invalid,
        "validation complete"
    );

    match settings.output {
        OutputFormat::Json => print_json(&outcomes)?,
        OutputFormat::Text => {
            for outcome in &outcomes {
                match &outcome.reason {
                    None => println!("VALID: {}", outcome.value),
                    Some(reason) => println!("INVALID: {} ({reason})", outcome.value),
                }
            }
        }
    }

    Ok(if invalid == 0 { EXIT_VALID } else { EXIT_INVALID })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(kind: IdentifierKind, values: &[&str], country: Option<&str>) -> ValidateArgs {
        ValidateArgs {
            kind,
            values: values.iter().map(|v| v.to_string()).collect(),
            country: country.map(str::to_string),
        }
    }

    #[test]
    fn all_valid_exits_zero() {
        let args = args(
            IdentifierKind::Card,
            &["4532015112830366", "4111 1111 1111 1111"],
            None,
        );
        assert_eq!(run_validate(&args, &Settings::default()).unwrap(), EXIT_VALID);
    }

    #[test]
    fn any_invalid_exits_one() {
        let args = args(
            IdentifierKind::Iban,
            &["DE89370400440532013000", "DE89370400440532013001"],
            None,
        );
        assert_eq!(run_validate(&args, &Settings::default()).unwrap(), EXIT_INVALID);
    }

    #[test]
    fn json_output_exit_code_matches() {
        let settings = Settings {
            output: OutputFormat::Json,
            ..Settings::default()
        };
        let args = args(IdentifierKind::Vin, &["1HGBH41JXMN109187"], None);
        assert_eq!(run_validate(&args, &settings).unwrap(), EXIT_INVALID);
    }

    #[test]
    fn postal_code_uses_country_flag() {
        let gb = args(IdentifierKind::PostalCode, &["SW1A 1AA"], Some("GB"));
        assert_eq!(run_validate(&gb, &Settings::default()).unwrap(), EXIT_VALID);
        let us = args(IdentifierKind::PostalCode, &["SW1A 1AA"], None);
        assert_eq!(run_validate(&us, &Settings::default()).unwrap(), EXIT_INVALID);
    }

    #[test]
    fn unsupported_country_is_error() {
        let args = args(IdentifierKind::PostalCode, &["12345"], Some("ZZ"));
        let err = run_validate(&args, &Settings::default()).unwrap_err();
        assert!(format!("{err:#}").contains("unsupported postal code country"));
    }
}
