//! # Inspect Subcommand
//!
//! Prints everything known about one value: normalized form, validity,
//! the rejection reason, and derived fields (card network, IBAN country,
//! ISBN-10/13 forms, VIN fields and model year). Also hosts `kinds`, which
//! lists the identifier kinds every other subcommand accepts.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use idcheck_core::{IdentifierKind, Report};

use crate::config::{OutputFormat, Settings};
use crate::{print_json, EXIT_INVALID, EXIT_VALID};

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Identifier kind (see `idcheck kinds`).
    pub kind: IdentifierKind,

    /// Value to inspect.
    pub value: String,

    /// ISO 3166-1 alpha-2 country for postal codes.
    #[arg(long)]
    pub country: Option<String>,
}

/// Execute the inspect subcommand.
///
/// Exits 0 when the value is valid and 1 otherwise; the report is printed
/// either way.
pub fn run_inspect(args: &InspectArgs, settings: &Settings) -> Result<u8> {
    let report = settings
        .inspector()
        .inspect(args.kind, &args.value, args.country.as_deref())
        .with_context(|| format!("inspecting {} {:?}", args.kind, args.value))?;

    match settings.output {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print!("{}", render_report(&report)),
    }

    Ok(if report.valid { EXIT_VALID } else { EXIT_INVALID })
}

/// Text rendering of a report, one `key: value` per line.
fn render_report(report: &Report) -> String {
    let mut rows: Vec<(&str, String)> = vec![
        ("kind", report.kind.to_string()),
        ("input", report.input.clone()),
        ("normalized", report.normalized.clone()),
        ("valid", report.valid.to_string()),
    ];
    if let Some(reason) = &report.reason {
        rows.push(("reason", reason.clone()));
    }
    rows.extend(report.fields.iter().map(|(k, v)| (*k, v.clone())));

    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0) + 1;
    rows.iter()
        .map(|(key, value)| format!("{:<width$} {value}\n", format!("{key}:")))
        .collect()
}

#[derive(Debug, Serialize)]
struct KindEntry {
    kind: IdentifierKind,
    label: &'static str,
    check_digit: bool,
}

/// Execute the kinds subcommand.
pub fn run_kinds(settings: &Settings) -> Result<u8> {
    let entries: Vec<KindEntry> = IdentifierKind::all_kinds()
        .iter()
        .map(|kind| KindEntry {
            kind: *kind,
            label: kind.label(),
            check_digit: kind.has_check_digit(),
        })
        .collect();

    match settings.output {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Text => {
            println!("Supported identifier kinds:");
            println!();
            for entry in &entries {
                let marker = if entry.check_digit { " (check digit)" } else { "" };
                println!("  {:<12} {}{marker}", entry.kind.as_str(), entry.label);
            }
        }
    }
    Ok(EXIT_VALID)
}
