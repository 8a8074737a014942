//! # idcheck CLI entry point
//!
//! Parses command-line arguments, loads settings, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use idcheck_cli::config::{load_settings, OutputFormat, Settings};
use idcheck_cli::convert::{run_convert, ConvertArgs};
use idcheck_cli::format::{run_format, FormatArgs};
use idcheck_cli::inspect::{run_inspect, run_kinds, InspectArgs};
use idcheck_cli::mask::{run_mask, MaskArgs};
use idcheck_cli::validate::{run_validate, ValidateArgs};

/// Identifier validation toolkit.
///
/// Validates payment card numbers, IBANs, ISBNs, and VINs by check digit,
/// and phone numbers, postal codes, emails, domains, IP/MAC addresses, and
/// URIs by format.
#[derive(Parser, Debug)]
#[command(name = "idcheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./idcheck.yaml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format. Overrides `output` from the config file.
    #[arg(long, value_enum, global = true)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate one or more values of an identifier kind.
    Validate(ValidateArgs),

    /// Show the full validation report for one value.
    Inspect(InspectArgs),

    /// Print the display form of a card number, IBAN, or ISBN.
    Format(FormatArgs),

    /// Mask a card number, keeping the last four digits.
    Mask(MaskArgs),

    /// Convert between ISBN-10 and ISBN-13.
    Convert(ConvertArgs),

    /// List supported identifier kinds.
    Kinds,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v when set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("idcheck v{} starting", env!("CARGO_PKG_VERSION"));

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let settings = resolve_settings(cli)?;
    match &cli.command {
        Commands::Validate(args) => run_validate(args, &settings),
        Commands::Inspect(args) => run_inspect(args, &settings),
        Commands::Format(args) => run_format(args, &settings),
        Commands::Mask(args) => run_mask(args, &settings),
        Commands::Convert(args) => run_convert(args, &settings),
        Commands::Kinds => run_kinds(&settings),
    }
}

/// Config file values with global command-line overrides applied.
fn resolve_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(output) = cli.output {
        settings.output = output;
    }
    Ok(settings)
}
