//! # Mask Subcommand
//!
//! Masks a card number for display, keeping only the last four digits.

use anyhow::{bail, Result};
use clap::Args;

use idcheck_core::luhn;

use crate::config::Settings;
use crate::{print_value, EXIT_VALID};

/// Arguments for the `mask` subcommand.
#[derive(Args, Debug)]
pub struct MaskArgs {
    /// Card number; spaces and hyphens are ignored.
    pub value: String,

    /// Mask character. Overrides `mask_char` from the config file.
    #[arg(long)]
    pub mask_char: Option<char>,
}

/// Execute the mask subcommand.
pub fn run_mask(args: &MaskArgs, settings: &Settings) -> Result<u8> {
    let mask_char = args.mask_char.unwrap_or(settings.mask_char);
    if mask_char.is_ascii_digit() {
        bail!("mask character must not be a digit, got {mask_char:?}");
    }
    if luhn::normalize(&args.value).is_empty() {
        tracing::warn!("no digits in input; nothing to mask");
    }
    print_value(settings.output, "masked", &luhn::mask(&args.value, mask_char))?;
    Ok(EXIT_VALID)
}
