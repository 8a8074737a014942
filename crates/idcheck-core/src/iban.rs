//! # IBAN: ISO 13616 / ISO 7064 Mod-97
//!
//! Structural validation and the mod-97 check for International Bank Account
//! Numbers, plus formatting and country-code extraction.
//!
//! ## Validation
//!
//! After stripping whitespace and upper-casing:
//!
//! - Length must be 15–34 characters.
//! - Positions 0–1 are letters (country), 2–3 digits (check digits), the
//!   rest alphanumeric (BBAN).
//! - Moving the first four characters to the end and replacing every letter
//!   with its base-36 value (A=10 … Z=35) yields a decimal number whose
//!   remainder modulo 97 must be 1.
//!
//! The remainder is accumulated one decimal digit at a time, so inputs of any
//! length are handled without big integers.

use crate::error::ValidationError;
use crate::kind::IdentifierKind;
use crate::normalize;

/// Shortest IBAN length accepted.
pub const MIN_LENGTH: usize = 15;

/// Longest IBAN length accepted.
pub const MAX_LENGTH: usize = 34;

/// Strip whitespace and upper-case.
pub fn normalize(input: &str) -> String {
    normalize::compact_upper(input)
}

/// Whether `input` is a structurally valid IBAN with a correct mod-97 check.
pub fn is_valid(input: &str) -> bool {
    check(input).is_ok()
}

/// Validate an IBAN, reporting the rule that rejected it.
pub fn check(input: &str) -> Result<(), ValidationError> {
    let iban = normalize(input);
    check_normalized(&iban).inspect_err(|e| tracing::debug!(error = %e, "IBAN rejected"))
}

fn check_normalized(iban: &str) -> Result<(), ValidationError> {
    if iban.is_empty() {
        return Err(ValidationError::Empty {
            kind: IdentifierKind::Iban,
        });
    }

    let len = iban.chars().count();
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&len) {
        return Err(ValidationError::InvalidLength {
            kind: IdentifierKind::Iban,
            actual: len,
            expected: "15 to 34 characters",
        });
    }

    for (position, c) in iban.chars().enumerate() {
        let allowed = match position {
            0 | 1 => c.is_ascii_uppercase(),
            2 | 3 => c.is_ascii_digit(),
            _ => c.is_ascii_alphanumeric(),
        };
        if !allowed {
            return Err(ValidationError::InvalidCharacter {
                kind: IdentifierKind::Iban,
                position,
                found: c,
            });
        }
    }

    // All ASCII from here on, so byte slicing is on char boundaries.
    let (head, rest) = iban.split_at(4);
    let rearranged = format!("{rest}{head}");
    if mod97(&rearranged) != 1 {
        return Err(ValidationError::ChecksumFailed {
            kind: IdentifierKind::Iban,
        });
    }
    Ok(())
}

/// Remainder modulo 97 of the base-36-transliterated decimal string.
///
/// Letters expand to two decimal digits (A → "10"); each decimal digit is
/// folded in as `r = (r * 10 + d) % 97`. Characters that are not ASCII
/// alphanumeric are skipped.
pub fn mod97(alphanumeric: &str) -> u32 {
    alphanumeric.chars().fold(0u32, |r, c| match c.to_digit(36) {
        Some(v) if v < 10 => (r * 10 + v) % 97,
        Some(v) => {
            let r = (r * 10 + v / 10) % 97;
            (r * 10 + v % 10) % 97
        }
        None => r,
    })
}

/// Compute the two check digits for a country code and BBAN.
///
/// Returns `None` unless `country` is two ASCII letters and `bban` is
/// non-empty ASCII alphanumeric (whitespace ignored, case-insensitive).
pub fn check_digits(country: &str, bban: &str) -> Option<String> {
    let country = normalize(country);
    let bban = normalize(bban);
    if country.len() != 2 || !country.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }
    if bban.is_empty() || !bban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    let remainder = mod97(&format!("{bban}{country}00"));
    Some(format!("{:02}", 98 - remainder))
}

/// The first two normalized characters, or an empty string if there are
/// fewer than two.
pub fn country_code(input: &str) -> String {
    let iban = normalize(input);
    let code: String = iban.chars().take(2).collect();
    if code.chars().count() < 2 {
        return String::new();
    }
    code
}

/// Group the normalized IBAN in blocks of four separated by single spaces.
pub fn format(input: &str) -> String {
    normalize::group(&normalize(input), 4)
}
