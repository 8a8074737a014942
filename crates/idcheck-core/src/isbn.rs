//! # ISBN-10 and ISBN-13
//!
//! Check-digit validation, ISBN-10 ↔ ISBN-13 conversion, and positional
//! hyphenation. Input is normalized by removing hyphens and whitespace and
//! upper-casing (so a trailing `x` is read as `X`).
//!
//! - **ISBN-10**: nine digits and a check character (`0`–`9` or `X` = 10).
//!   `Σ digit[i] × (10 − i)` over all ten positions must be divisible by 11.
//! - **ISBN-13**: thirteen digits. With weights alternating 1, 3 over the
//!   first twelve, the check digit is `(10 − sum mod 10) mod 10`.
//!
//! Hyphenation is purely positional (1-3-5-1 and 3-1-3-5-1); no registration
//! group or publisher ranges are consulted.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::kind::IdentifierKind;
use crate::normalize;

/// Prefix prepended when converting ISBN-10 to ISBN-13.
pub const BOOKLAND_PREFIX: &str = "978";

const ISBN10_SEGMENTS: [usize; 4] = [1, 3, 5, 1];
const ISBN13_SEGMENTS: [usize; 5] = [3, 1, 3, 5, 1];

/// Which ISBN form a valid input is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IsbnVariant {
    Isbn10,
    Isbn13,
}

impl IsbnVariant {
    /// Number of characters in this form.
    pub fn length(&self) -> usize {
        match self {
            Self::Isbn10 => 10,
            Self::Isbn13 => 13,
        }
    }

    /// Display name, e.g. `"ISBN-10"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Isbn10 => "ISBN-10",
            Self::Isbn13 => "ISBN-13",
        }
    }
}

impl std::fmt::Display for IsbnVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip hyphens and whitespace, upper-case.
pub fn normalize(input: &str) -> String {
    normalize::compact_upper_unhyphenated(input)
}

/// Whether `input` is a valid ISBN-10 or ISBN-13.
pub fn is_valid(input: &str) -> bool {
    check(input).is_ok()
}

/// Validate either form, returning which one matched.
pub fn check(input: &str) -> Result<IsbnVariant, ValidationError> {
    let chars: Vec<char> = normalize(input).chars().collect();
    let result = match chars.len() {
        0 => Err(ValidationError::Empty {
            kind: IdentifierKind::Isbn,
        }),
        10 => check_isbn10(&chars).map(|()| IsbnVariant::Isbn10),
        13 => check_isbn13(&chars).map(|()| IsbnVariant::Isbn13),
        actual => Err(ValidationError::InvalidLength {
            kind: IdentifierKind::Isbn,
            actual,
            expected: "10 or 13 characters",
        }),
    };
    result.inspect_err(|e| tracing::debug!(error = %e, "ISBN rejected"))
}

/// The variant of a valid ISBN, or `None` if invalid.
pub fn variant(input: &str) -> Option<IsbnVariant> {
    check(input).ok()
}

/// Whether `input` normalizes to a valid ISBN-10.
pub fn is_valid_isbn10(input: &str) -> bool {
    let chars: Vec<char> = normalize(input).chars().collect();
    chars.len() == 10 && check_isbn10(&chars).is_ok()
}

/// Whether `input` normalizes to a valid ISBN-13.
pub fn is_valid_isbn13(input: &str) -> bool {
    let chars: Vec<char> = normalize(input).chars().collect();
    chars.len() == 13 && check_isbn13(&chars).is_ok()
}

fn digit_at(chars: &[char], position: usize) -> Result<u32, ValidationError> {
    chars[position]
        .to_digit(10)
        .ok_or(ValidationError::InvalidCharacter {
            kind: IdentifierKind::Isbn,
            position,
            found: chars[position],
        })
}

/// Expects exactly ten characters.
fn check_isbn10(chars: &[char]) -> Result<(), ValidationError> {
    let mut sum = 0u32;
    for i in 0..9 {
        sum += digit_at(chars, i)? * (10 - i as u32);
    }
    let found = chars[9];
    let check_value = match found {
        'X' => 10,
        c => c.to_digit(10).ok_or(ValidationError::InvalidCharacter {
            kind: IdentifierKind::Isbn,
            position: 9,
            found: c,
        })?,
    };
    if (sum + check_value) % 11 != 0 {
        return Err(ValidationError::CheckDigitMismatch {
            kind: IdentifierKind::Isbn,
            expected: isbn10_char(sum),
            found,
        });
    }
    Ok(())
}

/// Expects exactly thirteen characters.
fn check_isbn13(chars: &[char]) -> Result<(), ValidationError> {
    let mut digits = [0u32; 13];
    for (i, d) in digits.iter_mut().enumerate() {
        *d = digit_at(chars, i)?;
    }
    let expected = isbn13_digit(&digits[..12]);
    if expected != digits[12] {
        return Err(ValidationError::CheckDigitMismatch {
            kind: IdentifierKind::Isbn,
            expected: digit_char(expected),
            found: chars[12],
        });
    }
    Ok(())
}

/// Check character completing a weighted ISBN-10 body sum.
fn isbn10_char(weighted_sum: u32) -> char {
    match (11 - weighted_sum % 11) % 11 {
        10 => 'X',
        d => digit_char(d),
    }
}

fn isbn13_digit(first12: &[u32]) -> u32 {
    let sum: u32 = first12
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    (10 - sum % 10) % 10
}

fn digit_char(d: u32) -> char {
    char::from_digit(d, 10).unwrap_or('0')
}

/// Parse exactly `n` ASCII digits.
fn parse_digits(s: &str, n: usize) -> Option<Vec<u32>> {
    let digits: Vec<u32> = s.chars().map(|c| c.to_digit(10)).collect::<Option<_>>()?;
    (digits.len() == n).then_some(digits)
}

/// ISBN-10 check character (`0`–`9` or `X`) for nine body digits.
pub fn isbn10_check_char(first9: &str) -> Option<char> {
    let digits = parse_digits(&normalize(first9), 9)?;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (10 - i as u32))
        .sum();
    Some(isbn10_char(sum))
}

/// ISBN-13 check digit for twelve body digits.
pub fn isbn13_check_digit(first12: &str) -> Option<u8> {
    let digits = parse_digits(&normalize(first12), 12)?;
    Some(isbn13_digit(&digits) as u8)
}

/// Convert a valid ISBN-10 to ISBN-13 (`978` prefix, recomputed check digit).
///
/// Returns `None` if `input` is not a valid ISBN-10.
pub fn convert_isbn10_to_isbn13(input: &str) -> Option<String> {
    if !is_valid_isbn10(input) {
        return None;
    }
    let isbn = normalize(input);
    let body = format!("{BOOKLAND_PREFIX}{}", &isbn[..9]);
    let check = isbn13_check_digit(&body)?;
    Some(format!("{body}{check}"))
}

/// Convert a valid `978`-prefixed ISBN-13 back to ISBN-10.
///
/// Returns `None` for invalid input and for `979` ISBNs, which have no
/// ISBN-10 form.
pub fn convert_isbn13_to_isbn10(input: &str) -> Option<String> {
    if !is_valid_isbn13(input) {
        return None;
    }
    let isbn = normalize(input);
    let body = isbn.strip_prefix(BOOKLAND_PREFIX)?.get(..9)?;
    let check = isbn10_check_char(body)?;
    Some(format!("{body}{check}"))
}

/// Hyphenate positionally: 1-3-5-1 for ten characters, 3-1-3-5-1 for
/// thirteen. Any other length is returned normalized without hyphens.
///
/// The check digit is not verified.
pub fn format(input: &str) -> String {
    let isbn = normalize(input);
    match isbn.chars().count() {
        10 => normalize::hyphenate(&isbn, &ISBN10_SEGMENTS),
        13 => normalize::hyphenate(&isbn, &ISBN13_SEGMENTS),
        _ => isbn,
    }
}
