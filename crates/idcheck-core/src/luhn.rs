//! # Payment Card Numbers: Luhn Mod-10
//!
//! Validation, network classification, masking, and grouping for payment
//! card numbers. All functions first reduce the input to its ASCII digits,
//! so `"4532 0151-1283 0366"` and `"4532015112830366"` are the same card.
//!
//! ## Algorithm
//!
//! Walking right to left, every second digit (starting with the second from
//! the right) is doubled, with 9 subtracted when the result exceeds 9. The
//! number is valid when the sum of all digits is a multiple of 10. Inputs
//! with fewer than [`MIN_DIGITS`] digits are rejected before the sum.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::kind::IdentifierKind;
use crate::normalize;

/// Shortest digit string accepted as a card number.
pub const MIN_DIGITS: usize = 13;

/// Number of trailing digits left visible by [`mask`].
pub const VISIBLE_DIGITS: usize = 4;

/// Default mask character.
pub const DEFAULT_MASK_CHAR: char = '*';

/// Card network, as inferred from the issuer prefix and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Visa,
    MasterCard,
    Amex,
    Discover,
    #[serde(rename = "JCB")]
    Jcb,
    DinersClub,
    Unknown,
}

impl CardType {
    /// Display name of the network.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::MasterCard => "MasterCard",
            Self::Amex => "Amex",
            Self::Discover => "Discover",
            Self::Jcb => "JCB",
            Self::DinersClub => "DinersClub",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix/length patterns in priority order. First match wins.
static CARD_PATTERNS: LazyLock<Vec<(CardType, Regex)>> = LazyLock::new(|| {
    [
        (CardType::Visa, r"^4\d{12}(\d{3})?$"),
        (CardType::MasterCard, r"^5[1-5]\d{14}$"),
        (CardType::Amex, r"^3[47]\d{13}$"),
        (CardType::Discover, r"^6(011|5\d{2})\d{12}$"),
        (CardType::Jcb, r"^(2131|1800|35\d{3})\d{11}$"),
        (CardType::DinersClub, r"^3(0[0-5]|[68]\d)\d{11}$"),
    ]
    .into_iter()
    .map(|(card_type, pattern)| {
        let re = Regex::new(pattern).expect("card network pattern is a valid regex");
        (card_type, re)
    })
    .collect()
});

/// Reduce a card number to its ASCII digits.
pub fn normalize(input: &str) -> String {
    normalize::digits_only(input)
}

/// Whether `input` is a Luhn-valid number of at least [`MIN_DIGITS`] digits.
pub fn is_valid(input: &str) -> bool {
    check(input).is_ok()
}

/// Validate a card number, reporting the rule that rejected it.
pub fn check(input: &str) -> Result<(), ValidationError> {
    let digits = normalize(input);
    check_digits(&digits)
        .inspect_err(|e| tracing::debug!(error = %e, "card number rejected"))
}

fn check_digits(digits: &str) -> Result<(), ValidationError> {
    if digits.is_empty() {
        return Err(ValidationError::Empty {
            kind: IdentifierKind::Card,
        });
    }
    if digits.len() < MIN_DIGITS {
        return Err(ValidationError::InvalidLength {
            kind: IdentifierKind::Card,
            actual: digits.len(),
            expected: "at least 13 digits",
        });
    }
    if luhn_sum(digits.as_bytes()) % 10 != 0 {
        return Err(ValidationError::ChecksumFailed {
            kind: IdentifierKind::Card,
        });
    }
    Ok(())
}

/// Luhn sum over ASCII digit bytes, rightmost digit undoubled.
fn luhn_sum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum()
}

/// The digit that makes `partial` Luhn-valid when appended.
///
/// Returns `None` if `partial` contains no digits.
pub fn check_digit(partial: &str) -> Option<u8> {
    let mut digits = normalize(partial).into_bytes();
    if digits.is_empty() {
        return None;
    }
    // A trailing zero contributes nothing and shifts the doubling parity.
    digits.push(b'0');
    let sum = luhn_sum(&digits);
    Some(((10 - sum % 10) % 10) as u8)
}

/// Classify the card network by prefix and length.
///
/// Classification does not check the Luhn sum.
pub fn card_type(input: &str) -> CardType {
    let digits = normalize(input);
    CARD_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(&digits))
        .map(|(card_type, _)| *card_type)
        .unwrap_or(CardType::Unknown)
}

/// Replace all but the last four digits with `mask_char`.
///
/// Four or fewer digits are masked entirely. Separators are dropped.
pub fn mask(input: &str, mask_char: char) -> String {
    let digits = normalize(input);
    let len = digits.len();
    if len <= VISIBLE_DIGITS {
        return std::iter::repeat(mask_char).take(len).collect();
    }
    let mut out: String = std::iter::repeat(mask_char)
        .take(len - VISIBLE_DIGITS)
        .collect();
    out.push_str(&digits[len - VISIBLE_DIGITS..]);
    out
}

/// [`mask`] with [`DEFAULT_MASK_CHAR`].
pub fn mask_default(input: &str) -> String {
    mask(input, DEFAULT_MASK_CHAR)
}

/// Group the digits in blocks of four separated by single spaces.
pub fn format(input: &str) -> String {
    normalize::group(&normalize(input), 4)
}
