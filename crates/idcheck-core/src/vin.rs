//! # Vehicle Identification Numbers
//!
//! Validation, field extraction, and model-year decoding for 17-character
//! VINs (ISO 3779, with the North American check digit at position 9).
//!
//! ## Layout
//!
//! ```text
//!  1HG BH41J X MN109186
//!  └┬┘ └─┬─┘ │ └──┬───┘
//!  WMI  VDS  │   VIS: [9] model year, [10] plant, [11..17] serial
//!            └ check digit, index 8
//! ```
//!
//! ## Check digit
//!
//! Each character is transliterated (digits as themselves, letters through
//! the fixed table in [`transliterate`]) and multiplied by the positional
//! weight from [`WEIGHTS`]. The sum modulo 11 is the check digit, with 10
//! written as `X`. The check position itself carries weight 0.
//!
//! `I`, `O`, and `Q` never appear in a VIN and are rejected outright.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::kind::IdentifierKind;
use crate::normalize;

/// Number of characters in a VIN.
pub const VIN_LENGTH: usize = 17;

/// Zero-based index of the check digit.
pub const CHECK_DIGIT_INDEX: usize = 8;

/// Positional weights for the check-digit sum.
pub const WEIGHTS: [u32; VIN_LENGTH] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

/// Letters excluded from VINs.
pub const FORBIDDEN: [char; 3] = ['I', 'O', 'Q'];

/// Length of the model-year cycle.
const YEAR_CYCLE: i64 = 30;

/// Fields extracted from a valid VIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VinFields {
    /// World Manufacturer Identifier (characters 1–3).
    pub wmi: String,
    /// Model-year code (character 10).
    pub model_year_code: char,
    /// Assembly plant code (character 11).
    pub plant_code: char,
}

/// Full breakdown of a valid VIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VinInfo {
    /// The normalized VIN.
    pub vin: String,
    /// World Manufacturer Identifier (characters 1–3).
    pub wmi: String,
    /// Vehicle Descriptor Section (characters 4–8).
    pub vds: String,
    /// Check digit (character 9).
    pub check_digit: char,
    /// Vehicle Identifier Section (characters 10–17).
    pub vis: String,
    /// Model-year code (character 10).
    pub model_year_code: char,
    /// Decoded model year relative to the reference year.
    pub model_year: Option<i32>,
    /// Assembly plant code (character 11).
    pub plant_code: char,
    /// Production sequence number (characters 12–17).
    pub serial: String,
}

/// Strip whitespace and upper-case.
pub fn normalize(input: &str) -> String {
    normalize::compact_upper(input)
}

/// Transliterated value of a VIN character.
///
/// Digits map to themselves; letters follow the standard table. Anything
/// else (including the forbidden `I`, `O`, `Q`) maps to 0.
pub fn transliterate(c: char) -> u32 {
    match c {
        '0'..='9' => c as u32 - '0' as u32,
        'A' | 'J' => 1,
        'B' | 'K' | 'S' => 2,
        'C' | 'L' | 'T' => 3,
        'D' | 'M' | 'U' => 4,
        'E' | 'N' | 'V' => 5,
        'F' | 'W' => 6,
        'G' | 'P' | 'X' => 7,
        'H' | 'Y' => 8,
        'R' | 'Z' => 9,
        _ => 0,
    }
}

/// Whether `input` is a valid VIN.
pub fn is_valid(input: &str) -> bool {
    check(input).is_ok()
}

/// Validate a VIN, reporting the rule that rejected it.
pub fn check(input: &str) -> Result<(), ValidationError> {
    let vin = normalize(input);
    check_normalized(&vin).inspect_err(|e| tracing::debug!(error = %e, "VIN rejected"))
}

fn check_normalized(vin: &str) -> Result<(), ValidationError> {
    check_structure(vin)?;
    let expected = computed_check_digit(vin);
    let found = char::from(vin.as_bytes()[CHECK_DIGIT_INDEX]);
    if expected != found {
        return Err(ValidationError::CheckDigitMismatch {
            kind: IdentifierKind::Vin,
            expected,
            found,
        });
    }
    Ok(())
}

/// Length, character set, and forbidden letters; not the check digit.
fn check_structure(vin: &str) -> Result<(), ValidationError> {
    if vin.is_empty() {
        return Err(ValidationError::Empty {
            kind: IdentifierKind::Vin,
        });
    }
    let len = vin.chars().count();
    if len != VIN_LENGTH {
        return Err(ValidationError::InvalidLength {
            kind: IdentifierKind::Vin,
            actual: len,
            expected: "17 characters",
        });
    }
    for (position, c) in vin.chars().enumerate() {
        if !c.is_ascii_alphanumeric() {
            return Err(ValidationError::InvalidCharacter {
                kind: IdentifierKind::Vin,
                position,
                found: c,
            });
        }
        if FORBIDDEN.contains(&c) {
            return Err(ValidationError::ForbiddenCharacter {
                kind: IdentifierKind::Vin,
                position,
                found: c,
            });
        }
    }
    Ok(())
}

/// Expects a structurally valid VIN.
fn computed_check_digit(vin: &str) -> char {
    let sum: u32 = vin
        .chars()
        .zip(WEIGHTS)
        .map(|(c, weight)| transliterate(c) * weight)
        .sum();
    match sum % 11 {
        10 => 'X',
        d => char::from_digit(d, 10).unwrap_or('0'),
    }
}

/// The check digit a structurally valid VIN should carry.
///
/// Returns `None` if `input` is not 17 alphanumerics free of `I`, `O`, `Q`;
/// the check digit present in the input is ignored.
pub fn check_digit(input: &str) -> Option<char> {
    let vin = normalize(input);
    check_structure(&vin).ok()?;
    Some(computed_check_digit(&vin))
}

/// Normalized VIN if valid.
fn valid_vin(input: &str) -> Option<String> {
    let vin = normalize(input);
    check_normalized(&vin).ok()?;
    Some(vin)
}

/// Extract WMI, model-year code, and plant code from a valid VIN.
pub fn try_parse(input: &str) -> Option<VinFields> {
    let vin = valid_vin(input)?;
    let bytes = vin.as_bytes();
    Some(VinFields {
        wmi: vin[..3].to_string(),
        model_year_code: char::from(bytes[9]),
        plant_code: char::from(bytes[10]),
    })
}

/// World Manufacturer Identifier of a valid VIN.
pub fn world_manufacturer_id(input: &str) -> Option<String> {
    try_parse(input).map(|fields| fields.wmi)
}

/// Model-year code of a valid VIN.
pub fn model_year_code(input: &str) -> Option<char> {
    try_parse(input).map(|fields| fields.model_year_code)
}

/// Plant code of a valid VIN.
pub fn plant_code(input: &str) -> Option<char> {
    try_parse(input).map(|fields| fields.plant_code)
}

/// Full breakdown of a valid VIN; the model year is decoded against
/// `reference_year` (current year when `None`).
pub fn decode(input: &str, reference_year: Option<i32>) -> Option<VinInfo> {
    let vin = valid_vin(input)?;
    let bytes = vin.as_bytes();
    let model_year_code = char::from(bytes[9]);
    Some(VinInfo {
        wmi: vin[..3].to_string(),
        vds: vin[3..8].to_string(),
        check_digit: char::from(bytes[CHECK_DIGIT_INDEX]),
        vis: vin[9..].to_string(),
        model_year_code,
        model_year: model_year(model_year_code, reference_year),
        plant_code: char::from(bytes[10]),
        serial: vin[11..].to_string(),
        vin,
    })
}

/// First year of the cycle a code belongs to (1980–2009).
fn base_year(code: char) -> Option<i32> {
    let offset = |from: char| code as i32 - from as i32;
    match code {
        'A'..='H' => Some(1980 + offset('A')),
        'J' => Some(1988),
        'K'..='N' => Some(1989 + offset('K')),
        'P' => Some(1993),
        'R'..='T' => Some(1994 + offset('R')),
        'V'..='Y' => Some(1997 + offset('V')),
        '1'..='9' => Some(2001 + offset('1')),
        _ => None,
    }
}

/// Decode a model-year code into a calendar year.
///
/// Codes repeat every 30 years. The result is the latest year carrying
/// `code` that is no more than one year after `reference_year` (the current
/// UTC year when `None`). Invalid codes yield `None`; lower-case codes are
/// accepted.
pub fn model_year(code: char, reference_year: Option<i32>) -> Option<i32> {
    let base = i64::from(base_year(code.to_ascii_uppercase())?);
    let reference = i64::from(reference_year.unwrap_or_else(|| Utc::now().year()));
    let ceiling = reference + 1;
    let cycles = (ceiling - base).div_euclid(YEAR_CYCLE);
    i32::try_from(base + cycles * YEAR_CYCLE).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_valid() {
        for vin in [
            "1HGBH41JXMN109186",
            "11111111111111111",
            "1M8GDM9AXKP042788",
            "JH4KA7561PC008269",
        ] {
            assert!(is_valid(vin), "{vin} should be valid");
        }
    }

    #[test]
    fn test_known_invalid_check_digit() {
        assert!(!is_valid("1HGBH41JXMN109187"));
        assert_eq!(
            check("1HGBH41JXMN109187"),
            Err(ValidationError::CheckDigitMismatch {
                kind: IdentifierKind::Vin,
                expected: '1',
                found: 'X'
            })
        );
    }

    #[test]
    fn test_normalization() {
        assert!(is_valid("1hgbh41jxmn109186"));
        assert!(is_valid(" 1HGBH41JX MN109186 "));
    }

    #[test]
    fn test_length() {
        assert!(matches!(
            check("1HGBH41JXMN10918"),
            Err(ValidationError::InvalidLength { actual: 16, .. })
        ));
        assert!(matches!(check(""), Err(ValidationError::Empty { .. })));
    }

    #[test]
    fn test_forbidden_letters() {
        assert_eq!(
            check("1HGBH41JXMN1O9186"),
            Err(ValidationError::ForbiddenCharacter {
                kind: IdentifierKind::Vin,
                position: 12,
                found: 'O'
            })
        );
        assert!(!is_valid("IHGBH41JXMN109186"));
        assert!(!is_valid("1HGBH41JXMN10918Q"));
    }

    #[test]
    fn test_non_alphanumeric() {
        assert!(matches!(
            check("1HGBH41JXMN10918-"),
            Err(ValidationError::InvalidCharacter { position: 16, .. })
        ));
    }

    #[test]
    fn test_check_digit() {
        assert_eq!(check_digit("1HGBH41J0MN109186"), Some('X'));
        assert_eq!(check_digit("5YJ3E1EA7KF317000"), Some('2'));
        assert_eq!(check_digit("1HGBH41JXMN1O9186"), None);
    }

    #[test]
    fn test_transliteration_table() {
        assert_eq!(transliterate('7'), 7);
        assert_eq!(transliterate('A'), 1);
        assert_eq!(transliterate('S'), 2);
        assert_eq!(transliterate('Z'), 9);
        assert_eq!(transliterate('P'), 7);
        assert_eq!(transliterate('I'), 0);
    }

    #[test]
    fn test_field_extraction() {
        let fields = try_parse("1HGBH41JXMN109186").unwrap();
        assert_eq!(fields.wmi, "1HG");
        assert_eq!(fields.model_year_code, 'M');
        assert_eq!(fields.plant_code, 'N');
        assert_eq!(world_manufacturer_id("1hgbh41jxmn109186").as_deref(), Some("1HG"));
        assert_eq!(model_year_code("1HGBH41JXMN109186"), Some('M'));
        assert_eq!(plant_code("1HGBH41JXMN109186"), Some('N'));
        assert_eq!(try_parse("1HGBH41JXMN109187"), None);
        assert_eq!(world_manufacturer_id("1HG"), None);
    }

    #[test]
    fn test_decode() {
        let info = decode("1M8GDM9AXKP042788", Some(2026)).unwrap();
        assert_eq!(info.vin, "1M8GDM9AXKP042788");
        assert_eq!(info.wmi, "1M8");
        assert_eq!(info.vds, "GDM9A");
        assert_eq!(info.check_digit, 'X');
        assert_eq!(info.vis, "KP042788");
        assert_eq!(info.model_year_code, 'K');
        assert_eq!(info.model_year, Some(2019));
        assert_eq!(info.plant_code, 'P');
        assert_eq!(info.serial, "042788");
    }

    #[test]
    fn test_model_year_base_table() {
        assert_eq!(model_year('A', Some(1990)), Some(1980));
        assert_eq!(model_year('H', Some(1990)), Some(1987));
        assert_eq!(model_year('J', Some(1990)), Some(1988));
        assert_eq!(model_year('N', Some(1995)), Some(1992));
        assert_eq!(model_year('P', Some(1995)), Some(1993));
        assert_eq!(model_year('T', Some(1999)), Some(1996));
        assert_eq!(model_year('Y', Some(2005)), Some(2000));
        assert_eq!(model_year('1', Some(2005)), Some(2001));
        assert_eq!(model_year('9', Some(2010)), Some(2009));
    }

    #[test]
    fn test_model_year_cycles_forward() {
        assert_eq!(model_year('M', Some(2026)), Some(2021));
        assert_eq!(model_year('A', Some(2026)), Some(2010));
        assert_eq!(model_year('S', Some(2026)), Some(2025));
        assert_eq!(model_year('T', Some(2026)), Some(2026));
    }

    #[test]
    fn test_model_year_one_year_ahead() {
        // 'V' is 2027 in the current cycle: one year ahead of 2026 is allowed.
        assert_eq!(model_year('V', Some(2026)), Some(2027));
        // 'W' would be 2028, two years ahead, so the previous cycle applies.
        assert_eq!(model_year('W', Some(2026)), Some(1998));
    }

    #[test]
    fn test_model_year_cycles_backward() {
        assert_eq!(model_year('Y', Some(1985)), Some(1970));
        assert_eq!(model_year('A', Some(1979)), Some(1980));
        assert_eq!(model_year('B', Some(1979)), Some(1951));
    }

    #[test]
    fn test_model_year_invalid_codes() {
        for code in ['I', 'O', 'Q', 'U', 'Z', '0', '-', 'é'] {
            assert_eq!(model_year(code, Some(2026)), None, "code {code:?}");
        }
    }

    #[test]
    fn test_model_year_lowercase_and_default_reference() {
        assert_eq!(model_year('m', Some(2026)), Some(2021));
        let current = Utc::now().year();
        let year = model_year('A', None).unwrap();
        assert!(year <= current + 1 && year > current + 1 - 30);
    }

    fn vin_with_forbidden() -> impl Strategy<Value = String> {
        (
            "[A-HJ-NPR-Z0-9]{16}",
            prop::sample::select(FORBIDDEN.to_vec()),
            0usize..VIN_LENGTH,
        )
            .prop_map(|(rest, bad, pos)| {
                let mut chars: Vec<char> = rest.chars().collect();
                chars.insert(pos, bad);
                chars.into_iter().collect()
            })
    }

    proptest! {
        #[test]
        fn forbidden_letters_always_rejected(vin in vin_with_forbidden()) {
            prop_assert_eq!(vin.len(), VIN_LENGTH);
            prop_assert!(!is_valid(&vin));
        }

        #[test]
        fn computed_check_digit_validates(
            body in "[A-HJ-NPR-Z0-9]{16}",
        ) {
            let mut vin: Vec<char> = body.chars().collect();
            vin.insert(CHECK_DIGIT_INDEX, '0');
            let vin: String = vin.into_iter().collect();
            let cd = check_digit(&vin).unwrap();
            let fixed: String = vin
                .chars()
                .enumerate()
                .map(|(i, c)| if i == CHECK_DIGIT_INDEX { cd } else { c })
                .collect();
            prop_assert!(is_valid(&fixed));
        }

        #[test]
        fn model_year_within_window(code in "[A-HJ-NPR-TV-Y1-9]", reference in 1900i32..2200) {
            let c = code.chars().next().unwrap();
            let year = model_year(c, Some(reference)).unwrap();
            prop_assert!(year <= reference + 1);
            prop_assert!(year > reference + 1 - 30);
        }
    }
}
