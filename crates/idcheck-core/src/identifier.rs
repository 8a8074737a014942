//! # Validated Identifier Newtypes
//!
//! `CardNumber`, `Iban`, `Isbn`, and `Vin` can only be constructed from
//! input that passes the corresponding check, so holding one is proof of
//! validity. Each stores the normalized form.
//!
//! Deserialization routes through the same constructors, so an invalid
//! value in a JSON or YAML document is rejected at parse time rather than
//! accepted and checked later.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::isbn::IsbnVariant;
use crate::luhn::CardType;
use crate::vin::VinFields;
use crate::{iban, isbn, luhn, vin};

/// Implement `Deserialize` for a string newtype by deserializing a plain
/// `String` and passing it through the type's `new()` constructor.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Implement `FromStr` by delegating to the validating constructor.
macro_rules! impl_validating_from_str {
    ($ty:ident) => {
        impl std::str::FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Payment card number
// ---------------------------------------------------------------------------

/// A Luhn-valid payment card number, stored as digits only.
///
/// `Display` and `Debug` show the masked form so that card numbers do not
/// leak into logs by accident; use [`CardNumber::as_str`] for the full digits.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CardNumber(String);

impl_validating_deserialize!(CardNumber);
impl_validating_from_str!(CardNumber);

impl CardNumber {
    /// Create a card number, validating length and Luhn sum.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] from [`luhn::check`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref();
        luhn::check(value)?;
        Ok(Self(luhn::normalize(value)))
    }

    /// The digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Card network.
    pub fn card_type(&self) -> CardType {
        luhn::card_type(&self.0)
    }

    /// All but the last four digits replaced by `mask_char`.
    pub fn masked(&self, mask_char: char) -> String {
        luhn::mask(&self.0, mask_char)
    }

    /// Digits in groups of four.
    pub fn formatted(&self) -> String {
        luhn::format(&self.0)
    }
}

impl std::fmt::Display for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&luhn::mask_default(&self.0))
    }
}

impl std::fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CardNumber")
            .field(&luhn::mask_default(&self.0))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// IBAN
// ---------------------------------------------------------------------------

/// A valid IBAN in electronic (compact, upper-case) form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Iban(String);

impl_validating_deserialize!(Iban);
impl_validating_from_str!(Iban);

impl Iban {
    /// Create an IBAN, validating structure and the mod-97 check.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] from [`iban::check`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref();
        iban::check(value)?;
        Ok(Self(iban::normalize(value)))
    }

    /// Compact form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// ISO 3166-1 alpha-2 country code.
    pub fn country_code(&self) -> &str {
        &self.0[..2]
    }

    /// The two check digits.
    pub fn check_digits(&self) -> &str {
        &self.0[2..4]
    }

    /// Basic Bank Account Number (everything after the check digits).
    pub fn bban(&self) -> &str {
        &self.0[4..]
    }

    /// Print form: blocks of four separated by spaces.
    pub fn formatted(&self) -> String {
        iban::format(&self.0)
    }
}

impl std::fmt::Display for Iban {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

// ---------------------------------------------------------------------------
// ISBN
// ---------------------------------------------------------------------------

/// A valid ISBN-10 or ISBN-13, stored without hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Isbn(String);

impl_validating_deserialize!(Isbn);
impl_validating_from_str!(Isbn);

impl Isbn {
    /// Create an ISBN, validating the check digit of either form.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] from [`isbn::check`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref();
        isbn::check(value)?;
        Ok(Self(isbn::normalize(value)))
    }

    /// Unhyphenated form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Which form this is.
    pub fn variant(&self) -> IsbnVariant {
        if self.0.len() == IsbnVariant::Isbn10.length() {
            IsbnVariant::Isbn10
        } else {
            IsbnVariant::Isbn13
        }
    }

    /// This ISBN as ISBN-13, converting from ISBN-10 if needed.
    pub fn to_isbn13(&self) -> Isbn {
        match isbn::convert_isbn10_to_isbn13(&self.0) {
            Some(converted) => Isbn(converted),
            None => self.clone(),
        }
    }

    /// Positionally hyphenated form.
    pub fn formatted(&self) -> String {
        isbn::format(&self.0)
    }
}

impl std::fmt::Display for Isbn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.formatted())
    }
}

// ---------------------------------------------------------------------------
// VIN
// ---------------------------------------------------------------------------

/// A valid 17-character VIN, upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Vin(String);

impl_validating_deserialize!(Vin);
impl_validating_from_str!(Vin);

impl Vin {
    /// Create a VIN, validating structure and check digit.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] from [`vin::check`].
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let value = value.as_ref();
        vin::check(value)?;
        Ok(Self(vin::normalize(value)))
    }

    /// The VIN string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// World Manufacturer Identifier.
    pub fn wmi(&self) -> &str {
        &self.0[..3]
    }

    /// WMI, model-year code, and plant code.
    pub fn fields(&self) -> VinFields {
        let bytes = self.0.as_bytes();
        VinFields {
            wmi: self.wmi().to_string(),
            model_year_code: char::from(bytes[9]),
            plant_code: char::from(bytes[10]),
        }
    }

    /// Model year relative to `reference_year` (current year when `None`).
    pub fn model_year(&self, reference_year: Option<i32>) -> Option<i32> {
        vin::model_year(char::from(self.0.as_bytes()[9]), reference_year)
    }

    /// Production sequence number.
    pub fn serial(&self) -> &str {
        &self.0[11..]
    }
}

impl std::fmt::Display for Vin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::IdentifierKind;

    // -- CardNumber --

    #[test]
    fn card_number_normalizes() {
        let card = CardNumber::new("4532 0151 1283 0366").unwrap();
        assert_eq!(card.as_str(), "4532015112830366");
        assert_eq!(card.card_type(), CardType::Visa);
        assert_eq!(card.formatted(), "4532 0151 1283 0366");
        assert_eq!(card.masked('#'), "############0366");
    }

    #[test]
    fn card_number_display_is_masked() {
        let card: CardNumber = "4532015112830366".parse().unwrap();
        assert_eq!(format!("{card}"), "************0366");
    }

    #[test]
    fn card_number_debug_is_masked() {
        let card = CardNumber::new("4532015112830366").unwrap();
        let debug = format!("{card:?}");
        assert_eq!(debug, "CardNumber(\"************0366\")");
        assert!(!debug.contains("453201511283"));
    }

    #[test]
    fn card_number_rejects_bad_checksum() {
        assert_eq!(
            CardNumber::new("4532015112830367"),
            Err(ValidationError::ChecksumFailed {
                kind: IdentifierKind::Card
            })
        );
    }

    // -- Iban --

    #[test]
    fn iban_accessors() {
        let iban = Iban::new("de89 3704 0044 0532 0130 00").unwrap();
        assert_eq!(iban.as_str(), "DE89370400440532013000");
        assert_eq!(iban.country_code(), "DE");
        assert_eq!(iban.check_digits(), "89");
        assert_eq!(iban.bban(), "370400440532013000");
        assert_eq!(format!("{iban}"), "DE89 3704 0044 0532 0130 00");
    }

    #[test]
    fn iban_rejects_invalid() {
        assert!(Iban::new("DE89370400440532013001").is_err());
        assert!("".parse::<Iban>().is_err());
    }

    // -- Isbn --

    #[test]
    fn isbn_variant_and_conversion() {
        let isbn = Isbn::new("0-306-40615-2").unwrap();
        assert_eq!(isbn.variant(), IsbnVariant::Isbn10);
        let isbn13 = isbn.to_isbn13();
        assert_eq!(isbn13.as_str(), "9780306406157");
        assert_eq!(isbn13.variant(), IsbnVariant::Isbn13);
        assert_eq!(isbn13.to_isbn13(), isbn13);
        assert_eq!(format!("{isbn13}"), "978-0-306-40615-7");
    }

    // -- Vin --

    #[test]
    fn vin_accessors() {
        let vin = Vin::new("1hgbh41jxmn109186").unwrap();
        assert_eq!(vin.as_str(), "1HGBH41JXMN109186");
        assert_eq!(vin.wmi(), "1HG");
        assert_eq!(vin.serial(), "109186");
        assert_eq!(vin.model_year(Some(2026)), Some(2021));
        assert_eq!(vin.fields().plant_code, 'N');
    }

    #[test]
    fn vin_rejects_forbidden_letter() {
        assert!(matches!(
            Vin::new("1HGBH41JXMN1O9186"),
            Err(ValidationError::ForbiddenCharacter { found: 'O', .. })
        ));
    }

    // -- Serde --

    #[test]
    fn serde_roundtrip_stores_normalized_form() {
        let iban: Iban = serde_json::from_str("\"gb82 west 1234 5698 7654 32\"").unwrap();
        assert_eq!(serde_json::to_string(&iban).unwrap(), "\"GB82WEST12345698765432\"");

        let card: CardNumber = serde_json::from_str("\"4111-1111-1111-1111\"").unwrap();
        assert_eq!(serde_json::to_string(&card).unwrap(), "\"4111111111111111\"");
    }

    #[test]
    fn serde_rejects_invalid_values() {
        let err = serde_json::from_str::<Vin>("\"1HGBH41JXMN109187\"").unwrap_err();
        assert!(err.to_string().contains("VIN check digit mismatch"));
        assert!(serde_json::from_str::<Isbn>("\"0306406153\"").is_err());
        assert!(serde_json::from_str::<CardNumber>("\"1234\"").is_err());
    }
}
