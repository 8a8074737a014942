//! # Inspection
//!
//! Dispatches any [`IdentifierKind`] to its validator and gathers every
//! derived field into a serializable [`Report`]. The [`Inspector`] carries
//! the few caller preferences that affect output: mask character, default
//! postal-code country, and the reference year for VIN model-year decoding.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{IdcheckError, ValidationError};
use crate::kind::IdentifierKind;
use crate::{iban, isbn, luhn, patterns, vin};

/// Everything known about one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Which validator ran.
    pub kind: IdentifierKind,
    /// The input as given.
    pub input: String,
    /// The canonical form the validator operated on.
    pub normalized: String,
    /// Whether the input passed.
    pub valid: bool,
    /// Why the input failed, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Derived fields, e.g. `card_type`, `country_code`, `model_year`.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<&'static str, String>,
}

impl Report {
    fn new(kind: IdentifierKind, input: &str, normalized: String) -> Self {
        Self {
            kind,
            input: input.to_string(),
            normalized,
            valid: false,
            reason: None,
            fields: BTreeMap::new(),
        }
    }

    fn with_outcome<T>(mut self, outcome: Result<T, ValidationError>) -> Self {
        match outcome {
            Ok(_) => self.valid = true,
            Err(e) => self.reason = Some(e.to_string()),
        }
        self
    }

    fn with_match(mut self, matched: bool) -> Self {
        self.valid = matched;
        if !matched {
            self.reason = Some(format!("not a valid {}", self.kind.label()));
        }
        self
    }

    fn field(mut self, name: &'static str, value: impl ToString) -> Self {
        self.fields.insert(name, value.to_string());
        self
    }

    fn field_opt<T: ToString>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.field(name, v),
            None => self,
        }
    }
}

/// Validator dispatch with caller preferences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inspector {
    mask_char: char,
    default_country: String,
    reference_year: Option<i32>,
}

impl Default for Inspector {
    fn default() -> Self {
        Self {
            mask_char: luhn::DEFAULT_MASK_CHAR,
            default_country: "US".to_string(),
            reference_year: None,
        }
    }
}

impl Inspector {
    /// An inspector with default preferences (`*` mask, US postal codes,
    /// current year as VIN reference).
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `mask_char` when masking card numbers.
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Country used for postal codes when none is given per call.
    pub fn with_default_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = country.into();
        self
    }

    /// Reference year for VIN model-year decoding.
    pub fn with_reference_year(mut self, year: Option<i32>) -> Self {
        self.reference_year = year;
        self
    }

    /// The configured mask character.
    pub fn mask_char(&self) -> char {
        self.mask_char
    }

    /// The configured default postal-code country.
    pub fn default_country(&self) -> &str {
        &self.default_country
    }

    /// Validate `input` as `kind`.
    ///
    /// `country` applies to postal codes only and falls back to the default
    /// country.
    ///
    /// # Errors
    ///
    /// [`IdcheckError::UnsupportedCountry`] if a postal code is checked
    /// against a country without a registered pattern. Invalid input is
    /// `Ok(false)`, never an error.
    pub fn is_valid(
        &self,
        kind: IdentifierKind,
        input: &str,
        country: Option<&str>,
    ) -> Result<bool, IdcheckError> {
        let valid = match kind {
            IdentifierKind::Card => luhn::is_valid(input),
            IdentifierKind::Iban => iban::is_valid(input),
            IdentifierKind::Isbn => isbn::is_valid(input),
            IdentifierKind::Vin => vin::is_valid(input),
            IdentifierKind::Phone => patterns::is_valid_phone(input),
            IdentifierKind::PostalCode => {
                patterns::check_postal_code(input, self.country(country))?
            }
            IdentifierKind::Email => patterns::is_valid_email(input),
            IdentifierKind::Domain => patterns::is_valid_domain(input),
            IdentifierKind::Ip => patterns::is_valid_ip(input),
            IdentifierKind::Mac => patterns::is_valid_mac(input),
            IdentifierKind::Uri => patterns::is_valid_uri(input),
        };
        Ok(valid)
    }

    /// Validate `input` as `kind` and collect every derived field.
    ///
    /// # Errors
    ///
    /// Same contract as [`Inspector::is_valid`].
    pub fn inspect(
        &self,
        kind: IdentifierKind,
        input: &str,
        country: Option<&str>,
    ) -> Result<Report, IdcheckError> {
        let report = match kind {
            IdentifierKind::Card => self.inspect_card(input),
            IdentifierKind::Iban => inspect_iban(input),
            IdentifierKind::Isbn => inspect_isbn(input),
            IdentifierKind::Vin => self.inspect_vin(input),
            IdentifierKind::PostalCode => {
                let country = self.country(country);
                let valid = patterns::check_postal_code(input, country)?;
                Report::new(kind, input, input.trim().to_string())
                    .with_match(valid)
                    .field("country", country.trim().to_ascii_uppercase())
            }
            IdentifierKind::Ip => {
                let version = if patterns::is_valid_ipv4(input) {
                    Some("4")
                } else if patterns::is_valid_ipv6(input) {
                    Some("6")
                } else {
                    None
                };
                Report::new(kind, input, input.trim().to_string())
                    .with_match(version.is_some())
                    .field_opt("version", version)
            }
            IdentifierKind::Phone
            | IdentifierKind::Email
            | IdentifierKind::Domain
            | IdentifierKind::Mac
            | IdentifierKind::Uri => {
                let valid = self.is_valid(kind, input, None)?;
                Report::new(kind, input, input.trim().to_string()).with_match(valid)
            }
        };
        tracing::debug!(kind = %kind, valid = report.valid, "inspected identifier");
        Ok(report)
    }

    fn country<'a>(&'a self, country: Option<&'a str>) -> &'a str {
        country.unwrap_or(&self.default_country)
    }

    fn inspect_card(&self, input: &str) -> Report {
        Report::new(IdentifierKind::Card, input, luhn::normalize(input))
            .with_outcome(luhn::check(input))
            .field("card_type", luhn::card_type(input))
            .field("masked", luhn::mask(input, self.mask_char))
            .field("formatted", luhn::format(input))
    }

    fn inspect_vin(&self, input: &str) -> Report {
        let mut report = Report::new(IdentifierKind::Vin, input, vin::normalize(input))
            .with_outcome(vin::check(input));
        match vin::decode(input, self.reference_year) {
            Some(info) => {
                report = report
                    .field("wmi", info.wmi)
                    .field("vds", info.vds)
                    .field("check_digit", info.check_digit)
                    .field("vis", info.vis)
                    .field("model_year_code", info.model_year_code)
                    .field_opt("model_year", info.model_year)
                    .field("plant_code", info.plant_code)
                    .field("serial", info.serial);
            }
            None => {
                report = report.field_opt("computed_check_digit", vin::check_digit(input));
            }
        }
        report
    }
}

fn inspect_iban(input: &str) -> Report {
    let country = iban::country_code(input);
    Report::new(IdentifierKind::Iban, input, iban::normalize(input))
        .with_outcome(iban::check(input))
        .field_opt("country_code", (!country.is_empty()).then_some(country))
        .field("formatted", iban::format(input))
}

fn inspect_isbn(input: &str) -> Report {
    let outcome = isbn::check(input);
    let variant = outcome.as_ref().ok().copied();
    let (isbn10, isbn13) = match variant {
        Some(isbn::IsbnVariant::Isbn10) => (
            Some(isbn::normalize(input)),
            isbn::convert_isbn10_to_isbn13(input),
        ),
        Some(isbn::IsbnVariant::Isbn13) => (
            isbn::convert_isbn13_to_isbn10(input),
            Some(isbn::normalize(input)),
        ),
        None => (None, None),
    };
    Report::new(IdentifierKind::Isbn, input, isbn::normalize(input))
        .with_outcome(outcome)
        .field_opt("variant", variant)
        .field("formatted", isbn::format(input))
        .field_opt("isbn10", isbn10)
        .field_opt("isbn13", isbn13)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_dispatch() {
        let inspector = Inspector::new();
        let cases = [
            (IdentifierKind::Card, "4532015112830366", true),
            (IdentifierKind::Card, "4532015112830367", false),
            (IdentifierKind::Iban, "DE89370400440532013000", true),
            (IdentifierKind::Isbn, "9780306406157", true),
            (IdentifierKind::Vin, "1HGBH41JXMN109186", true),
            (IdentifierKind::Phone, "+1 (555) 123-4567", true),
            (IdentifierKind::PostalCode, "12345", true),
            (IdentifierKind::Email, "user@example.com", true),
            (IdentifierKind::Domain, "example.com", true),
            (IdentifierKind::Ip, "::1", true),
            (IdentifierKind::Mac, "00:1A:2B:3C:4D:5E", true),
            (IdentifierKind::Uri, "https://example.com", true),
            (IdentifierKind::Uri, "nope", false),
        ];
        for (kind, input, expected) in cases {
            assert_eq!(
                inspector.is_valid(kind, input, None),
                Ok(expected),
                "{kind} {input}"
            );
        }
    }

    #[test]
    fn test_postal_country_resolution() {
        let inspector = Inspector::new().with_default_country("GB");
        assert_eq!(
            inspector.is_valid(IdentifierKind::PostalCode, "SW1A 1AA", None),
            Ok(true)
        );
        assert_eq!(
            inspector.is_valid(IdentifierKind::PostalCode, "SW1A 1AA", Some("US")),
            Ok(false)
        );
        assert_eq!(
            inspector.is_valid(IdentifierKind::PostalCode, "12345", Some("ZZ")),
            Err(IdcheckError::UnsupportedCountry("ZZ".to_string()))
        );
    }

    #[test]
    fn test_card_report() {
        let report = Inspector::new()
            .with_mask_char('#')
            .inspect(IdentifierKind::Card, "4532 0151 1283 0366", None)
            .unwrap();
        assert!(report.valid);
        assert_eq!(report.normalized, "4532015112830366");
        assert_eq!(report.reason, None);
        assert_eq!(report.fields["card_type"], "Visa");
        assert_eq!(report.fields["masked"], "############0366");
        assert_eq!(report.fields["formatted"], "4532 0151 1283 0366");
    }

    #[test]
    fn test_invalid_report_has_reason() {
        let report = Inspector::new()
            .inspect(IdentifierKind::Iban, "DE89370400440532013001", None)
            .unwrap();
        assert!(!report.valid);
        assert_eq!(report.reason.as_deref(), Some("IBAN checksum failed"));
        assert_eq!(report.fields["country_code"], "DE");
    }

    #[test]
    fn test_isbn_report_includes_both_forms() {
        let report = Inspector::new()
            .inspect(IdentifierKind::Isbn, "0-306-40615-2", None)
            .unwrap();
        assert!(report.valid);
        assert_eq!(report.fields["variant"], "ISBN-10");
        assert_eq!(report.fields["isbn10"], "0306406152");
        assert_eq!(report.fields["isbn13"], "9780306406157");
        assert_eq!(report.fields["formatted"], "0-306-40615-2");
    }

    #[test]
    fn test_vin_report() {
        let report = Inspector::new()
            .with_reference_year(Some(2026))
            .inspect(IdentifierKind::Vin, "1HGBH41JXMN109186", None)
            .unwrap();
        assert!(report.valid);
        assert_eq!(report.fields["wmi"], "1HG");
        assert_eq!(report.fields["model_year"], "2021");
        assert_eq!(report.fields["plant_code"], "N");
    }

    #[test]
    fn test_vin_report_suggests_check_digit() {
        let report = Inspector::new()
            .inspect(IdentifierKind::Vin, "1HGBH41JXMN109187", None)
            .unwrap();
        assert!(!report.valid);
        assert_eq!(report.fields["computed_check_digit"], "1");
        assert!(!report.fields.contains_key("wmi"));
    }

    #[test]
    fn test_ip_report_version() {
        let inspector = Inspector::new();
        let v4 = inspector.inspect(IdentifierKind::Ip, "10.0.0.1", None).unwrap();
        assert_eq!(v4.fields["version"], "4");
        let v6 = inspector.inspect(IdentifierKind::Ip, "fe80::1", None).unwrap();
        assert_eq!(v6.fields["version"], "6");
        let bad = inspector.inspect(IdentifierKind::Ip, "x", None).unwrap();
        assert!(!bad.valid);
        assert_eq!(bad.reason.as_deref(), Some("not a valid IP address"));
    }

    #[test]
    fn test_report_serializes() {
        let report = Inspector::new()
            .inspect(IdentifierKind::Email, "user@example.com", None)
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["kind"], "email");
        assert_eq!(json["valid"], true);
        assert!(json.get("reason").is_none());
        assert!(json.get("fields").is_none());
    }
}
