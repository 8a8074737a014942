//! # Identifier Kinds
//!
//! Defines `IdentifierKind`, the closed set of identifier formats this crate
//! can validate. Every dispatch over kinds (the [`Inspector`], the CLI) is an
//! exhaustive `match`, so adding a kind forces every consumer to handle it.
//!
//! [`Inspector`]: crate::inspect::Inspector

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::IdcheckError;

/// All identifier formats supported by idcheck.
///
/// | Kind | Check |
/// |------|-------|
/// | Card | Luhn mod-10 |
/// | Iban | ISO 7064 mod-97 |
/// | Isbn | ISBN-10 mod-11 / ISBN-13 mod-10 |
/// | Vin | Transliterated mod-11 check digit |
/// | Phone | Pattern |
/// | PostalCode | Per-country pattern |
/// | Email | Pattern |
/// | Domain | Pattern |
/// | Ip | `std::net` parser |
/// | Mac | Pattern |
/// | Uri | `url` parser |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    /// Payment card number.
    Card,
    /// International Bank Account Number.
    Iban,
    /// International Standard Book Number (10 or 13 digits).
    Isbn,
    /// Vehicle Identification Number.
    Vin,
    /// Telephone number.
    Phone,
    /// Postal code for a specific country.
    PostalCode,
    /// Email address.
    Email,
    /// Internet domain name.
    Domain,
    /// IPv4 or IPv6 address.
    Ip,
    /// Hardware MAC address.
    Mac,
    /// Absolute URI.
    Uri,
}

impl IdentifierKind {
    /// Returns every kind in canonical order.
    pub fn all_kinds() -> &'static [IdentifierKind] {
        &[
            Self::Card,
            Self::Iban,
            Self::Isbn,
            Self::Vin,
            Self::Phone,
            Self::PostalCode,
            Self::Email,
            Self::Domain,
            Self::Ip,
            Self::Mac,
            Self::Uri,
        ]
    }

    /// Returns the snake_case identifier; matches the serde format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Iban => "iban",
            Self::Isbn => "isbn",
            Self::Vin => "vin",
            Self::Phone => "phone",
            Self::PostalCode => "postal_code",
            Self::Email => "email",
            Self::Domain => "domain",
            Self::Ip => "ip",
            Self::Mac => "mac",
            Self::Uri => "uri",
        }
    }

    /// Human-readable name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Card => "card number",
            Self::Iban => "IBAN",
            Self::Isbn => "ISBN",
            Self::Vin => "VIN",
            Self::Phone => "phone number",
            Self::PostalCode => "postal code",
            Self::Email => "email address",
            Self::Domain => "domain name",
            Self::Ip => "IP address",
            Self::Mac => "MAC address",
            Self::Uri => "URI",
        }
    }

    /// Whether validation involves a computed check digit or checksum,
    /// as opposed to pattern matching alone.
    pub fn has_check_digit(&self) -> bool {
        matches!(self, Self::Card | Self::Iban | Self::Isbn | Self::Vin)
    }
}

impl std::fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentifierKind {
    type Err = IdcheckError;

    /// Parse a kind from its snake_case identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "iban" => Ok(Self::Iban),
            "isbn" => Ok(Self::Isbn),
            "vin" => Ok(Self::Vin),
            "phone" => Ok(Self::Phone),
            "postal_code" => Ok(Self::PostalCode),
            "email" => Ok(Self::Email),
            "domain" => Ok(Self::Domain),
            "ip" => Ok(Self::Ip),
            "mac" => Ok(Self::Mac),
            "uri" => Ok(Self::Uri),
            other => Err(IdcheckError::UnknownKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_kinds_unique() {
        let mut seen = std::collections::HashSet::new();
        for k in IdentifierKind::all_kinds() {
            assert!(seen.insert(k), "Duplicate kind: {k}");
        }
        assert_eq!(seen.len(), 11);
    }

    #[test]
    fn test_as_str_roundtrip() {
        for kind in IdentifierKind::all_kinds() {
            let parsed: IdentifierKind = kind
                .as_str()
                .parse()
                .unwrap_or_else(|e| panic!("Failed to parse {kind}: {e}"));
            assert_eq!(*kind, parsed);
        }
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("ssn".parse::<IdentifierKind>().is_err());
        assert!("IBAN".parse::<IdentifierKind>().is_err()); // case-sensitive
        assert!("".parse::<IdentifierKind>().is_err());
    }

    #[test]
    fn test_serde_format_matches_as_str() {
        for kind in IdentifierKind::all_kinds() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: IdentifierKind = serde_json::from_str(&json).unwrap();
            assert_eq!(*kind, back);
        }
    }

    #[test]
    fn test_check_digit_kinds() {
        let checked: Vec<_> = IdentifierKind::all_kinds()
            .iter()
            .filter(|k| k.has_check_digit())
            .collect();
        assert_eq!(
            checked,
            vec![
                &IdentifierKind::Card,
                &IdentifierKind::Iban,
                &IdentifierKind::Isbn,
                &IdentifierKind::Vin
            ]
        );
    }
}
