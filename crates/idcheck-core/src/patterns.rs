//! # Pattern-Based Validators
//!
//! Phone numbers, postal codes, domain names, email addresses, IP and MAC
//! addresses, and URIs. None of these carry a check digit; validity is a
//! pattern match or a parse through a standard parser.
//!
//! Every regex is compiled once into a process-wide static on first use and
//! never mutated afterwards. Inputs are trimmed of surrounding whitespace.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::IdcheckError;

/// Fewest digits accepted in a phone number.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Most digits accepted in a phone number (E.164 maximum).
pub const MAX_PHONE_DIGITS: usize = 15;

const MAX_DOMAIN_LENGTH: usize = 253;
const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in validation pattern is a valid regex")
}

/// Optional `+`, digits and `space . -` separators, at most one
/// parenthesized area group.
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"^\+?[\d\s.\-]*(?:\(\d{1,5}\))?[\d\s.\-]*$"));

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)^(?:[a-z0-9](?:[a-z0-9\-]{0,61}[a-z0-9])?\.)+[a-z]{2,63}$",
    )
});

static EMAIL_LOCAL: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~\-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~\-]+)*$")
});

static MAC: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        r"(?i)^(?:(?:[0-9a-f]{2}:){5}[0-9a-f]{2}|(?:[0-9a-f]{2}\-){5}[0-9a-f]{2}|(?:[0-9a-f]{4}\.){2}[0-9a-f]{4})$",
    )
});

/// Postal-code patterns keyed by ISO 3166-1 alpha-2 country code.
static POSTAL_CODES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("US", r"^\d{5}(?:-\d{4})?$"),
        ("CA", r"(?i)^[ABCEGHJ-NPRSTVXY]\d[A-Z] ?\d[A-Z]\d$"),
        ("GB", r"(?i)^[A-Z]{1,2}\d[A-Z\d]? ?\d[A-Z]{2}$"),
        ("DE", r"^\d{5}$"),
        ("FR", r"^\d{5}$"),
        ("NL", r"(?i)^[1-9]\d{3} ?[A-Z]{2}$"),
        ("JP", r"^\d{3}-?\d{4}$"),
        ("AU", r"^\d{4}$"),
        ("IN", r"^[1-9]\d{2} ?\d{3}$"),
        ("BR", r"^\d{5}-?\d{3}$"),
    ]
    .into_iter()
    .map(|(country, pattern)| (country, compile(pattern)))
    .collect()
});

/// Country codes with a registered postal-code pattern.
pub fn supported_postal_countries() -> Vec<&'static str> {
    POSTAL_CODES.iter().map(|(country, _)| *country).collect()
}

fn postal_pattern(country: &str) -> Option<&'static Regex> {
    let country = country.trim();
    POSTAL_CODES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(country))
        .map(|(_, re)| re)
}

/// Whether `input` looks like a phone number with 7–15 digits.
pub fn is_valid_phone(input: &str) -> bool {
    let input = input.trim();
    if !PHONE.is_match(input) {
        return false;
    }
    let digits = input.chars().filter(|c| c.is_ascii_digit()).count();
    (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// Whether `input` is a postal code for `country` (case-insensitive
/// ISO alpha-2). Unsupported countries are never valid.
pub fn is_valid_postal_code(input: &str, country: &str) -> bool {
    check_postal_code(input, country).unwrap_or(false)
}

/// Like [`is_valid_postal_code`], but an unsupported country is an error
/// rather than `false`.
pub fn check_postal_code(input: &str, country: &str) -> Result<bool, IdcheckError> {
    let re = postal_pattern(country)
        .ok_or_else(|| IdcheckError::UnsupportedCountry(country.to_string()))?;
    Ok(re.is_match(input.trim()))
}

/// Whether `input` is a fully-qualified domain name with an alphabetic TLD.
pub fn is_valid_domain(input: &str) -> bool {
    domain_matches(input.trim())
}

fn domain_matches(domain: &str) -> bool {
    domain.len() <= MAX_DOMAIN_LENGTH && DOMAIN.is_match(domain)
}

/// Whether `input` is an address of the form `local@domain`.
pub fn is_valid_email(input: &str) -> bool {
    let input = input.trim();
    if input.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    let Some((local, domain)) = input.rsplit_once('@') else {
        return false;
    };
    local.len() <= MAX_LOCAL_PART_LENGTH && EMAIL_LOCAL.is_match(local) && domain_matches(domain)
}

/// Whether `input` is a dotted-quad IPv4 address.
pub fn is_valid_ipv4(input: &str) -> bool {
    Ipv4Addr::from_str(input.trim()).is_ok()
}

/// Whether `input` is an IPv6 address.
pub fn is_valid_ipv6(input: &str) -> bool {
    Ipv6Addr::from_str(input.trim()).is_ok()
}

/// Whether `input` is an IPv4 or IPv6 address.
pub fn is_valid_ip(input: &str) -> bool {
    is_valid_ipv4(input) || is_valid_ipv6(input)
}

/// Whether `input` is a 48-bit MAC address in colon, hyphen, or dotted
/// (Cisco) notation. Separators must be consistent.
pub fn is_valid_mac(input: &str) -> bool {
    MAC.is_match(input.trim())
}

/// Whether `input` is an absolute URI. `http` and `https` URIs also need a
/// host.
pub fn is_valid_uri(input: &str) -> bool {
    match url::Url::parse(input.trim()) {
        Ok(url) => match url.scheme() {
            "http" | "https" => url.host_str().is_some_and(|h| !h.is_empty()),
            scheme => !scheme.is_empty(),
        },
        Err(e) => {
            tracing::trace!(error = %e, "URI rejected");
            false
        }
    }
}
