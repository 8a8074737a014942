//! # Error Types
//!
//! Two classes of failure, kept apart:
//!
//! - [`ValidationError`]: the input is malformed or fails its check digit.
//!   The boolean validators (`luhn::is_valid`, `iban::is_valid`, ...) fold
//!   this into `false`; the `check` functions and typed constructors return
//!   it so callers can see which rule rejected the input.
//! - [`IdcheckError`]: the caller broke a usage contract (unknown identifier
//!   kind, unsupported postal-code country). These are never reported as
//!   "invalid input".

use thiserror::Error;

use crate::kind::IdentifierKind;

/// Top-level error type for usage-contract violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdcheckError {
    /// A validation failure surfaced through a fallible API.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The identifier kind string is not one of the supported kinds.
    #[error("unknown identifier kind: {0:?}")]
    UnknownKind(String),

    /// No postal-code pattern is registered for the requested country.
    #[error("unsupported postal code country: {0:?}")]
    UnsupportedCountry(String),

    /// The operation is not defined for this identifier kind.
    #[error("operation {operation:?} is not supported for {kind}")]
    UnsupportedOperation {
        /// The operation that was requested.
        operation: &'static str,
        /// The identifier kind it was requested for.
        kind: IdentifierKind,
    },
}

/// Why an identifier was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing left after normalization.
    #[error("{} is empty", .kind.label())]
    Empty {
        /// The identifier kind being validated.
        kind: IdentifierKind,
    },

    /// Wrong number of characters after normalization.
    #[error("{} has length {actual}, expected {expected}", .kind.label())]
    InvalidLength {
        /// The identifier kind being validated.
        kind: IdentifierKind,
        /// Normalized length in characters.
        actual: usize,
        /// Human-readable description of the accepted lengths.
        expected: &'static str,
    },

    /// A character that is not allowed at its position.
    #[error("{} has invalid character {found:?} at position {position}", .kind.label())]
    InvalidCharacter {
        /// The identifier kind being validated.
        kind: IdentifierKind,
        /// Zero-based position in the normalized string.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// A character the scheme excludes outright (VIN `I`, `O`, `Q`).
    #[error("{} contains forbidden character {found:?} at position {position}", .kind.label())]
    ForbiddenCharacter {
        /// The identifier kind being validated.
        kind: IdentifierKind,
        /// Zero-based position in the normalized string.
        position: usize,
        /// The offending character.
        found: char,
    },

    /// The embedded check character differs from the computed one.
    #[error("{} check digit mismatch: expected {expected:?}, found {found:?}", .kind.label())]
    CheckDigitMismatch {
        /// The identifier kind being validated.
        kind: IdentifierKind,
        /// The computed check character.
        expected: char,
        /// The check character present in the input.
        found: char,
    },

    /// The whole-string checksum (Luhn sum, mod-97 remainder) is wrong.
    #[error("{} checksum failed", .kind.label())]
    ChecksumFailed {
        /// The identifier kind being validated.
        kind: IdentifierKind,
    },
}

impl ValidationError {
    /// The identifier kind that was being validated.
    pub fn kind(&self) -> IdentifierKind {
        match self {
            Self::Empty { kind }
            | Self::InvalidLength { kind, .. }
            | Self::InvalidCharacter { kind, .. }
            | Self::ForbiddenCharacter { kind, .. }
            | Self::CheckDigitMismatch { kind, .. }
            | Self::ChecksumFailed { kind } => *kind,
        }
    }
}
