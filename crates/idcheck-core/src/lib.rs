//! # idcheck-core: Identifier Validation
//!
//! Check-digit and format validators for structured identifiers. Every
//! validator is a pure function over a string: no I/O, no shared mutable
//! state, safe to call from any thread.
//!
//! ## Modules
//!
//! | Module | Identifier | Check |
//! |--------|------------|-------|
//! | [`luhn`] | Payment card numbers | Luhn mod-10, network classification, masking |
//! | [`iban`] | IBAN | Structure + ISO 7064 mod-97 |
//! | [`isbn`] | ISBN-10 / ISBN-13 | Weighted mod-11 / mod-10, 10→13 conversion |
//! | [`vin`] | VIN | Transliterated mod-11, field and model-year decoding |
//! | [`patterns`] | Phone, postal code, email, domain, IP, MAC, URI | Regex / parser |
//!
//! ## Two ways to validate
//!
//! 1. **Predicates** such as [`luhn::is_valid`] return `bool` and never fail.
//!    Malformed input is simply `false`.
//! 2. **Typed constructors** such as [`Iban::new`] return
//!    `Result<_, ValidationError>` naming the rule that rejected the input.
//!    `is_valid(x) == check(x).is_ok()` holds for every module.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests; built-in regexes are
//!   compiled from literals and `expect` on that.
//! - Normalizers are idempotent.

pub mod error;
pub mod iban;
pub mod identifier;
pub mod inspect;
pub mod isbn;
pub mod kind;
pub mod luhn;
pub mod normalize;
pub mod patterns;
pub mod vin;

// Re-export primary types for ergonomic imports.
pub use error::{IdcheckError, ValidationError};
pub use identifier::{CardNumber, Iban, Isbn, Vin};
pub use inspect::{Inspector, Report};
pub use isbn::IsbnVariant;
pub use kind::IdentifierKind;
pub use luhn::CardType;
pub use vin::{VinFields, VinInfo};
