//! # Normalization
//!
//! Canonical forms that every validator operates on: separators removed and
//! ASCII letters upper-cased. Each normalizer is idempotent.
//!
//! Also holds the two regrouping helpers the formatters share: fixed-size
//! blocks (card numbers, IBANs) and positional hyphenation (ISBNs).

/// Keep ASCII digits only.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Remove whitespace and upper-case ASCII letters.
pub fn compact_upper(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Remove whitespace and hyphens, upper-case ASCII letters.
pub fn compact_upper_unhyphenated(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Split into blocks of `size` characters joined by single spaces.
///
/// The last block may be shorter. An empty input yields an empty string.
pub fn group(normalized: &str, size: usize) -> String {
    let size = size.max(1);
    let mut out = String::with_capacity(normalized.len() + normalized.len() / size);
    for (i, c) in normalized.chars().enumerate() {
        if i > 0 && i % size == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Insert hyphens between consecutive segments of the given widths.
///
/// Characters beyond the sum of `widths` form a trailing segment. Empty
/// segments never produce doubled or trailing hyphens.
pub fn hyphenate(normalized: &str, widths: &[usize]) -> String {
    let chars: Vec<char> = normalized.chars().collect();
    let mut segments: Vec<String> = Vec::with_capacity(widths.len() + 1);
    let mut start = 0;
    for &width in widths {
        if start >= chars.len() {
            break;
        }
        let end = (start + width).min(chars.len());
        segments.push(chars[start..end].iter().collect());
        start = end;
    }
    if start < chars.len() {
        segments.push(chars[start..].iter().collect());
    }
    segments.retain(|s| !s.is_empty());
    segments.join("-")
}
