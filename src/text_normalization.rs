//! # Text Normalization Module
//!
//! Helpers shared by the dialogue and the corpus layers:
//!
//! - ASCII folding of generated names (diacritics stripped, non-ASCII residue dropped)
//! - Country slugs used for corpus lookup (`"United States"` → `"united_states"`)
//! - Title case for display (`"united states"` → `"United States"`)

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref SEPARATOR_RUN: Regex =
        Regex::new(r"[\s\-_]+").expect("Separator pattern should be valid");
    static ref SLUG_RESIDUE: Regex =
        Regex::new(r"[^a-z0-9_]").expect("Slug residue pattern should be valid");
    static ref DIGITS_ONLY: Regex = Regex::new(r"^[0-9]+$").expect("Digit pattern should be valid");
}

/// Fold a string to ASCII.
///
/// The input is decomposed (NFKD) so accented letters split into a base letter
/// plus combining marks; everything outside ASCII is then dropped and
/// whitespace runs collapse to a single space.
///
/// ```rust
/// use namegen_bot::text_normalization::to_ascii;
///
/// assert_eq!(to_ascii("  José   Núñez "), "Jose Nunez");
/// assert_eq!(to_ascii("山田"), "");
/// ```
pub fn to_ascii(input: &str) -> String {
    let folded: String = input.nfkd().filter(|c| c.is_ascii()).collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical corpus key for a country name.
///
/// Lower-case ASCII, with spaces, hyphens and underscores mapped to a single `_`.
/// Any other character is dropped, so the slug is always safe to use as a file name.
pub fn country_slug(country: &str) -> String {
    let ascii = to_ascii(country).to_lowercase();
    let separated = SEPARATOR_RUN.replace_all(ascii.trim(), "_");
    let cleaned = SLUG_RESIDUE.replace_all(&separated, "");
    cleaned.trim_matches('_').to_string()
}

/// Title case for display: every letter following a non-letter is upper-cased.
pub fn title_case(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut previous_is_letter = false;
    for c in input.trim().chars() {
        if previous_is_letter {
            result.extend(c.to_lowercase());
        } else {
            result.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    result
}

/// True when the input is a non-empty run of ASCII decimal digits
pub fn is_decimal_digits(input: &str) -> bool {
    DIGITS_ONLY.is_match(input)
}

/// True when a generated name is exactly two non-empty tokens
pub fn is_two_token_name(name: &str) -> bool {
    let mut tokens = name.split(' ');
    matches!(
        (tokens.next(), tokens.next(), tokens.next()),
        (Some(first), Some(last), None) if !first.is_empty() && !last.is_empty()
    )
}
