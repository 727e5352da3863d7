//! # Error Types Module
//!
//! This module defines the error types used by the dialogue, the corpus store
//! and the dataset builder. Input errors are user-facing and always recoverable;
//! corpus and build errors carry enough context to diagnose a failure from the
//! message alone.

use std::path::PathBuf;

use crate::dialogue::Gender;

/// Validation errors raised while parsing a step input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Country input was empty after trimming
    EmptyCountry,
    /// Country input contains no characters usable in a corpus path
    UnsupportedCountryName(String),
    /// Country has no locale or alias (strict country mode only)
    UnknownCountry(String),
    /// Gender token is not male, female or mixed
    InvalidGender(String),
    /// Count is not a string of decimal digits
    NotANumber(String),
    /// Count is outside the accepted range
    OutOfRange { min: u32, max: u32 },
    /// Field list was empty after trimming
    EmptyFields,
}

impl InputError {
    /// Localization key of the re-prompt shown to the user
    pub fn localization_key(&self) -> &'static str {
        match self {
            InputError::EmptyCountry => "error-empty-country",
            InputError::UnsupportedCountryName(_) => "error-unsupported-country-name",
            InputError::UnknownCountry(_) => "error-unknown-country",
            InputError::InvalidGender(_) => "error-invalid-gender",
            InputError::NotANumber(_) => "error-not-a-number",
            InputError::OutOfRange { .. } => "error-out-of-range",
            InputError::EmptyFields => "error-empty-fields",
        }
    }
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::EmptyCountry => write!(f, "Country name is empty"),
            InputError::UnsupportedCountryName(name) => {
                write!(f, "Country name has no usable characters: {name}")
            }
            InputError::UnknownCountry(name) => write!(f, "Unknown country: {name}"),
            InputError::InvalidGender(value) => write!(f, "Invalid gender: {value}"),
            InputError::NotANumber(value) => write!(f, "Not a number: {value}"),
            InputError::OutOfRange { min, max } => {
                write!(f, "Count must be between {min} and {max}")
            }
            InputError::EmptyFields => write!(f, "Field list is empty"),
        }
    }
}

impl std::error::Error for InputError {}

/// Errors raised while resolving or publishing a corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusError {
    /// No resolution strategy produced a non-empty name list
    NotFound {
        country: String,
        gender: Gender,
        attempted: Vec<PathBuf>,
    },
    /// Reading or writing a corpus file failed
    Io { path: PathBuf, message: String },
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        CorpusError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for CorpusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorpusError::NotFound {
                country,
                gender,
                attempted,
            } => {
                let paths = attempted
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(
                    f,
                    "No corpus found for {country} ({}); tried: {paths}",
                    gender.as_str()
                )
            }
            CorpusError::Io { path, message } => {
                write!(f, "Corpus I/O error at {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for CorpusError {}

/// Per-locale failures recorded by the dataset builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Locale code has no region, or the region maps to no country
    UnknownRegion { locale: String },
    /// The name generator cannot be configured with this locale
    UnsupportedLocale { locale: String },
    /// The locale has no names for the requested list
    EmptyPool { locale: String, list: &'static str },
    /// Every drawn name was malformed after normalization
    NoValidNames { country: String, gender: Gender },
    /// Publishing the corpus file failed
    Io { path: PathBuf, message: String },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::UnknownRegion { locale } => {
                write!(f, "Locale {locale} does not map to a known country")
            }
            BuildError::UnsupportedLocale { locale } => {
                write!(f, "Locale {locale} is not supported by the name generator")
            }
            BuildError::EmptyPool { locale, list } => {
                write!(f, "Locale {locale} has no {list} names")
            }
            BuildError::NoValidNames { country, gender } => write!(
                f,
                "No valid names were generated for {country} ({})",
                gender.as_str()
            ),
            BuildError::Io { path, message } => {
                write!(f, "Failed to write {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for BuildError {}

impl From<CorpusError> for BuildError {
    fn from(err: CorpusError) -> Self {
        match err {
            CorpusError::Io { path, message } => BuildError::Io { path, message },
            CorpusError::NotFound { country, gender, .. } => {
                BuildError::NoValidNames { country, gender }
            }
        }
    }
}
