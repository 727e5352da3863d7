//! Generator dialogue module: per-user session state, inbound command
//! classification and step input validation.

use serde::{Deserialize, Serialize};

use crate::errors::InputError;
use crate::text_normalization::{country_slug, is_decimal_digits, title_case};

/// Requested gender for a generation flow
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Mixed,
}

impl Gender {
    /// Lower-case token used in corpus paths and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Mixed => "mixed",
        }
    }

    /// Capitalized label for messages
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Mixed => "Mixed",
        }
    }
}

/// Which generator a flow ends in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowKind {
    /// Person names sampled from the corpus store
    Names,
    /// Records of person attributes
    FakeData,
}

/// Position of a session in the country → gender → count → fields dialogue
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Idle,
    AwaitCountry,
    AwaitGender,
    AwaitCount,
    AwaitFields,
    Done,
}

/// Per-user dialogue record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub flow: FlowKind,
    pub step: Step,
    /// Country as typed by the user, trimmed
    pub country: Option<String>,
    pub gender: Option<Gender>,
    pub count: Option<u32>,
    /// Requested field names, fake-data flow only
    pub fields: Vec<String>,
}

impl Session {
    /// A fresh session waiting for the country
    pub fn start(flow: FlowKind) -> Self {
        Self {
            flow,
            step: Step::AwaitCountry,
            country: None,
            gender: None,
            count: None,
            fields: Vec::new(),
        }
    }

    pub fn with_country(self, country: String) -> Self {
        Self {
            step: Step::AwaitGender,
            country: Some(country),
            ..self
        }
    }

    pub fn with_gender(self, gender: Gender) -> Self {
        Self {
            step: Step::AwaitCount,
            gender: Some(gender),
            ..self
        }
    }

    /// Record the count; the session waits for fields only when `ask_fields` is set
    pub fn with_count(self, count: u32, ask_fields: bool) -> Self {
        Self {
            step: if ask_fields { Step::AwaitFields } else { Step::Done },
            count: Some(count),
            ..self
        }
    }

    pub fn with_fields(self, fields: Vec<String>) -> Self {
        Self {
            step: Step::Done,
            fields,
            ..self
        }
    }

    /// Country formatted for display
    pub fn country_display(&self) -> String {
        self.country.as_deref().map(title_case).unwrap_or_default()
    }
}

/// Navigation commands that reset the session from any step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Start,
    Help,
    MainMenu,
}

/// Inbound text classified once, before any step dispatch
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Navigation(Navigation),
    FlowTrigger(FlowKind),
    StepInput(String),
}

impl Command {
    /// Classify raw message text.
    ///
    /// Slash commands match on the command word (`/start@my_bot` → start).
    /// Button labels match with any emoji prefix stripped and case ignored,
    /// so "🏠 Main Menu" and "main menu" are the same command.
    pub fn classify(text: &str) -> Command {
        let trimmed = text.trim();

        if let Some(command) = trimmed.strip_prefix('/') {
            let word = command
                .split(|c: char| c == '@' || c.is_whitespace())
                .next()
                .unwrap_or_default()
                .to_lowercase();
            match word.as_str() {
                "start" => return Command::Navigation(Navigation::Start),
                "help" => return Command::Navigation(Navigation::Help),
                "menu" => return Command::Navigation(Navigation::MainMenu),
                "names" => return Command::FlowTrigger(FlowKind::Names),
                "fakedata" => return Command::FlowTrigger(FlowKind::FakeData),
                _ => {}
            }
        }

        match button_label(trimmed).as_str() {
            "main menu" => Command::Navigation(Navigation::MainMenu),
            "name generator" => Command::FlowTrigger(FlowKind::Names),
            "fake data" => Command::FlowTrigger(FlowKind::FakeData),
            _ => Command::StepInput(trimmed.to_string()),
        }
    }
}

/// Lower-cased label with leading symbols and extra whitespace removed
fn button_label(text: &str) -> String {
    text.trim_start_matches(|c: char| !c.is_alphanumeric())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Validates a country input, returning it trimmed
pub fn validate_country(input: &str) -> Result<String, InputError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(InputError::EmptyCountry);
    }

    if country_slug(trimmed).is_empty() {
        return Err(InputError::UnsupportedCountryName(trimmed.to_string()));
    }

    Ok(trimmed.to_string())
}

/// Parses a gender token case-insensitively
pub fn parse_gender(input: &str) -> Result<Gender, InputError> {
    match input.trim().to_lowercase().as_str() {
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        "mixed" => Ok(Gender::Mixed),
        _ => Err(InputError::InvalidGender(input.trim().to_string())),
    }
}

/// Parses a requested count; only decimal digits in `1..=max` are accepted
pub fn parse_count(input: &str, max: u32) -> Result<u32, InputError> {
    let trimmed = input.trim();

    if !is_decimal_digits(trimmed) {
        return Err(InputError::NotANumber(trimmed.to_string()));
    }

    let out_of_range = InputError::OutOfRange { min: 1, max };
    // Digit strings that overflow u32 are still numbers, just too large
    let count: u32 = trimmed.parse().map_err(|_| out_of_range.clone())?;
    if count < 1 || count > max {
        return Err(out_of_range);
    }

    Ok(count)
}
