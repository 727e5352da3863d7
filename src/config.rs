//! # Configuration Module
//!
//! This module defines configuration structures for the bot and the dataset
//! builder, their defaults, and how they are read from the environment.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

// Constants for dialogue and delivery
pub const MAX_COUNT: u32 = 5000; // Hard cap on names per request
pub const INLINE_THRESHOLD: usize = 200;
pub const PREVIEW_RECORDS: usize = 10; // Fake-data records shown inline
pub const MESSAGE_TEXT_LIMIT: usize = 4096; // Telegram text limit, in UTF-16 code units
pub const DEFAULT_NAMES_DIR: &str = "names";

// Constants for the dataset builder
pub const DEFAULT_DATASET_SEED: u64 = 42;
pub const DEFAULT_NAMES_PER_PAIR: usize = 500;
pub const DEFAULT_LOCALE: &str = "en_US";

/// Dialogue behaviour settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueConfig {
    /// Largest accepted count, never above `MAX_COUNT`
    pub max_count: u32,
    /// Results up to this size are sent inline, larger ones as a file
    pub inline_threshold: usize,
    /// Ask for a field list in the fake-data flow
    pub ask_fields: bool,
    /// Re-prompt for countries with no locale or alias
    pub strict_countries: bool,
    /// Fixed seed for sampling, entropy when unset
    pub seed: Option<u64>,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            max_count: MAX_COUNT,
            inline_threshold: INLINE_THRESHOLD,
            ask_fields: true,
            strict_countries: false,
            seed: None,
        }
    }
}

/// Dataset builder settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub seed: u64,
    /// Synthetic names drawn per (country, gender) pair before filtering
    pub names_per_pair: usize,
    /// Countries built in addition to the locale and alias tables
    pub extra_countries: Vec<String>,
    /// Locale used when a country has neither alias nor dedicated locale
    pub default_locale: String,
    /// JSON file replacing the built-in curated overrides
    pub overrides_path: Option<PathBuf>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_DATASET_SEED,
            names_per_pair: DEFAULT_NAMES_PER_PAIR,
            extra_countries: Vec::new(),
            default_locale: DEFAULT_LOCALE.to_string(),
            overrides_path: None,
        }
    }
}

/// Process configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub bot_token: Option<String>,
    pub names_dir: PathBuf,
    pub dialogue: DialogueConfig,
    pub dataset: DatasetConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_token: None,
            names_dir: PathBuf::from(DEFAULT_NAMES_DIR),
            dialogue: DialogueConfig::default(),
            dataset: DatasetConfig::default(),
        }
    }
}

impl BotConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let mut config = BotConfig::default();

        config.bot_token = get("TELEGRAM_BOT_TOKEN").or_else(|| get("BOT_TOKEN"));
        if let Some(dir) = get("NAMES_DIR") {
            config.names_dir = PathBuf::from(dir);
        }

        if let Some(value) = get("MAX_COUNT") {
            let max: u32 = parse_var("MAX_COUNT", &value)?;
            config.dialogue.max_count = max.clamp(1, MAX_COUNT);
        }
        if let Some(value) = get("INLINE_THRESHOLD") {
            config.dialogue.inline_threshold = parse_var("INLINE_THRESHOLD", &value)?;
        }
        if let Some(value) = get("FAKE_DATA_ASK_FIELDS") {
            config.dialogue.ask_fields = parse_bool("FAKE_DATA_ASK_FIELDS", &value)?;
        }
        if let Some(value) = get("STRICT_COUNTRIES") {
            config.dialogue.strict_countries = parse_bool("STRICT_COUNTRIES", &value)?;
        }
        if let Some(value) = get("SAMPLING_SEED") {
            config.dialogue.seed = Some(parse_var("SAMPLING_SEED", &value)?);
        }

        if let Some(value) = get("DATASET_SEED") {
            config.dataset.seed = parse_var("DATASET_SEED", &value)?;
        }
        if let Some(value) = get("DATASET_NAMES_PER_PAIR") {
            config.dataset.names_per_pair = parse_var("DATASET_NAMES_PER_PAIR", &value)?;
        }
        if let Some(value) = get("DATASET_EXTRA_COUNTRIES") {
            config.dataset.extra_countries = value
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(value) = get("DATASET_DEFAULT_LOCALE") {
            config.dataset.default_locale = value;
        }
        config.dataset.overrides_path = get("DATASET_OVERRIDES").map(PathBuf::from);

        Ok(config)
    }

    /// The bot token, or an error naming the variable to set
    pub fn require_token(&self) -> Result<&str> {
        self.bot_token
            .as_deref()
            .ok_or_else(|| anyhow!("TELEGRAM_BOT_TOKEN must be set"))
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("Invalid value for {key}: {value}"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("Invalid value for {key}: {value}")),
    }
}
