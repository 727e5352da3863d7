//! Synthetic name generator used by the dataset builder and the fake-data flow.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::dialogue::Gender;
use crate::errors::BuildError;
use crate::locale_tables::{strings, BUILTIN_POOLS};

/// A source of locale-flavoured first and last names
pub trait NameGenerator {
    /// Locale codes this generator can be configured with
    fn locales(&self) -> Vec<String>;

    /// Draw a first name; `Mixed` picks male or female with equal odds
    fn first_name(
        &self,
        locale: &str,
        gender: Gender,
        rng: &mut StdRng,
    ) -> Result<String, BuildError>;

    fn last_name(&self, locale: &str, rng: &mut StdRng) -> Result<String, BuildError>;

    /// `"{first} {last}"`
    fn full_name(
        &self,
        locale: &str,
        gender: Gender,
        rng: &mut StdRng,
    ) -> Result<String, BuildError> {
        let first = self.first_name(locale, gender, rng)?;
        let last = self.last_name(locale, rng)?;
        Ok(format!("{first} {last}"))
    }
}

/// Name lists for one locale
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalePool {
    pub male_first: Vec<String>,
    pub female_first: Vec<String>,
    pub last: Vec<String>,
}

/// Generator backed by in-memory per-locale pools
#[derive(Debug, Clone, Default)]
pub struct LocaleNameGenerator {
    pools: BTreeMap<String, LocalePool>,
}

impl LocaleNameGenerator {
    /// Generator over the pools shipped with the bot
    pub fn builtin() -> Self {
        let pools = BUILTIN_POOLS
            .iter()
            .map(|raw| {
                (
                    raw.code.to_string(),
                    LocalePool {
                        male_first: strings(raw.male_first),
                        female_first: strings(raw.female_first),
                        last: strings(raw.last),
                    },
                )
            })
            .collect();
        Self { pools }
    }

    pub fn from_pools(pools: BTreeMap<String, LocalePool>) -> Self {
        Self { pools }
    }

    fn pool(&self, locale: &str) -> Result<&LocalePool, BuildError> {
        self.pools
            .get(locale)
            .ok_or_else(|| BuildError::UnsupportedLocale {
                locale: locale.to_string(),
            })
    }
}

fn pick(
    names: &[String],
    locale: &str,
    list: &'static str,
    rng: &mut StdRng,
) -> Result<String, BuildError> {
    names
        .choose(rng)
        .cloned()
        .ok_or_else(|| BuildError::EmptyPool {
            locale: locale.to_string(),
            list,
        })
}

impl NameGenerator for LocaleNameGenerator {
    fn locales(&self) -> Vec<String> {
        self.pools.keys().cloned().collect()
    }

    fn first_name(
        &self,
        locale: &str,
        gender: Gender,
        rng: &mut StdRng,
    ) -> Result<String, BuildError> {
        let pool = self.pool(locale)?;
        let gender = match gender {
            Gender::Mixed if rng.gen_bool(0.5) => Gender::Male,
            Gender::Mixed => Gender::Female,
            other => other,
        };
        match gender {
            Gender::Male => pick(&pool.male_first, locale, "male first", rng),
            _ => pick(&pool.female_first, locale, "female first", rng),
        }
    }

    fn last_name(&self, locale: &str, rng: &mut StdRng) -> Result<String, BuildError> {
        pick(&self.pool(locale)?.last, locale, "last", rng)
    }
}
