//! # Dataset Builder Module
//!
//! Offline population of the corpus store.
//!
//! The build runs two passes:
//!
//! 1. **Synthetic pass**: every country planned by the [`LocaleResolver`]
//!    (dedicated locales plus aliases) and every configured extra country gets
//!    a male and a female corpus of ASCII-folded two-token names drawn from the
//!    [`NameGenerator`].
//! 2. **Override pass**: countries with curated lists are regenerated from
//!    those lists, replacing the synthetic output.
//!
//! Every (country, gender) pair uses its own RNG seeded from the configured
//! seed and the pair key, so a rerun with the same inputs rewrites
//! byte-identical files. Failures are recorded per locale in the
//! [`BuildSummary`] and never abort the run.

use std::collections::BTreeMap;
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::DatasetConfig;
use crate::corpus::CorpusStore;
use crate::dialogue::Gender;
use crate::errors::BuildError;
use crate::locale_tables::{LocaleEntry, LocaleResolver, LocaleTables, SkippedLocale};
use crate::name_generator::NameGenerator;
use crate::text_normalization::{country_slug, is_two_token_name, to_ascii};

const BUILD_GENDERS: [Gender; 2] = [Gender::Male, Gender::Female];

/// A corpus file produced by the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenCorpus {
    pub country: String,
    pub gender: Gender,
    pub locale: String,
    pub path: PathBuf,
    pub names: usize,
}

/// Outcome of a build run
#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    pub written: Vec<WrittenCorpus>,
    pub skipped: Vec<SkippedLocale>,
    /// Generated names dropped as malformed or duplicate
    pub discarded: usize,
}

impl BuildSummary {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Builds corpus files from a name generator and the locale tables
pub struct DatasetBuilder<G: NameGenerator> {
    generator: G,
    tables: LocaleTables,
    config: DatasetConfig,
    store: CorpusStore,
}

impl<G: NameGenerator> DatasetBuilder<G> {
    pub fn new(
        generator: G,
        tables: LocaleTables,
        config: DatasetConfig,
        store: CorpusStore,
    ) -> Self {
        Self {
            generator,
            tables,
            config,
            store,
        }
    }

    /// Plan of country slug → locale for the synthetic pass
    pub fn plan(&self, resolver: &LocaleResolver) -> BTreeMap<String, String> {
        let mut plan = resolver.planned_countries();
        for country in &self.config.extra_countries {
            let slug = country_slug(country);
            if slug.is_empty() {
                warn!(country = %country, "Skipping extra country without a usable name");
                continue;
            }
            plan.insert(slug, resolver.resolve(country).locale);
        }
        plan
    }

    /// Run both passes and write every corpus
    pub fn build(&self) -> BuildSummary {
        let supported = self.generator.locales();
        let resolver = LocaleResolver::new(&self.tables, &supported, &self.config.default_locale);
        let mut summary = BuildSummary {
            skipped: resolver.skipped().to_vec(),
            ..BuildSummary::default()
        };

        let plan = self.plan(&resolver);
        info!(
            countries = plan.len(),
            names_per_pair = self.config.names_per_pair,
            root = %self.store.root().display(),
            "Building name dataset"
        );

        for (country, locale) in &plan {
            for gender in BUILD_GENDERS {
                let result = self.synthetic_names(country, locale, gender, &mut summary);
                self.record(&mut summary, country, locale, gender, result);
            }
        }

        for entry in &self.tables.overrides {
            let locale = if supported.contains(&entry.locale) {
                entry.locale.clone()
            } else {
                resolver.default_locale().to_string()
            };
            let country = country_slug(&entry.country);
            for gender in BUILD_GENDERS {
                let result = self.curated_names(entry, &locale, gender);
                self.record(&mut summary, &country, &locale, gender, result);
            }
        }

        info!(
            written = summary.written.len(),
            skipped = summary.skipped.len(),
            discarded = summary.discarded,
            "Dataset build finished"
        );
        summary
    }

    fn record(
        &self,
        summary: &mut BuildSummary,
        country: &str,
        locale: &str,
        gender: Gender,
        names: Result<Vec<String>, BuildError>,
    ) {
        let published = names.and_then(|names| {
            let path = self.store.publish(country, gender, &names)?;
            Ok(WrittenCorpus {
                country: country.to_string(),
                gender,
                locale: locale.to_string(),
                path,
                names: names.len(),
            })
        });

        match published {
            Ok(written) => summary.written.push(written),
            Err(error) => {
                warn!(
                    country = %country,
                    locale = %locale,
                    gender = gender.as_str(),
                    error = %error,
                    "Skipping corpus"
                );
                summary.skipped.push(SkippedLocale {
                    locale: locale.to_string(),
                    country: Some(country.to_string()),
                    error,
                });
            }
        }
    }

    fn rng_for(&self, country: &str, gender: Gender) -> StdRng {
        let key = format!("{country}_{}", gender.as_str());
        StdRng::seed_from_u64(self.config.seed ^ fnv1a(key.as_bytes()))
    }

    fn synthetic_names(
        &self,
        country: &str,
        locale: &str,
        gender: Gender,
        summary: &mut BuildSummary,
    ) -> Result<Vec<String>, BuildError> {
        let mut rng = self.rng_for(country, gender);
        let mut names = Vec::with_capacity(self.config.names_per_pair);
        for _ in 0..self.config.names_per_pair {
            names.push(self.generator.full_name(locale, gender, &mut rng)?);
        }

        let drawn = names.len();
        let names = clean_names(names);
        summary.discarded += drawn - names.len();

        if names.is_empty() {
            return Err(BuildError::NoValidNames {
                country: country.to_string(),
                gender,
            });
        }
        Ok(names)
    }

    /// Each curated first name paired with a random half of the last names
    fn curated_names(
        &self,
        entry: &LocaleEntry,
        locale: &str,
        gender: Gender,
    ) -> Result<Vec<String>, BuildError> {
        let country = country_slug(&entry.country);
        let mut rng = self.rng_for(&country, gender);

        let curated = match gender {
            Gender::Male => entry.male_first.clone(),
            _ => entry.female_first.clone(),
        };
        let first_names = match curated {
            Some(list) if !list.is_empty() => list,
            _ => (0..self.config.names_per_pair.min(50))
                .map(|_| self.generator.first_name(locale, gender, &mut rng))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let take = (entry.last.len() / 2).max(1);
        let mut names = Vec::new();
        for first in &first_names {
            for last in entry.last.choose_multiple(&mut rng, take) {
                names.push(format!("{first} {last}"));
            }
        }

        let names = clean_names(names);
        if names.is_empty() {
            return Err(BuildError::NoValidNames { country, gender });
        }
        Ok(names)
    }
}

/// ASCII-fold, keep two-token names and drop duplicates, preserving order
fn clean_names(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names
        .into_iter()
        .map(|name| to_ascii(&name))
        .filter(|name| is_two_token_name(name))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// 64-bit FNV-1a; stable across runs and platforms, unlike `DefaultHasher`
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}
