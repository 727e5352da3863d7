//! # Locale Tables Module
//!
//! Built-in data for the dataset builder and the fake-data flow:
//!
//! - name pools for every locale the synthetic generator supports
//! - region code → country name table used to derive a country from a locale code
//! - alias table mapping informal or missing country names to a near locale
//! - hand-curated per-country lists ("local overrides")
//!
//! [`LocaleResolver`] chains these tables: alias, then dedicated locale, then
//! countries configured for the dataset (curated overrides and extra
//! countries), then the generic default locale.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::DatasetConfig;
use crate::errors::BuildError;
use crate::text_normalization::country_slug;

/// Raw name pool for one locale
pub(crate) struct RawPool {
    pub code: &'static str,
    pub male_first: &'static [&'static str],
    pub female_first: &'static [&'static str],
    pub last: &'static [&'static str],
}

pub(crate) static BUILTIN_POOLS: &[RawPool] = &[
    RawPool {
        code: "de_DE",
        male_first: &[
            "Lukas", "Jürgen", "Jonas", "Felix", "Maximilian", "Paul", "Leon", "Stefan",
            "Björn", "Uwe", "Klaus", "Dieter", "Jörg", "Tobias", "Matthias",
        ],
        female_first: &[
            "Anna", "Lena", "Sophie", "Marie", "Hannah", "Lea", "Mia", "Emma", "Ursula",
            "Käthe", "Jutta", "Sabine", "Gisela", "Jana", "Katrin",
        ],
        last: &[
            "Müller", "Schmidt", "Schneider", "Fischer", "Weber", "Meyer", "Wagner", "Becker",
            "Schulz", "Hoffmann", "Schäfer", "Koch", "Bauer", "Richter", "Klein",
        ],
    },
    RawPool {
        code: "en_GB",
        male_first: &[
            "Oliver", "George", "Harry", "Jack", "Jacob", "Charlie", "Thomas", "Oscar",
            "William", "James", "Alfie", "Henry", "Archie", "Leo", "Joshua",
        ],
        female_first: &[
            "Olivia", "Amelia", "Isla", "Ava", "Emily", "Sophie", "Grace", "Lily", "Freya",
            "Charlotte", "Poppy", "Evie", "Jessica", "Ella", "Ruby",
        ],
        last: &[
            "Smith", "Jones", "Taylor", "Brown", "Williams", "Wilson", "Johnson", "Davies",
            "Robinson", "Wright", "Thompson", "Evans", "Walker", "White", "Roberts",
        ],
    },
    RawPool {
        code: "en_IN",
        male_first: &[
            "Aarav", "Vivaan", "Aditya", "Vihaan", "Arjun", "Sai", "Reyansh", "Krishna",
            "Ishaan", "Rohan", "Amit", "Rahul", "Sanjay", "Vikram", "Anil",
        ],
        female_first: &[
            "Aadhya", "Ananya", "Diya", "Saanvi", "Pari", "Priya", "Anjali", "Kavita", "Neha",
            "Pooja", "Ritu", "Swati", "Meena", "Sonia", "Lata",
        ],
        last: &[
            "Patel", "Sharma", "Gupta", "Singh", "Mehta", "Iyer", "Verma", "Reddy", "Naidu",
            "Kapoor", "Kumar", "Joshi", "Nair", "Rao", "Das",
        ],
    },
    RawPool {
        code: "en_US",
        male_first: &[
            "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph",
            "Charles", "Thomas", "Christopher", "Daniel", "Matthew", "Anthony", "Mark",
        ],
        female_first: &[
            "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan",
            "Jessica", "Sarah", "Karen", "Nancy", "Lisa", "Betty", "Margaret", "Sandra",
        ],
        last: &[
            "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
            "Rodriguez", "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson",
        ],
    },
    RawPool {
        code: "es_ES",
        male_first: &[
            "José", "Antonio", "Manuel", "Francisco", "David", "Juan", "Javier", "Daniel",
            "Carlos", "Jesús", "Alejandro", "Miguel", "Rafael", "Pablo", "Sergio",
        ],
        female_first: &[
            "María", "Carmen", "Ana", "Isabel", "Laura", "Cristina", "Marta", "Lucía", "Paula",
            "Elena", "Sara", "Raquel", "Rocío", "Beatriz", "Nuria",
        ],
        last: &[
            "García", "Rodríguez", "González", "Fernández", "López", "Martínez", "Sánchez",
            "Pérez", "Gómez", "Martín", "Jiménez", "Ruiz", "Hernández", "Díaz", "Moreno",
        ],
    },
    RawPool {
        code: "fr_FR",
        male_first: &[
            "Jean", "Pierre", "Michel", "André", "Philippe", "François", "Nicolas", "Jérôme",
            "Loïc", "Théo", "Hugo", "Louis", "Gabriel", "Raphaël", "Lucas",
        ],
        female_first: &[
            "Marie", "Nathalie", "Isabelle", "Sylvie", "Catherine", "Françoise", "Hélène",
            "Chloé", "Léa", "Manon", "Camille", "Inès", "Zoé", "Céline", "Élodie",
        ],
        last: &[
            "Martin", "Bernard", "Dubois", "Thomas", "Robert", "Richard", "Petit", "Durand",
            "Leroy", "Moreau", "Simon", "Laurent", "Lefèvre", "Michel", "Garnier",
        ],
    },
    RawPool {
        code: "it_IT",
        male_first: &[
            "Giuseppe", "Giovanni", "Antonio", "Mario", "Luigi", "Francesco", "Angelo",
            "Vincenzo", "Pietro", "Salvatore", "Carlo", "Franco", "Domenico", "Bruno", "Paolo",
        ],
        female_first: &[
            "Maria", "Anna", "Giuseppina", "Rosa", "Angela", "Giovanna", "Teresa", "Lucia",
            "Carmela", "Caterina", "Francesca", "Chiara", "Giulia", "Sofia", "Martina",
        ],
        last: &[
            "Rossi", "Russo", "Ferrari", "Esposito", "Bianchi", "Romano", "Colombo", "Ricci",
            "Marino", "Greco", "Bruno", "Gallo", "Conti", "De Luca", "Costa",
        ],
    },
    RawPool {
        code: "ja_JP",
        male_first: &[
            "Hiroshi", "Takashi", "Taro", "Yuki", "Kenta", "Shinji", "Naoki", "Ryo", "Kazuya",
            "Sota", "Haruto", "Ren", "Yuto", "Daiki", "Shota",
        ],
        female_first: &[
            "Yumi", "Sakura", "Aiko", "Haruka", "Rina", "Mika", "Asuka", "Emi", "Aya", "Nana",
            "Yui", "Hina", "Mio", "Saki", "Yuna",
        ],
        last: &[
            "Tanaka", "Suzuki", "Takahashi", "Sato", "Kobayashi", "Watanabe", "Ito",
            "Yamamoto", "Nakamura", "Kato", "Yoshida", "Yamada", "Sasaki", "Matsumoto", "Inoue",
        ],
    },
    RawPool {
        code: "nl_NL",
        male_first: &[
            "Daan", "Sem", "Lucas", "Levi", "Finn", "Milan", "Bram", "Thijs", "Jesse", "Ruben",
            "Lars", "Sven", "Joris", "Wouter", "Stijn",
        ],
        female_first: &[
            "Emma", "Julia", "Sophie", "Tess", "Sara", "Anna", "Lotte", "Fleur", "Eva", "Noa",
            "Sanne", "Femke", "Anouk", "Lieke", "Maud",
        ],
        last: &[
            "de Jong", "Jansen", "de Vries", "Bakker", "Visser", "Smit", "Meijer", "Mulder",
            "Bos", "Vos", "Peters", "Hendriks", "Dekker", "Brouwer", "Dijkstra",
        ],
    },
    RawPool {
        code: "no_NO",
        male_first: &[
            "Ole", "Lars", "Knut", "Jan", "Per", "Erik", "Kjell", "Arne", "Hans", "Magnus",
            "Henrik", "Jonas", "Emil", "Sander", "Martin",
        ],
        female_first: &[
            "Anne", "Inger", "Kari", "Marit", "Ingrid", "Liv", "Eva", "Berit", "Astrid",
            "Hilde", "Nora", "Emma", "Sofie", "Maja", "Ida",
        ],
        last: &[
            "Hansen", "Johansen", "Olsen", "Larsen", "Andersen", "Pedersen", "Nilsen",
            "Kristiansen", "Jensen", "Karlsen", "Johnsen", "Pettersen", "Eriksen", "Berg",
            "Haugen",
        ],
    },
    RawPool {
        code: "pl_PL",
        male_first: &[
            "Jakub", "Kacper", "Szymon", "Filip", "Jan", "Antoni", "Mateusz", "Bartosz",
            "Wojciech", "Piotr", "Tomasz", "Krzysztof", "Marek", "Adam", "Dawid",
        ],
        female_first: &[
            "Zuzanna", "Julia", "Maja", "Zofia", "Hanna", "Lena", "Alicja", "Maria", "Amelia",
            "Oliwia", "Agnieszka", "Katarzyna", "Magdalena", "Ewa", "Joanna",
        ],
        last: &[
            "Nowak", "Wójcik", "Kowalczyk", "Woźniak", "Mazur", "Krawczyk", "Kaczmarek",
            "Zając", "Król", "Wróbel", "Dudek", "Pawlak", "Walczak", "Sikora", "Baran",
        ],
    },
    RawPool {
        code: "pt_BR",
        male_first: &[
            "João", "Pedro", "Lucas", "Gabriel", "Matheus", "Rafael", "Gustavo", "Felipe",
            "Bruno", "Thiago", "Caio", "Vinícius", "Leonardo", "Eduardo", "André",
        ],
        female_first: &[
            "Ana", "Júlia", "Beatriz", "Larissa", "Camila", "Fernanda", "Letícia", "Mariana",
            "Gabriela", "Amanda", "Bianca", "Carolina", "Isabela", "Luana", "Vitória",
        ],
        last: &[
            "Silva", "Santos", "Oliveira", "Souza", "Rodrigues", "Ferreira", "Alves", "Pereira",
            "Lima", "Gomes", "Costa", "Ribeiro", "Martins", "Carvalho", "Araújo",
        ],
    },
    RawPool {
        code: "ru_RU",
        male_first: &[
            "Alexander", "Sergei", "Dmitri", "Andrei", "Alexei", "Maxim", "Ivan", "Mikhail",
            "Nikolai", "Vladimir", "Pavel", "Yuri", "Oleg", "Igor", "Roman",
        ],
        female_first: &[
            "Elena", "Olga", "Natalia", "Tatiana", "Irina", "Anna", "Maria", "Svetlana",
            "Ekaterina", "Anastasia", "Yulia", "Daria", "Polina", "Ksenia", "Vera",
        ],
        last: &[
            "Ivanov", "Smirnov", "Kuznetsov", "Popov", "Vasiliev", "Petrov", "Sokolov",
            "Mikhailov", "Novikov", "Fedorov", "Morozov", "Volkov", "Lebedev", "Kozlov",
            "Pavlov",
        ],
    },
    RawPool {
        code: "tr_TR",
        male_first: &[
            "Mehmet", "Mustafa", "Ahmet", "Ali", "Hüseyin", "Hasan", "İbrahim", "Murat",
            "Ömer", "Yusuf", "Emre", "Burak", "Kemal", "Cem", "Can",
        ],
        female_first: &[
            "Fatma", "Ayşe", "Emine", "Hatice", "Zeynep", "Elif", "Meryem", "Şerife", "Sultan",
            "Hülya", "Esra", "Merve", "Derya", "Selin", "Ebru",
        ],
        last: &[
            "Kaya", "Demir", "Şahin", "Çelik", "Öztürk", "Arslan", "Doğan", "Aslan", "Çetin",
            "Kara", "Koç", "Kurt", "Özdemir", "Polat", "Erdem",
        ],
    },
];

static REGION_NAMES: &[(&str, &str)] = &[
    ("BR", "brazil"),
    ("DE", "germany"),
    ("ES", "spain"),
    ("FR", "france"),
    ("GB", "united kingdom"),
    ("IN", "india"),
    ("IT", "italy"),
    ("JP", "japan"),
    ("NL", "netherlands"),
    ("NO", "norway"),
    ("PL", "poland"),
    ("RU", "russia"),
    ("TR", "turkey"),
    ("US", "united states"),
];

static ALIASES: &[(&str, &str)] = &[
    ("america", "en_US"),
    ("argentina", "es_ES"),
    ("australia", "en_GB"),
    ("austria", "de_DE"),
    ("bangladesh", "en_IN"),
    ("belgium", "fr_FR"),
    ("canada", "en_US"),
    ("colombia", "es_ES"),
    ("denmark", "no_NO"),
    ("england", "en_GB"),
    ("ireland", "en_GB"),
    ("mexico", "es_ES"),
    ("nepal", "en_IN"),
    ("new zealand", "en_GB"),
    ("pakistan", "en_IN"),
    ("portugal", "pt_BR"),
    ("sri lanka", "en_IN"),
    ("sweden", "no_NO"),
    ("switzerland", "de_DE"),
    ("uk", "en_GB"),
    ("usa", "en_US"),
];

/// A country with a locale and optional curated name lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleEntry {
    pub country: String,
    pub locale: String,
    #[serde(default)]
    pub male_first: Option<Vec<String>>,
    #[serde(default)]
    pub female_first: Option<Vec<String>>,
    pub last: Vec<String>,
}

pub(crate) fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn builtin_overrides() -> Vec<LocaleEntry> {
    vec![
        LocaleEntry {
            country: "bangladesh".to_string(),
            locale: "en_IN".to_string(),
            male_first: Some(strings(&[
                "Rashid", "Hussain", "Ibrahim", "Yusuf", "Bilal", "Farid", "Sajid", "Nayeem",
                "Rafi", "Arif",
            ])),
            female_first: Some(strings(&[
                "Mariam", "Ayesha", "Jannat", "Farzana", "Sadia", "Sumaiya", "Runa", "Lamia",
                "Nusrat", "Jahanara",
            ])),
            last: strings(&[
                "Chowdhury", "Siddique", "Miah", "Ali", "Rahman", "Hassan", "Khan", "Uddin",
                "Ahmed", "Mollah",
            ]),
        },
        LocaleEntry {
            country: "india".to_string(),
            locale: "en_IN".to_string(),
            male_first: Some(strings(&[
                "Ravi", "Amit", "Suresh", "Rajesh", "Manish", "Deepak", "Rahul", "Sanjay",
                "Vikram", "Anil",
            ])),
            female_first: Some(strings(&[
                "Priya", "Anjali", "Kavita", "Neha", "Pooja", "Ritu", "Swati", "Meena", "Sonia",
                "Lata",
            ])),
            last: strings(&[
                "Patel", "Sharma", "Gupta", "Singh", "Mehta", "Iyer", "Verma", "Reddy", "Naidu",
                "Kapoor",
            ]),
        },
        LocaleEntry {
            country: "usa".to_string(),
            locale: "en_US".to_string(),
            male_first: Some(strings(&[
                "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph",
                "Charles", "Thomas",
            ])),
            female_first: Some(strings(&[
                "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Susan", "Jessica", "Sarah",
                "Karen", "Nancy",
            ])),
            last: strings(&[
                "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
                "Rodriguez", "Martinez",
            ]),
        },
        LocaleEntry {
            country: "japan".to_string(),
            locale: "ja_JP".to_string(),
            male_first: Some(strings(&[
                "Hiroshi", "Takashi", "Taro", "Yuki", "Kenta", "Shinji", "Naoki", "Ryo", "Kazuya",
                "Sota",
            ])),
            female_first: Some(strings(&[
                "Yumi", "Sakura", "Aiko", "Haruka", "Rina", "Mika", "Asuka", "Emi", "Aya", "Nana",
            ])),
            last: strings(&[
                "Tanaka", "Suzuki", "Takahashi", "Sato", "Kobayashi", "Watanabe", "Ito",
                "Yamamoto", "Nakamura", "Kato",
            ]),
        },
    ]
}

/// Region, alias and override tables consumed by the resolver and builder
#[derive(Debug, Clone, Default)]
pub struct LocaleTables {
    /// Region code (`"JP"`) → country name
    pub regions: BTreeMap<String, String>,
    /// Country slug → locale code
    pub aliases: BTreeMap<String, String>,
    /// Curated lists applied after the synthetic pass
    pub overrides: Vec<LocaleEntry>,
}

impl LocaleTables {
    /// The tables shipped with the bot
    pub fn builtin() -> Self {
        Self {
            regions: REGION_NAMES
                .iter()
                .map(|(code, name)| (code.to_string(), name.to_string()))
                .collect(),
            aliases: ALIASES
                .iter()
                .map(|(country, locale)| (country_slug(country), locale.to_string()))
                .collect(),
            overrides: builtin_overrides(),
        }
    }

    /// Replace the curated overrides
    pub fn with_overrides(mut self, overrides: Vec<LocaleEntry>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Load curated overrides from a JSON array of [`LocaleEntry`] records
    pub fn load_overrides(path: &Path) -> Result<Vec<LocaleEntry>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read overrides file {}", path.display()))?;
        let entries: Vec<LocaleEntry> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse overrides file {}", path.display()))?;
        debug!(path = %path.display(), entries = entries.len(), "Loaded locale overrides");
        Ok(entries)
    }

    /// Country slug derived from a locale code's region (`"ja_JP"` → `"japan"`)
    pub fn country_for_locale(&self, locale: &str) -> Result<String, BuildError> {
        let region = locale
            .split(['_', '-'])
            .nth(1)
            .map(|r| r.to_ascii_uppercase())
            .ok_or_else(|| BuildError::UnknownRegion {
                locale: locale.to_string(),
            })?;

        self.regions
            .get(&region)
            .map(|name| country_slug(name))
            .filter(|slug| !slug.is_empty())
            .ok_or_else(|| BuildError::UnknownRegion {
                locale: locale.to_string(),
            })
    }
}

/// Where a country's locale came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleSource {
    Alias,
    Dedicated,
    /// Curated override or extra country from the dataset configuration
    Configured,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResolution {
    pub locale: String,
    pub source: LocaleSource,
}

/// A locale (or alias) left out of the plan, with the reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLocale {
    pub locale: String,
    pub country: Option<String>,
    pub error: BuildError,
}

/// Maps country names to locale codes the generator supports
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    dedicated: BTreeMap<String, String>,
    aliases: BTreeMap<String, String>,
    configured: BTreeMap<String, String>,
    supported: BTreeSet<String>,
    default_locale: String,
    skipped: Vec<SkippedLocale>,
}

impl LocaleResolver {
    /// Build the resolver from the tables and the generator's supported locales.
    ///
    /// Locales whose region maps to no country, and aliases pointing at an
    /// unsupported locale, are recorded in [`LocaleResolver::skipped`].
    pub fn new(tables: &LocaleTables, supported: &[String], default_locale: &str) -> Self {
        let supported_set: BTreeSet<&str> = supported.iter().map(String::as_str).collect();
        let mut dedicated = BTreeMap::new();
        let mut aliases = BTreeMap::new();
        let mut skipped = Vec::new();

        for locale in supported {
            match tables.country_for_locale(locale) {
                Ok(country) => {
                    dedicated.insert(country, locale.clone());
                }
                Err(error) => {
                    warn!(locale = %locale, error = %error, "Skipping locale without a country");
                    skipped.push(SkippedLocale {
                        locale: locale.clone(),
                        country: None,
                        error,
                    });
                }
            }
        }

        for (country, locale) in &tables.aliases {
            if supported_set.contains(locale.as_str()) {
                aliases.insert(country.clone(), locale.clone());
            } else {
                warn!(
                    country = %country,
                    locale = %locale,
                    "Alias points to an unsupported locale"
                );
                skipped.push(SkippedLocale {
                    locale: locale.clone(),
                    country: Some(country.clone()),
                    error: BuildError::UnsupportedLocale {
                        locale: locale.clone(),
                    },
                });
            }
        }

        let default_locale = if supported_set.contains(default_locale) {
            default_locale.to_string()
        } else {
            let replacement = supported.first().cloned().unwrap_or_default();
            warn!(
                requested = %default_locale,
                replacement = %replacement,
                "Default locale is not supported by the generator"
            );
            replacement
        };

        Self {
            dedicated,
            aliases,
            configured: BTreeMap::new(),
            supported: supported.iter().cloned().collect(),
            default_locale,
            skipped,
        }
    }

    /// Resolver for the countries a dataset build with `dataset` writes
    pub fn for_dataset(
        tables: &LocaleTables,
        supported: &[String],
        dataset: &DatasetConfig,
    ) -> Self {
        Self::new(tables, supported, &dataset.default_locale)
            .with_configured_countries(&tables.overrides, &dataset.extra_countries)
    }

    /// Register countries that have corpora without an alias or dedicated
    /// locale: curated overrides keep their own locale when the generator
    /// supports it, extra countries use the default locale.
    pub fn with_configured_countries(
        mut self,
        overrides: &[LocaleEntry],
        extra_countries: &[String],
    ) -> Self {
        let entries = overrides
            .iter()
            .map(|entry| (entry.country.as_str(), Some(entry.locale.as_str())))
            .chain(extra_countries.iter().map(|country| (country.as_str(), None)));

        for (country, locale) in entries {
            let slug = country_slug(country);
            let known = self.aliases.contains_key(&slug) || self.dedicated.contains_key(&slug);
            if slug.is_empty() || known {
                continue;
            }
            let locale = locale
                .filter(|l| self.supported.contains(*l))
                .unwrap_or(&self.default_locale)
                .to_string();
            self.configured.insert(slug, locale);
        }
        self
    }

    /// Resolve a country name: alias first, then dedicated locale, then the default
    pub fn resolve(&self, country: &str) -> LocaleResolution {
        let slug = country_slug(country);
        if let Some(locale) = self.aliases.get(&slug) {
            return LocaleResolution {
                locale: locale.clone(),
                source: LocaleSource::Alias,
            };
        }
        if let Some(locale) = self.dedicated.get(&slug) {
            return LocaleResolution {
                locale: locale.clone(),
                source: LocaleSource::Dedicated,
            };
        }
        if let Some(locale) = self.configured.get(&slug) {
            return LocaleResolution {
                locale: locale.clone(),
                source: LocaleSource::Configured,
            };
        }
        LocaleResolution {
            locale: self.default_locale.clone(),
            source: LocaleSource::Fallback,
        }
    }

    /// True when the country resolves without the generic fallback
    pub fn is_known(&self, country: &str) -> bool {
        self.resolve(country).source != LocaleSource::Fallback
    }

    /// Every country with a dedicated or alias locale; aliases win on conflict
    pub fn planned_countries(&self) -> BTreeMap<String, String> {
        let mut plan = self.dedicated.clone();
        plan.extend(self.aliases.iter().map(|(c, l)| (c.clone(), l.clone())));
        plan
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn skipped(&self) -> &[SkippedLocale] {
        &self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supported() -> Vec<String> {
        BUILTIN_POOLS.iter().map(|p| p.code.to_string()).collect()
    }

    #[test]
    fn test_country_for_locale() {
        let tables = LocaleTables::builtin();
        assert_eq!(tables.country_for_locale("ja_JP"), Ok("japan".to_string()));
        assert_eq!(
            tables.country_for_locale("en_US"),
            Ok("united_states".to_string())
        );
        assert!(tables.country_for_locale("xx").is_err());
        assert!(tables.country_for_locale("xx_ZZ").is_err());
    }

    #[test]
    fn test_resolution_chain() {
        let resolver = LocaleResolver::new(&LocaleTables::builtin(), &supported(), "en_US");

        let japan = resolver.resolve("Japan");
        assert_eq!(japan.locale, "ja_JP");
        assert_eq!(japan.source, LocaleSource::Dedicated);

        let bangladesh = resolver.resolve("Bangladesh");
        assert_eq!(bangladesh.locale, "en_IN");
        assert_eq!(bangladesh.source, LocaleSource::Alias);

        let atlantis = resolver.resolve("Atlantis");
        assert_eq!(atlantis.locale, "en_US");
        assert_eq!(atlantis.source, LocaleSource::Fallback);
        assert!(!resolver.is_known("Atlantis"));
        assert!(resolver.is_known("New Zealand"));
    }

    #[test]
    fn test_unsupported_alias_is_skipped() {
        let mut tables = LocaleTables::builtin();
        tables
            .aliases
            .insert("atlantis".to_string(), "at_AT".to_string());
        let resolver = LocaleResolver::new(&tables, &supported(), "en_US");

        assert_eq!(resolver.resolve("Atlantis").source, LocaleSource::Fallback);
        assert!(resolver
            .skipped()
            .iter()
            .any(|s| s.country.as_deref() == Some("atlantis")));
    }

    #[test]
    fn test_dataset_countries_are_known() {
        let mut tables = LocaleTables::builtin();
        tables.overrides.push(LocaleEntry {
            country: "Wakanda".to_string(),
            locale: "fr_FR".to_string(),
            male_first: None,
            female_first: None,
            last: vec!["Udaku".to_string()],
        });
        let dataset = DatasetConfig {
            extra_countries: vec!["Atlantis".to_string(), "Japan".to_string()],
            default_locale: "de_DE".to_string(),
            ..DatasetConfig::default()
        };
        let resolver = LocaleResolver::for_dataset(&tables, &supported(), &dataset);

        let atlantis = resolver.resolve("Atlantis");
        assert_eq!(atlantis.locale, "de_DE");
        assert_eq!(atlantis.source, LocaleSource::Configured);
        assert!(resolver.is_known("atlantis"));

        assert_eq!(resolver.resolve("Wakanda").locale, "fr_FR");
        assert_eq!(resolver.resolve("Japan").source, LocaleSource::Dedicated);
        assert_eq!(resolver.resolve("Lemuria").locale, "de_DE");
        assert!(!resolver.is_known("Lemuria"));
        assert!(!resolver.planned_countries().contains_key("atlantis"));
    }

    #[test]
    fn test_builtin_pools_have_known_regions() {
        let resolver = LocaleResolver::new(&LocaleTables::builtin(), &supported(), "en_US");
        assert!(resolver.skipped().is_empty());
        assert_eq!(resolver.planned_countries().len(), BUILTIN_POOLS.len() + ALIASES.len());
    }
}
