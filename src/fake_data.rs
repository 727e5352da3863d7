//! # Fake Data Module
//!
//! Person records for the fake-data flow. Each requested field name maps
//! through the [`Field`] table to one generator; names that are not in the
//! table become [`Field::Unsupported`] and render as `N/A`.
//!
//! Names come from the synthetic [`NameGenerator`] configured with the
//! country's resolved locale, so they match the corpus flavour. Addresses,
//! phones, jobs and companies come from the `fake` crate's English providers.

use fake::faker::address::en::{BuildingNumber, CityName, StateName, StreetName, ZipCode};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::FreeEmailProvider;
use fake::faker::job::en::Title;
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::rngs::StdRng;
use rand::Rng;
use tracing::warn;
use uuid::Uuid;

use crate::dialogue::Gender;
use crate::errors::InputError;
use crate::locale_tables::LocaleResolver;
use crate::name_generator::NameGenerator;
use crate::text_normalization::{title_case, to_ascii};

pub const UNSUPPORTED_VALUE: &str = "N/A";

/// Field set used when the flow does not ask for fields
pub const DEFAULT_FIELDS: [Field; 6] = [
    Field::FullName,
    Field::Age,
    Field::City,
    Field::Email,
    Field::Phone,
    Field::Country,
];

/// A requested record attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    FullName,
    Username,
    Age,
    Gender,
    City,
    State,
    Country,
    PostalCode,
    Address,
    Phone,
    Email,
    Job,
    Company,
    Uuid,
    Unsupported(String),
}

impl Field {
    /// Parse a field name; spaces and hyphens are read as underscores
    pub fn parse(name: &str) -> Field {
        let key = name.trim().to_lowercase().replace([' ', '-'], "_");
        match key.as_str() {
            "first_name" => Field::FirstName,
            "last_name" => Field::LastName,
            "full_name" | "name" => Field::FullName,
            "username" => Field::Username,
            "age" => Field::Age,
            "gender" => Field::Gender,
            "city" => Field::City,
            "state" => Field::State,
            "country" => Field::Country,
            "postal_code" | "zip" | "zipcode" => Field::PostalCode,
            "address" => Field::Address,
            "phone" | "phone_number" => Field::Phone,
            "email" => Field::Email,
            "job" => Field::Job,
            "company" => Field::Company,
            "uuid" => Field::Uuid,
            _ => Field::Unsupported(key),
        }
    }

    /// Key printed before the value
    pub fn key(&self) -> &str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::FullName => "full_name",
            Field::Username => "username",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::City => "city",
            Field::State => "state",
            Field::Country => "country",
            Field::PostalCode => "postal_code",
            Field::Address => "address",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Job => "job",
            Field::Company => "company",
            Field::Uuid => "uuid",
            Field::Unsupported(name) => name,
        }
    }
}

/// Parse a comma-separated field list into an ordered set
pub fn parse_field_list(input: &str) -> Result<Vec<Field>, InputError> {
    let mut fields: Vec<Field> = Vec::new();
    for field in input
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(Field::parse)
    {
        if !fields.contains(&field) {
            fields.push(field);
        }
    }

    if fields.is_empty() {
        return Err(InputError::EmptyFields);
    }
    Ok(fields)
}

/// One generated record, values in requested field order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeRecord {
    pub values: Vec<(String, String)>,
}

impl FakeRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// `key: value, key: value`
    pub fn render(&self) -> String {
        self.values
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// The person behind a record; every name field of a record agrees
struct Person {
    first: String,
    last: String,
    gender: Gender,
}

pub struct FakeDataGenerator<'a, G: NameGenerator> {
    generator: &'a G,
    resolver: &'a LocaleResolver,
}

impl<'a, G: NameGenerator> FakeDataGenerator<'a, G> {
    pub fn new(generator: &'a G, resolver: &'a LocaleResolver) -> Self {
        Self {
            generator,
            resolver,
        }
    }

    /// Generate `count` records for the country
    pub fn generate(
        &self,
        country: &str,
        gender: Gender,
        count: usize,
        fields: &[Field],
        rng: &mut StdRng,
    ) -> Vec<FakeRecord> {
        let locale = self.resolver.resolve(country).locale;
        let country_name = title_case(country);

        (0..count)
            .map(|_| {
                let person = self.person(&locale, gender, rng);
                FakeRecord {
                    values: fields
                        .iter()
                        .map(|field| {
                            let value = field_value(field, &person, &country_name, rng);
                            (field.key().to_string(), value)
                        })
                        .collect(),
                }
            })
            .collect()
    }

    fn person(&self, locale: &str, gender: Gender, rng: &mut StdRng) -> Person {
        let gender = match gender {
            Gender::Mixed if rng.gen_bool(0.5) => Gender::Male,
            Gender::Mixed => Gender::Female,
            other => other,
        };

        let first = self.generator.first_name(locale, gender, rng);
        let last = self.generator.last_name(locale, rng);
        match (first, last) {
            (Ok(first), Ok(last)) => Person {
                first: to_ascii(&first),
                last: to_ascii(&last),
                gender,
            },
            (Err(e), _) | (_, Err(e)) => {
                warn!(locale = %locale, error = %e, "Name generation failed for fake record");
                Person {
                    first: UNSUPPORTED_VALUE.to_string(),
                    last: UNSUPPORTED_VALUE.to_string(),
                    gender,
                }
            }
        }
    }
}

fn field_value(field: &Field, person: &Person, country: &str, rng: &mut StdRng) -> String {
    let handle = || {
        format!("{}{}", person.first, person.last)
            .to_lowercase()
            .replace(' ', "")
    };

    match field {
        Field::FirstName => person.first.clone(),
        Field::LastName => person.last.clone(),
        Field::FullName => format!("{} {}", person.first, person.last),
        Field::Username => format!("{}{}", handle(), rng.gen_range(1..1000)),
        Field::Age => rng.gen_range(18..=65u32).to_string(),
        Field::Gender => person.gender.label().to_string(),
        Field::City => CityName().fake(),
        Field::State => StateName().fake(),
        Field::Country => country.to_string(),
        Field::PostalCode => ZipCode().fake(),
        Field::Address => {
            let number: String = BuildingNumber().fake();
            let street: String = StreetName().fake();
            format!("{number} {street}")
        }
        Field::Phone => PhoneNumber().fake(),
        Field::Email => {
            let provider: String = FreeEmailProvider().fake();
            format!(
                "{}.{}@{provider}",
                person.first.to_lowercase().replace(' ', ""),
                person.last.to_lowercase().replace(' ', "")
            )
        }
        Field::Job => Title().fake(),
        Field::Company => CompanyName().fake(),
        Field::Uuid => Uuid::new_v4().to_string(),
        Field::Unsupported(_) => UNSUPPORTED_VALUE.to_string(),
    }
}
