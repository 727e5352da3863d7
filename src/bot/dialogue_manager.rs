//! Dialogue Manager module: the per-user session state machine.
//!
//! [`SessionMachine::handle`] classifies each inbound text once, then:
//!
//! 1. navigation commands reset the session and show a menu
//! 2. flow triggers replace any session with a fresh one at the country step
//! 3. everything else is dispatched strictly by the session's current step
//!
//! Store reads and writes for one message happen before the first `.await`,
//! so a handler never observes a session half-updated by itself.

use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::{DatasetConfig, DialogueConfig, MAX_COUNT};
use crate::corpus::CorpusStore;
use crate::dialogue::{
    parse_count, parse_gender, validate_country, Command, FlowKind, Gender, Navigation, Session,
    Step,
};
use crate::errors::{CorpusError, InputError};
use crate::fake_data::{parse_field_list, FakeDataGenerator, Field, DEFAULT_FIELDS};
use crate::locale_tables::{LocaleResolver, LocaleTables};
use crate::name_generator::{LocaleNameGenerator, NameGenerator};
use crate::output_router::{NamesDelivery, OutputRouter, RecordsDelivery};
use crate::sampling::SamplingEngine;
use crate::session_store::{SessionStore, UserId};

/// Result of a name generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamesResult {
    pub country: String,
    pub gender: Gender,
    pub requested: u32,
    /// Names actually produced; below `requested` when the corpus ran out
    pub produced: usize,
    pub delivery: NamesDelivery,
}

/// Result of a fake-data generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeDataResult {
    pub country: String,
    pub count: u32,
    pub delivery: RecordsDelivery,
}

/// What the bot should tell the user after one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Welcome,
    Help,
    MainMenu,
    AskCountry { flow: FlowKind },
    AskGender { flow: FlowKind, country: String },
    AskCount { flow: FlowKind, gender: Gender },
    AskFields,
    /// Re-prompt at the same step
    Invalid { error: InputError, step: Step },
    /// Unrecognized input while idle
    ChooseOption,
    Names(NamesResult),
    FakeData(FakeDataResult),
    /// Flow ended without a corpus; the session is gone
    CorpusNotFound(CorpusError),
}

impl Action {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Action::Welcome => "welcome",
            Action::Help => "help",
            Action::MainMenu => "main_menu",
            Action::AskCountry { .. } => "ask_country",
            Action::AskGender { .. } => "ask_gender",
            Action::AskCount { .. } => "ask_count",
            Action::AskFields => "ask_fields",
            Action::Invalid { .. } => "invalid_input",
            Action::ChooseOption => "choose_option",
            Action::Names(_) => "names",
            Action::FakeData(_) => "fake_data",
            Action::CorpusNotFound(_) => "corpus_not_found",
        }
    }
}

/// Per-user dialogue driver over an injected session store
pub struct SessionMachine<S: SessionStore> {
    store: S,
    corpus: CorpusStore,
    config: DialogueConfig,
    sampler: SamplingEngine,
    router: OutputRouter,
    generator: LocaleNameGenerator,
    resolver: LocaleResolver,
    rng: Mutex<StdRng>,
}

impl<S: SessionStore> SessionMachine<S> {
    /// Machine over the built-in locale tables and the default dataset settings
    pub fn new(store: S, corpus: CorpusStore, config: DialogueConfig) -> Self {
        Self::with_dataset(
            store,
            corpus,
            config,
            &LocaleTables::builtin(),
            &DatasetConfig::default(),
        )
    }

    /// Machine whose country knowledge matches a dataset built from `tables`
    /// and `dataset`: extra countries and curated overrides count as known,
    /// and the dataset's default locale backs unknown countries.
    pub fn with_dataset(
        store: S,
        corpus: CorpusStore,
        mut config: DialogueConfig,
        tables: &LocaleTables,
        dataset: &DatasetConfig,
    ) -> Self {
        config.max_count = config.max_count.clamp(1, MAX_COUNT);
        let generator = LocaleNameGenerator::builtin();
        let resolver = LocaleResolver::for_dataset(tables, &generator.locales(), dataset);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            store,
            corpus,
            sampler: SamplingEngine::new(config.max_count),
            router: OutputRouter::new(config.inline_threshold),
            config,
            generator,
            resolver,
            rng: Mutex::new(rng),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &DialogueConfig {
        &self.config
    }

    /// Handle one inbound text from `user`
    pub async fn handle(&self, user: UserId, text: &str) -> Action {
        match Command::classify(text) {
            Command::Navigation(navigation) => {
                self.store.delete(user);
                debug!(user_id = %user, navigation = ?navigation, "Session reset");
                match navigation {
                    Navigation::Start => Action::Welcome,
                    Navigation::Help => Action::Help,
                    Navigation::MainMenu => Action::MainMenu,
                }
            }
            Command::FlowTrigger(flow) => {
                if self.store.get(user).is_some() {
                    debug!(user_id = %user, "Discarding in-progress session");
                }
                self.store.set(user, Session::start(flow));
                debug!(user_id = %user, flow = ?flow, "Flow started");
                Action::AskCountry { flow }
            }
            Command::StepInput(input) => match self.store.get(user) {
                Some(session) => self.handle_step(user, session, &input).await,
                None => Action::ChooseOption,
            },
        }
    }

    async fn handle_step(&self, user: UserId, session: Session, input: &str) -> Action {
        let step = session.step;
        match step {
            Step::AwaitCountry => match self.accept_country(input) {
                Ok(country) => {
                    let flow = session.flow;
                    self.store.set(user, session.with_country(country.clone()));
                    debug!(user_id = %user, country = %country, "Country accepted");
                    Action::AskGender { flow, country }
                }
                Err(error) => Action::Invalid { error, step },
            },
            Step::AwaitGender => match parse_gender(input) {
                Ok(gender) => {
                    let flow = session.flow;
                    self.store.set(user, session.with_gender(gender));
                    debug!(user_id = %user, gender = gender.as_str(), "Gender accepted");
                    Action::AskCount { flow, gender }
                }
                Err(error) => Action::Invalid { error, step },
            },
            Step::AwaitCount => match parse_count(input, self.config.max_count) {
                Ok(count) => {
                    let ask_fields = session.flow == FlowKind::FakeData && self.config.ask_fields;
                    let session = session.with_count(count, ask_fields);
                    if ask_fields {
                        self.store.set(user, session);
                        return Action::AskFields;
                    }
                    self.store.delete(user);
                    self.generate(user, session).await
                }
                Err(error) => Action::Invalid { error, step },
            },
            Step::AwaitFields => match parse_field_list(input) {
                Ok(fields) => {
                    let keys = fields.iter().map(|f| f.key().to_string()).collect();
                    self.store.delete(user);
                    self.generate(user, session.with_fields(keys)).await
                }
                Err(error) => Action::Invalid { error, step },
            },
            Step::Idle | Step::Done => Action::ChooseOption,
        }
    }

    fn accept_country(&self, input: &str) -> Result<String, InputError> {
        let country = validate_country(input)?;
        if self.config.strict_countries && !self.resolver.is_known(&country) {
            return Err(InputError::UnknownCountry(country));
        }
        Ok(country)
    }

    /// Terminal step; the session has already been removed
    async fn generate(&self, user: UserId, session: Session) -> Action {
        let (Some(country), Some(gender), Some(count)) =
            (session.country.clone(), session.gender, session.count)
        else {
            warn!(user_id = %user, "Incomplete session reached generation");
            return Action::ChooseOption;
        };

        match session.flow {
            FlowKind::Names => self.generate_names(user, country, gender, count).await,
            FlowKind::FakeData => self.generate_fake_data(user, &session, country, gender, count),
        }
    }

    async fn generate_names(
        &self,
        user: UserId,
        country: String,
        gender: Gender,
        count: u32,
    ) -> Action {
        let corpus = match self.corpus.resolve(&country, gender).await {
            Ok(corpus) => corpus,
            Err(error) => {
                warn!(user_id = %user, country = %country, error = %error, "Corpus not found");
                return Action::CorpusNotFound(error);
            }
        };

        let names = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.sampler.sample(&corpus, count, &mut rng)
        };
        // The session is gone, so a rejected count ends the flow
        let names = match names {
            Ok(names) => names,
            Err(error) => {
                warn!(user_id = %user, count, error = %error, "Sampler rejected count");
                return Action::ChooseOption;
            }
        };

        let produced = names.len();
        info!(
            user_id = %user,
            country = %country,
            gender = gender.as_str(),
            requested = count,
            produced,
            "Names generated"
        );

        let display = session_display(&country);
        Action::Names(NamesResult {
            delivery: self
                .router
                .route_names(&display, gender, count as usize, names),
            country: display,
            gender,
            requested: count,
            produced,
        })
    }

    fn generate_fake_data(
        &self,
        user: UserId,
        session: &Session,
        country: String,
        gender: Gender,
        count: u32,
    ) -> Action {
        let fields: Vec<Field> = if session.fields.is_empty() {
            DEFAULT_FIELDS.to_vec()
        } else {
            session.fields.iter().map(|f| Field::parse(f)).collect()
        };

        let records = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            FakeDataGenerator::new(&self.generator, &self.resolver).generate(
                &country,
                gender,
                count as usize,
                &fields,
                &mut rng,
            )
        };

        info!(
            user_id = %user,
            country = %country,
            records = records.len(),
            fields = fields.len(),
            "Fake data generated"
        );

        let display = session_display(&country);
        Action::FakeData(FakeDataResult {
            delivery: self.router.route_records(&display, count as usize, &records),
            country: display,
            count,
        })
    }
}

fn session_display(country: &str) -> String {
    crate::text_normalization::title_case(country)
}
