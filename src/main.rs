use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{info, warn};

use namegen_bot::bot::{self, SessionMachine};
use namegen_bot::config::BotConfig;
use namegen_bot::corpus::CorpusStore;
use namegen_bot::dataset_builder::DatasetBuilder;
use namegen_bot::locale_tables::LocaleTables;
use namegen_bot::localization::init_localization;
use namegen_bot::logging::init_tracing;
use namegen_bot::name_generator::LocaleNameGenerator;
use namegen_bot::session_store::InMemSessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_tracing()?;
    info!("Starting Name Generator Telegram Bot");

    let config = BotConfig::from_env()?;
    let bot_token = config.require_token()?.to_string();

    init_localization().context("Failed to load localization resources")?;

    let mut tables = LocaleTables::builtin();
    if let Some(path) = &config.dataset.overrides_path {
        tables = tables.with_overrides(LocaleTables::load_overrides(path)?);
    }

    let store = CorpusStore::new(&config.names_dir);
    if !store.exists() {
        info!(names_dir = %config.names_dir.display(), "Names directory missing, building dataset");
        let builder = DatasetBuilder::new(
            LocaleNameGenerator::builtin(),
            tables.clone(),
            config.dataset.clone(),
            store.clone(),
        );
        let summary = tokio::task::spawn_blocking(move || builder.build())
            .await
            .context("Dataset build task failed")?;
        if !summary.is_clean() {
            warn!(skipped = summary.skipped.len(), "Dataset built with skipped corpora");
        }
    }

    let machine = Arc::new(SessionMachine::with_dataset(
        InMemSessionStore::new(),
        store,
        config.dialogue.clone(),
        &tables,
        &config.dataset,
    ));

    // Initialize the bot
    let bot = Bot::new(bot_token);

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry().branch(Update::filter_message().endpoint(bot::message_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![machine])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
