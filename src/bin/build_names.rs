//! One-shot dataset build: writes every corpus file under `NAMES_DIR`.

use anyhow::Result;
use tracing::{info, warn};

use namegen_bot::config::BotConfig;
use namegen_bot::corpus::CorpusStore;
use namegen_bot::dataset_builder::DatasetBuilder;
use namegen_bot::locale_tables::LocaleTables;
use namegen_bot::logging::init_tracing;
use namegen_bot::name_generator::LocaleNameGenerator;

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing()?;

    let config = BotConfig::from_env()?;
    let mut tables = LocaleTables::builtin();
    if let Some(path) = &config.dataset.overrides_path {
        tables = tables.with_overrides(LocaleTables::load_overrides(path)?);
    }

    let builder = DatasetBuilder::new(
        LocaleNameGenerator::builtin(),
        tables,
        config.dataset.clone(),
        CorpusStore::new(&config.names_dir),
    );
    let summary = builder.build();

    for skipped in &summary.skipped {
        warn!(
            locale = %skipped.locale,
            country = skipped.country.as_deref().unwrap_or("-"),
            error = %skipped.error,
            "Skipped"
        );
    }
    info!(
        written = summary.written.len(),
        skipped = summary.skipped.len(),
        discarded = summary.discarded,
        names_dir = %config.names_dir.display(),
        "Done"
    );
    Ok(())
}
