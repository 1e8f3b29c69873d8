//! One full seeder run: validate, open, optionally clear, seed, count.

use crate::catalogue::Catalogue;
use crate::config::SeederConfig;
use crate::error::SeedError;
use crate::purge;
use crate::reconcile::{self, SeedOutcome, SeedStats};
use crate::store::MonitorStore;
use crate::types::check_base_url;
use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    SeedOnly,
    /// Remove every monitor under the base URL first, then seed.
    ClearThenSeed,
}

impl RunMode {
    /// `--clear` and `--force` are aliases; either one selects a clean reseed.
    pub fn from_flags(clear: bool, force: bool) -> Self {
        if clear || force {
            RunMode::ClearThenSeed
        } else {
            RunMode::SeedOnly
        }
    }
}

/// Progress reported while a run is in flight.
#[derive(Debug)]
pub enum RunEvent<'a> {
    Cleared { deleted: usize },
    Seeded(&'a SeedOutcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub mode: RunMode,
    pub deleted: Option<usize>,
    pub seed: SeedStats,
    pub total: u64,
}

/// Runs the seeder against `config.db_path`.
///
/// The catalogue and base URL are checked before the database is touched, and the database
/// must already exist. The connection is held for the whole run and closed on
/// return, whether the run succeeded or not.
pub fn run(
    config: &SeederConfig,
    catalogue: Catalogue<'_>,
    mode: RunMode,
    mut on_event: impl FnMut(RunEvent<'_>),
) -> Result<RunReport> {
    catalogue.validate()?;
    check_base_url(&config.base_url).map_err(SeedError::InvalidBaseUrl)?;

    let store = MonitorStore::open(&config.db_path)?;
    info!(
        db = %config.db_path.display(),
        base_url = %config.base_url,
        ?mode,
        definitions = catalogue.len(),
        "starting seed run"
    );

    let deleted = match mode {
        RunMode::SeedOnly => None,
        RunMode::ClearThenSeed => {
            let deleted = purge::clear(&store, &config.base_url)
                .with_context(|| format!("clear monitors under {}", config.base_url))?;
            on_event(RunEvent::Cleared { deleted });
            Some(deleted)
        }
    };

    let seed = reconcile::seed(&store, catalogue, config, |outcome| {
        on_event(RunEvent::Seeded(outcome))
    })?;

    let total = store.count().context("count monitors for summary")?;

    Ok(RunReport {
        mode,
        deleted,
        seed,
        total,
    })
}
