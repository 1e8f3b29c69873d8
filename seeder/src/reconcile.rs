//! Additive reconciliation of the `monitor` table against the catalogue.
//!
//! Each definition is keyed by its full URL. A definition whose URL already
//! has a row is skipped; anything else is inserted. Existing rows are never
//! updated, so a second run with no clear in between inserts nothing.

use crate::catalogue::Catalogue;
use crate::config::SeederConfig;
use crate::error::SeedError;
use crate::store::MonitorStore;
use crate::types::{monitor_url, MonitorDefinition, NewMonitor};
use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedAction {
    Inserted,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    pub name: &'static str,
    pub url: String,
    pub monitor_id: i64,
    pub action: SeedAction,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedStats {
    pub inserted: usize,
    pub skipped: usize,
    /// Rows in the table after seeding, seeded or not.
    pub total: u64,
}

/// Processes the catalogue in order, reporting each outcome as it happens.
///
/// Stops at the first failing definition with [`SeedError::Interrupted`];
/// rows inserted before it are left in place.
pub fn seed(
    store: &MonitorStore,
    catalogue: Catalogue<'_>,
    config: &SeederConfig,
    mut on_outcome: impl FnMut(&SeedOutcome),
) -> Result<SeedStats> {
    let mut stats = SeedStats::default();
    let mut inserted_names: Vec<String> = Vec::new();

    for def in catalogue.iter() {
        let outcome = seed_one(store, def, config).map_err(|source| SeedError::Interrupted {
            definition: def.name.to_string(),
            inserted: inserted_names.clone(),
            source,
        })?;

        match outcome.action {
            SeedAction::Inserted => {
                stats.inserted += 1;
                inserted_names.push(def.name.to_string());
            }
            SeedAction::Skipped => stats.skipped += 1,
        }
        on_outcome(&outcome);
    }

    stats.total = store.count().context("count monitors after seeding")?;
    info!(
        inserted = stats.inserted,
        skipped = stats.skipped,
        total = stats.total,
        "seed finished"
    );
    Ok(stats)
}

fn seed_one(
    store: &MonitorStore,
    def: &MonitorDefinition,
    config: &SeederConfig,
) -> Result<SeedOutcome> {
    let url = monitor_url(&config.base_url, def.path);

    if let Some(id) = store.find_by_url(&url)? {
        debug!(name = def.name, %url, id, "monitor already present");
        return Ok(SeedOutcome {
            name: def.name,
            url,
            monitor_id: id,
            action: SeedAction::Skipped,
        });
    }

    let row = NewMonitor::from_definition(
        def,
        &config.base_url,
        config.owner_id,
        config.default_timeout_secs,
        Utc::now(),
    );
    let id = store.insert(&row)?;
    debug!(name = def.name, %url, id, "monitor inserted");

    Ok(SeedOutcome {
        name: def.name,
        url,
        monitor_id: id,
        action: SeedAction::Inserted,
    })
}
