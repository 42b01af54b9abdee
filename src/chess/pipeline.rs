//! Load, generate, report.
//!
//! Fatal: move log corruption or read errors, torn appends and engine
//! failures. Everything else is logged and the run carries on.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::config::Config;
use super::engine::RulesEngine;
use super::error::{RunError, StoreError};
use super::generator::generate;
use super::report::{Report, Reporter};
use super::selector::TargetTable;
use super::store::MoveLogStore;
use super::types::GameRecord;

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Games read back from the move log.
    pub loaded: u64,
    /// Games generated during this run.
    pub generated: u64,
    pub report: Report,
}

pub fn run<E: RulesEngine>(config: &Config, engine: &E) -> Result<RunSummary, RunError> {
    let mut table = TargetTable::new(config.targets.iter().copied());

    let mut store = match MoveLogStore::open(&config.storage_path) {
        Ok(store) => Some(store),
        Err(e) => {
            log::error!("Error opening/creating storage file: {e}");
            None
        }
    };

    let loaded = match &store {
        Some(store) => load(store, config.search_budget, &mut table)?,
        None => 0,
    };
    if loaded > 0 {
        log::info!("Loaded {loaded} games from storage");
    }

    let generated = generate_remaining(
        engine,
        store.as_mut(),
        loaded..config.search_budget,
        &mut table,
    )?;

    let report = write_results(engine, &table, &config.result_path)?;

    Ok(RunSummary {
        loaded,
        generated,
        report,
    })
}

fn load(
    store: &MoveLogStore,
    search_budget: u64,
    table: &mut TargetTable,
) -> Result<u64, StoreError> {
    let mut scan = store.scan()?;
    while scan.scanned() < search_budget {
        let Some(item) = scan.next() else {
            break;
        };
        let stub = item.inspect_err(|e| {
            log::error!("{e}");
            log::error!(
                "Storage file \"{}\" is corrupt. Repair or remove it and restart.",
                store.path().display()
            );
        })?;
        table.consider(&GameRecord::Stub(stub));
    }
    Ok(scan.scanned())
}

fn generate_remaining<E: RulesEngine>(
    engine: &E,
    mut store: Option<&mut MoveLogStore>,
    seeds: std::ops::Range<u64>,
    table: &mut TargetTable,
) -> Result<u64, RunError> {
    let mut generated = 0;
    for seed in seeds {
        log::info!("Generating game with seed #{seed}");
        let game = generate(engine, seed)?;
        log::info!(
            "Game status after {} half-moves: {}",
            game.half_moves(),
            game.status
        );

        if let Some(store) = store.as_deref_mut() {
            match store.append(&game) {
                Ok(()) => {}
                Err(e @ StoreError::Sync { .. }) => log::warn!("{e}"),
                Err(e) => return Err(e.into()),
            }
        }

        table.consider(&GameRecord::Full(game));
        generated += 1;
    }
    Ok(generated)
}

fn write_results<E: RulesEngine>(
    engine: &E,
    table: &TargetTable,
    path: &Path,
) -> Result<Report, RunError> {
    let mut out = match File::create(path) {
        Ok(file) => {
            log::info!("Writing results to: {}", path.display());
            Some(BufWriter::new(file))
        }
        Err(e) => {
            log::error!("Error creating result file '{}': {e}", path.display());
            None
        }
    };

    let report = Reporter::new(engine).write_report(table, out.as_mut())?;
    if !report.warnings.is_empty() {
        log::warn!(
            "Report finished with {} warning(s): {}",
            report.warnings.len(),
            report.warnings.join("; ")
        );
    }
    Ok(report)
}
