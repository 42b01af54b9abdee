//! Generates random chess games and reports, for each target length, the game
//! whose half-move count is closest to it.
//!
//! ```bash
//! # Defaults: 10000 seeds, targets 10,25,50,100,250,500,750
//! cargo run --release
//!
//! # Smaller search with custom targets and paths
//! cargo run --release -- --games 1500 --targets 10,25,50 --storage runs/storage.txt
//! ```
//!
//! Set `CHESS_LOG=warn` to silence per-game progress.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chess_random_games::chess::{self, config};
use chess_random_games::{Config, ShakmatyEngine};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Random chess games closest to a set of target lengths"
)]
struct Cli {
    /// Number of seeds to explore (games 0..N)
    #[arg(long, default_value_t = config::DEFAULT_SEARCH_BUDGET)]
    games: u64,

    /// Target half-move counts, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = config::DEFAULT_TARGETS)]
    targets: Vec<u32>,

    /// Append-only move log used to resume earlier runs
    #[arg(long, default_value = config::DEFAULT_STORAGE_PATH)]
    storage: PathBuf,

    /// Result file (default: ./generated_<games>.txt)
    #[arg(long)]
    output: Option<PathBuf>,
}

fn try_main(cli: Cli) -> Result<()> {
    let config = Config::new(cli.games, cli.targets, cli.storage, cli.output)
        .context("invalid configuration")?;

    let summary = chess::run(&config, &ShakmatyEngine).with_context(|| {
        format!(
            "run aborted (storage '{}')",
            config.storage_path.display()
        )
    })?;

    log::info!(
        "Done: {} games loaded, {} generated, {} targets reported",
        summary.loaded,
        summary.generated,
        summary.report.entries.len()
    );
    Ok(())
}

fn main() -> ExitCode {
    chess::log::init();
    let cli = Cli::parse();

    match try_main(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
