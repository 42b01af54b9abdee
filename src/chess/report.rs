//! Final report: one literal block per target length.
//!
//! ```text
//! {
//! 	"Random-game-#17_half-moves-24_target-25", "",
//! 	["e4", "e5", ...],
//! },
//! ```

use std::io::Write;

use super::engine::RulesEngine;
use super::error::GenerateError;
use super::generator::generate;
use super::selector::TargetTable;
use super::types::GameRecord;

/// Fully materialised selection for one target length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub target: u32,
    pub seed: u64,
    pub moves: Vec<String>,
}

impl ReportEntry {
    pub fn half_moves(&self) -> usize {
        self.moves.len()
    }

    pub fn render(&self) -> String {
        let moves: Vec<String> = self.moves.iter().map(|san| format!("{san:?}")).collect();
        format!(
            "{{\n\t\"Random-game-#{}_half-moves-{}_target-{}\", \"\",\n\t[{}],\n}},\n",
            self.seed,
            self.half_moves(),
            self.target,
            moves.join(", ")
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    /// Non-fatal problems met while building the report.
    pub warnings: Vec<String>,
}

pub struct Reporter<'a, E> {
    engine: &'a E,
}

impl<'a, E: RulesEngine> Reporter<'a, E> {
    pub fn new(engine: &'a E) -> Self {
        Self { engine }
    }

    /// Materialises the full move list of `record`, replaying stubs from their
    /// seed. Stored moves that disagree with the replay are reported through
    /// `warnings`; the replayed moves win.
    pub fn resolve(
        &self,
        target: u32,
        record: &GameRecord,
        warnings: &mut Vec<String>,
    ) -> Result<ReportEntry, GenerateError> {
        let moves = match record {
            GameRecord::Full(game) => game.moves.clone(),
            GameRecord::Stub(stub) => {
                let game = generate(self.engine, stub.seed)?;
                if !stub.moves.is_empty() && stub.moves != game.moves {
                    log::warn!("Storage moves:   {}", stub.moves.join(" "));
                    log::warn!("Generated moves: {}", game.moves.join(" "));
                    let msg = format!(
                        "moves for game #{} loaded from storage are not equal to generated moves",
                        stub.seed
                    );
                    log::warn!("{msg}");
                    warnings.push(msg);
                }
                game.moves
            }
        };

        Ok(ReportEntry {
            target,
            seed: record.seed(),
            moves,
        })
    }

    /// Resolves every target in ascending order and writes its block to `out`.
    ///
    /// `out` may be `None` when the result file could not be created; entries
    /// are still resolved and logged. Write failures are logged per target.
    pub fn write_report<W: Write>(
        &self,
        table: &TargetTable,
        mut out: Option<&mut W>,
    ) -> Result<Report, GenerateError> {
        let mut warnings = Vec::new();
        let mut entries = Vec::with_capacity(table.len());

        for (target, best) in table.iter() {
            let Some(best) = best else {
                let msg = format!("no game available for target length {target}");
                log::warn!("{msg}");
                warnings.push(msg);
                continue;
            };

            let entry = self.resolve(target, &best.record, &mut warnings)?;
            log::info!(
                "Target length: {} | Random game #{} | half moves: {}",
                target,
                entry.seed,
                entry.half_moves()
            );

            if let Some(writer) = out.as_deref_mut()
                && let Err(e) = writer.write_all(entry.render().as_bytes())
            {
                let msg = format!("failed to write result for target length {target}: {e}");
                log::error!("{msg}");
                warnings.push(msg);
            }
            entries.push(entry);
        }

        if let Some(writer) = out.as_deref_mut()
            && let Err(e) = writer.flush()
        {
            let msg = format!("failed to flush result file: {e}");
            log::error!("{msg}");
            warnings.push(msg);
        }

        Ok(Report { entries, warnings })
    }
}
