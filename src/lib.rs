pub mod chess;

pub use chess::{
    Config, FullGame, GameRecord, GameStatus, MoveLogStore, Report, ReportEntry, Reporter,
    RulesEngine, RunSummary, ShakmatyEngine, StubGame, TargetTable, generate, run,
};
