pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod log;
pub mod pipeline;
pub mod report;
pub mod selector;
pub mod store;
pub mod types;

pub use config::Config;
pub use engine::{GameState, RulesEngine, ShakmatyEngine, ShakmatyGame};
pub use error::{
    ConfigError, CorruptReason, EngineError, GenerateError, RunError, StoreError,
};
pub use generator::generate;
pub use pipeline::{RunSummary, run};
pub use report::{Report, ReportEntry, Reporter};
pub use selector::{Best, TargetTable};
pub use store::{MoveLogStore, Scan, format_line};
pub use types::{FullGame, GameRecord, GameStatus, StubGame, Winner};
