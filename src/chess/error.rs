use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The rules engine refused a move it had itself listed as legal.
#[derive(Debug, Error)]
#[error("engine rejected move {mv}: {reason}")]
pub struct EngineError {
    pub mv: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("game #{seed}: move application failed at ply {ply}")]
    Engine {
        seed: u64,
        ply: usize,
        #[source]
        source: EngineError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorruptReason {
    /// The leading token is not a non-negative integer.
    BadLength(String),
    /// The declared length disagrees with the number of move tokens.
    LengthMismatch { declared: usize, actual: usize },
}

impl std::fmt::Display for CorruptReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadLength(token) => write!(f, "cannot parse move count '{token}'"),
            Self::LengthMismatch { declared, actual } => write!(
                f,
                "number of moves {declared} does not correspond to number of SAN moves {actual}"
            ),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open move log '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read move log line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
    #[error("move log line {line} (game #{seed}) is corrupt: {reason}")]
    Corrupt {
        line: usize,
        seed: u64,
        reason: CorruptReason,
    },
    #[error("failed to append game #{seed} to move log: {source}")]
    Write {
        seed: u64,
        #[source]
        source: io::Error,
    },
    #[error("failed to sync game #{seed} to disk: {source}")]
    Sync {
        seed: u64,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one target length is required")]
    NoTargets,
    #[error("target lengths must be positive")]
    ZeroTarget,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}
