use std::collections::BTreeSet;
use std::path::PathBuf;

use super::error::ConfigError;

pub const DEFAULT_SEARCH_BUDGET: u64 = 10_000;
pub const DEFAULT_TARGETS: [u32; 7] = [10, 25, 50, 100, 250, 500, 750];
pub const DEFAULT_STORAGE_PATH: &str = "./generateStorage.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Seeds `0..search_budget` are explored.
    pub search_budget: u64,
    pub targets: BTreeSet<u32>,
    pub storage_path: PathBuf,
    pub result_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_budget: DEFAULT_SEARCH_BUDGET,
            targets: DEFAULT_TARGETS.into_iter().collect(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            result_path: default_result_path(DEFAULT_SEARCH_BUDGET),
        }
    }
}

impl Config {
    pub fn new(
        search_budget: u64,
        targets: impl IntoIterator<Item = u32>,
        storage_path: impl Into<PathBuf>,
        result_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let targets: BTreeSet<u32> = targets.into_iter().collect();
        if targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        if targets.contains(&0) {
            return Err(ConfigError::ZeroTarget);
        }
        Ok(Self {
            search_budget,
            targets,
            storage_path: storage_path.into(),
            result_path: result_path.unwrap_or_else(|| default_result_path(search_budget)),
        })
    }
}

/// `./generated_<budget>.txt`
pub fn default_result_path(search_budget: u64) -> PathBuf {
    PathBuf::from(format!("./generated_{search_budget}.txt"))
}
