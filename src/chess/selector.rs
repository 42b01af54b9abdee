use std::collections::BTreeMap;

use super::types::GameRecord;

/// Current best game for one target length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Best {
    pub record: GameRecord,
    pub distance: usize,
}

/// Closest-length selection over a stream of games.
///
/// Records must be fed in increasing seed order; on equal distance the record
/// seen first is kept.
#[derive(Debug, Clone, Default)]
pub struct TargetTable {
    entries: BTreeMap<u32, Option<Best>>,
}

impl TargetTable {
    pub fn new(targets: impl IntoIterator<Item = u32>) -> Self {
        Self {
            entries: targets.into_iter().map(|t| (t, None)).collect(),
        }
    }

    pub fn consider(&mut self, record: &GameRecord) {
        for (&target, slot) in self.entries.iter_mut() {
            let distance = record.distance_to(target);
            let better = match slot {
                None => true,
                Some(best) => distance < best.distance,
            };
            if better {
                *slot = Some(Best {
                    record: record.clone(),
                    distance,
                });
            }
        }
    }

    pub fn best(&self, target: u32) -> Option<&Best> {
        self.entries.get(&target).and_then(Option::as_ref)
    }

    /// Targets in ascending order with their current best, if any.
    pub fn iter(&self) -> impl Iterator<Item = (u32, Option<&Best>)> {
        self.entries.iter().map(|(&t, best)| (t, best.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
