use std::collections::HashSet;

use crate::catalog::{ArrivalRow, BlockPair};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchedRows {
    pub first: Vec<ArrivalRow>,
    pub second: Vec<ArrivalRow>,
}

/// Keeps only rows whose block pair was observed for both phases.
pub struct PhaseMatcher;

impl PhaseMatcher {
    pub fn shared_keys(first: &[ArrivalRow], second: &[ArrivalRow]) -> HashSet<BlockPair> {
        let second_keys: HashSet<BlockPair> = second.iter().map(ArrivalRow::key).collect();
        first
            .iter()
            .map(ArrivalRow::key)
            .filter(|key| second_keys.contains(key))
            .collect()
    }

    /// Filters both sets to the shared keys. Each side keeps its own input
    /// order; rows themselves are untouched.
    pub fn apply(mut first: Vec<ArrivalRow>, mut second: Vec<ArrivalRow>) -> MatchedRows {
        let shared = Self::shared_keys(&first, &second);
        first.retain(|row| shared.contains(&row.key()));
        second.retain(|row| shared.contains(&row.key()));
        MatchedRows { first, second }
    }
}
