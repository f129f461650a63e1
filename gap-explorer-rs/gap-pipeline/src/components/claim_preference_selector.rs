use std::collections::HashSet;

use crate::components::claimed_filter::ClaimedFilter;
use crate::filter::Filter;
use crate::types::GapCell;

/// Picks up to `n` cells with distinct sub-categories, claimed cells first.
///
/// Two passes:
/// 1. `ClaimedFilter` partitions the candidates into claimed and unclaimed,
///    each in table order.
/// 2. Claimed cells fill the `n` slots first, unclaimed cells fill what is
///    left; the result is then deduplicated by sub_category (first wins)
///    and truncated to `n`.
pub struct ClaimPreferenceSelector {
    pub n: usize,
}

impl ClaimPreferenceSelector {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    pub fn select<'a>(&self, candidates: Vec<&'a GapCell>) -> Vec<&'a GapCell> {
        let partition = ClaimedFilter.filter(candidates);

        let claimed_slots = partition.kept.len().min(self.n);
        let unclaimed_slots = self.n - claimed_slots;
        let slotted = partition
            .kept
            .into_iter()
            .take(claimed_slots)
            .chain(partition.removed.into_iter().take(unclaimed_slots));

        let mut seen = HashSet::new();
        let mut picked: Vec<&GapCell> = slotted
            .filter(|&c| seen.insert(c.sub_category.as_str()))
            .collect();
        picked.truncate(self.n);
        picked
    }
}
