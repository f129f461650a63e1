use crate::filter::{Filter, FilterResult};
use crate::types::GapCell;

/// Keeps cells whose gap score is at or above a minimum.
pub struct ThresholdFilter {
    pub min_gap_score: f64,
}

impl ThresholdFilter {
    pub fn new(min_gap_score: f64) -> Self {
        Self { min_gap_score }
    }
}

impl<'a> Filter<&'a GapCell> for ThresholdFilter {
    fn filter(&self, candidates: Vec<&'a GapCell>) -> FilterResult<&'a GapCell> {
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.gap_score >= self.min_gap_score);

        FilterResult { kept, removed }
    }
}
