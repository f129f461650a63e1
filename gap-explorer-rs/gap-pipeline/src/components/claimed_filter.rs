use crate::filter::{Filter, FilterResult};
use crate::types::GapCell;

/// Partitions cells into claimed (kept) and unclaimed (removed).
///
/// Both halves keep table order; the claim preference selector relies on it.
pub struct ClaimedFilter;

impl<'a> Filter<&'a GapCell> for ClaimedFilter {
    fn filter(&self, candidates: Vec<&'a GapCell>) -> FilterResult<&'a GapCell> {
        let (kept, removed): (Vec<_>, Vec<_>) =
            candidates.into_iter().partition(|c| c.claim.is_present());

        FilterResult { kept, removed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_token_counts_as_unclaimed() {
        let cells = [
            GapCell::new("Snacks", "Chips", "200+", "NONE", 0.9),
            GapCell::new("Snacks", "Nuts", "200+", "organic", 0.8),
            GapCell::new("Snacks", "Seeds", "200+", "", 0.7),
        ];
        let result = ClaimedFilter.filter(cells.iter().collect());
        let kept: Vec<_> = result.kept.iter().map(|c| c.sub_category.as_str()).collect();
        let removed: Vec<_> = result
            .removed
            .iter()
            .map(|c| c.sub_category.as_str())
            .collect();
        assert_eq!(kept, vec!["Nuts"]);
        assert_eq!(removed, vec!["Chips", "Seeds"]);
    }
}
