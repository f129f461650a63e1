use crate::filter::{Filter, FilterResult};
use crate::types::GapCell;

/// Keeps cells of exactly one category. No case or whitespace folding.
pub struct CategoryFilter {
    pub category: String,
}

impl CategoryFilter {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl<'a> Filter<&'a GapCell> for CategoryFilter {
    fn filter(&self, candidates: Vec<&'a GapCell>) -> FilterResult<&'a GapCell> {
        let (kept, removed): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.category == self.category);

        FilterResult { kept, removed }
    }
}
