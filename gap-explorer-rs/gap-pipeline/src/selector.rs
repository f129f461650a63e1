use std::cmp::Ordering;

use crate::util;

/// Selectors sort and truncate the candidate list.
pub trait Selector<C> {
    /// Default selection: sort and truncate based on provided configs.
    fn select(&self, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = self.sort(candidates);
        if let Some(limit) = self.size() {
            sorted.truncate(limit);
        }
        sorted
    }

    /// Extract the score from a candidate to use for sorting.
    fn score(&self, candidate: &C) -> f64;

    /// Sort candidates by their scores in descending order.
    ///
    /// The sort is stable: equal scores keep their input order. NaN scores
    /// are pushed to the end of the list.
    fn sort(&self, candidates: Vec<C>) -> Vec<C> {
        let mut sorted = candidates;
        sorted.sort_by(|a, b| {
            let sa = self.score(a);
            let sb = self.score(b);
            match (sa.is_nan(), sb.is_nan()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => sb.partial_cmp(&sa).unwrap_or(Ordering::Equal),
            }
        });
        sorted
    }

    /// Optionally provide a maximum number of candidates to select.
    /// Defaults to no truncation if not overridden.
    fn size(&self) -> Option<usize> {
        None
    }

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
