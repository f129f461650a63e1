use crate::util;

/// Result of a filter operation, partitioning candidates into kept and removed.
pub struct FilterResult<C> {
    pub kept: Vec<C>,
    pub removed: Vec<C>,
}

/// Filters partition candidates into kept and removed sets.
///
/// Order within each set follows the input order.
pub trait Filter<C> {
    /// Evaluate each candidate against the filter's predicate.
    fn filter(&self, candidates: Vec<C>) -> FilterResult<C>;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
