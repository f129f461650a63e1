use std::path::PathBuf;

use crate::classifier::Phrasing;

/// Default minimum gap score for a cell to count as an opportunity.
pub const DEFAULT_GAP_THRESHOLD: f64 = 0.7;
/// Default number of rows shown per category.
pub const DEFAULT_TOP_N: usize = 5;
/// Default SKU catalog file name.
pub const DEFAULT_SKU_FILE: &str = "skus_enriched.csv";
/// Default gap score table file name.
pub const DEFAULT_GAP_FILE: &str = "cell_gap_scores.csv";

/// Settings for one explorer session.
#[derive(Clone, Debug, PartialEq)]
pub struct ExplorerConfig {
    /// Path to the SKU catalog CSV.
    pub sku_path: PathBuf,
    /// Path to the gap score CSV.
    pub gap_path: PathBuf,
    /// Minimum gap score, validated by the catalog query.
    pub threshold: f64,
    /// Maximum rows per category view.
    pub top_n: usize,
    pub phrasing: Phrasing,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            sku_path: PathBuf::from(DEFAULT_SKU_FILE),
            gap_path: PathBuf::from(DEFAULT_GAP_FILE),
            threshold: DEFAULT_GAP_THRESHOLD,
            top_n: DEFAULT_TOP_N,
            phrasing: Phrasing::Fixed,
        }
    }
}
