//! Queryable in-memory view over the gap score table.
//!
//! Built once from the SKU table and the gap cells, then read-only. At
//! construction each cell's claim is enriched from the SKU table (left join
//! on category + sub_category) when the SKU source carries claims.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::catalog_loader::{check_score, SkuTable};
use crate::components::category_filter::CategoryFilter;
use crate::components::claim_preference_selector::ClaimPreferenceSelector;
use crate::components::gap_score_selector::GapScoreSelector;
use crate::components::threshold_filter::ThresholdFilter;
use crate::error::{LoadError, QueryError};
use crate::filter::Filter;
use crate::selector::Selector;
use crate::types::{Claim, GapCell};

#[derive(Debug, Clone, Default)]
pub struct GapCatalog {
    cells: Vec<GapCell>,
}

impl GapCatalog {
    /// Build the catalog, applying SKU-side claims as each cell's effective
    /// claim and then resolving duplicates (first seen wins) on the
    /// effective key.
    ///
    /// Scores are checked again here since cells may be built in code. The
    /// reported `line` assumes the cells are in table order below a header
    /// row, as they are when they come from `load_gap_cells`.
    pub fn new(skus: &SkuTable, raw_cells: Vec<GapCell>) -> Result<Self, LoadError> {
        for (idx, cell) in raw_cells.iter().enumerate() {
            check_score(cell.gap_score, idx)?;
        }

        let mut cells = raw_cells;
        if skus.has_claims {
            let sku_claims = sku_claims_by_key(skus);
            let mut enriched = 0usize;
            for cell in &mut cells {
                let key = (cell.category.as_str(), cell.sub_category.as_str());
                if let Some(claim) = sku_claims.get(&key) {
                    cell.claim = (*claim).clone();
                    enriched += 1;
                }
            }
            log::debug!(
                "claim join: {} of {} cells took a SKU-side claim",
                enriched,
                cells.len()
            );
        }

        Ok(Self {
            cells: dedup_cells(cells),
        })
    }

    /// Build a catalog from gap cells alone, with no SKU enrichment.
    pub fn from_cells(cells: Vec<GapCell>) -> Result<Self, LoadError> {
        Self::new(&SkuTable::default(), cells)
    }

    pub fn cells(&self) -> &[GapCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All category values, sorted and deduplicated.
    pub fn categories(&self) -> Vec<&str> {
        self.cells
            .iter()
            .map(|c| c.category.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Every cell of `category`, in table order. Unknown categories yield
    /// an empty list.
    pub fn cells_for_category(&self, category: &str) -> Vec<&GapCell> {
        CategoryFilter::new(category)
            .filter(self.cells.iter().collect())
            .kept
    }

    /// Cells with `gap_score >= threshold`, highest score first; equal
    /// scores keep table order.
    pub fn gaps_above_threshold(&self, threshold: f64) -> Result<Vec<&GapCell>, QueryError> {
        let filter = threshold_filter(threshold)?;
        let result = filter.filter(self.cells.iter().collect());
        log::debug!(
            "{} kept {} cells, removed {}",
            filter.name(),
            result.kept.len(),
            result.removed.len()
        );
        let selector = GapScoreSelector::default();
        let selected = selector.select(result.kept);
        log::debug!("{} ordered {} cells", selector.name(), selected.len());
        Ok(selected)
    }

    /// Cells of `category` with `gap_score >= threshold`, in table order.
    pub fn category_gaps(
        &self,
        category: &str,
        threshold: f64,
    ) -> Result<Vec<&GapCell>, QueryError> {
        let filter = threshold_filter(threshold)?;
        Ok(filter.filter(self.cells_for_category(category)).kept)
    }

    /// Up to `n` cells of `category` with distinct sub-categories,
    /// preferring cells that carry a claim.
    pub fn top_n_distinct_sub_categories(&self, category: &str, n: usize) -> Vec<&GapCell> {
        ClaimPreferenceSelector::new(n).select(self.cells_for_category(category))
    }
}

fn threshold_filter(threshold: f64) -> Result<ThresholdFilter, QueryError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(ThresholdFilter::new(threshold))
    } else {
        Err(QueryError::ThresholdOutOfRange(threshold))
    }
}

/// Drop cells whose (category, sub_category, price_tier, claim) key was
/// already seen.
fn dedup_cells(raw_cells: Vec<GapCell>) -> Vec<GapCell> {
    let mut seen: HashSet<(String, String, String, Claim)> = HashSet::new();
    let mut cells = Vec::with_capacity(raw_cells.len());
    for cell in raw_cells {
        let (category, sub_category, price_tier, claim) = cell.key();
        let key = (
            category.to_string(),
            sub_category.to_string(),
            price_tier.to_string(),
            claim.clone(),
        );
        if seen.insert(key) {
            cells.push(cell);
        } else {
            log::warn!(
                "dropping duplicate gap cell {}/{}/{}/{}",
                cell.category,
                cell.sub_category,
                cell.price_tier,
                cell.claim
            );
        }
    }
    cells
}

/// First present SKU claim per (category, sub_category), in table order.
fn sku_claims_by_key(skus: &SkuTable) -> HashMap<(&str, &str), &Claim> {
    let mut claims = HashMap::new();
    for record in skus.records.iter().filter(|r| r.claim.is_present()) {
        claims
            .entry((record.category.as_str(), record.sub_category.as_str()))
            .or_insert(&record.claim);
    }
    claims
}
