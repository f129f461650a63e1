//! Opportunity rows for the presentation layer, and their CSV export.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rand::Rng;

use crate::classifier::OpportunityClassifier;
use crate::error::GapResult;
use crate::types::{GapCell, Opportunity};

/// Classify each cell and pair the result with the cell's raw fields.
pub fn build_opportunities<'a, I>(cells: I, classifier: &OpportunityClassifier) -> Vec<Opportunity>
where
    I: IntoIterator<Item = &'a GapCell>,
{
    build_opportunities_with_rng(cells, classifier, &mut rand::thread_rng())
}

/// Same as [`build_opportunities`] with an explicit RNG for varied phrasing.
pub fn build_opportunities_with_rng<'a, I, R>(
    cells: I,
    classifier: &OpportunityClassifier,
    rng: &mut R,
) -> Vec<Opportunity>
where
    I: IntoIterator<Item = &'a GapCell>,
    R: Rng + ?Sized,
{
    cells
        .into_iter()
        .map(|cell| {
            let classification = classifier.classify_with_rng(&cell.price_tier, &cell.claim, rng);
            Opportunity {
                category: cell.category.clone(),
                sub_category: cell.sub_category.clone(),
                price_tier: cell.price_tier.clone(),
                claim: cell.claim.clone(),
                sku_count: cell.sku_count,
                gap_score: cell.gap_score,
                bucket: classification.bucket,
                recommendation: classification.recommendation,
            }
        })
        .collect()
}

/// Write opportunities as CSV with a header row. No-claim rows get an
/// empty claim field.
pub fn export_csv<W: Write>(writer: W, opportunities: &[Opportunity]) -> GapResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for opportunity in opportunities {
        csv_writer.serialize(opportunity)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write opportunities to a CSV file, replacing it if present.
pub fn export_csv_file(path: impl AsRef<Path>, opportunities: &[Opportunity]) -> GapResult<()> {
    let file = File::create(path.as_ref())?;
    export_csv(file, opportunities)?;
    log::info!(
        "exported {} opportunities to {}",
        opportunities.len(),
        path.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceBucket;

    fn sample_cells() -> Vec<GapCell> {
        vec![
            GapCell::new("Snacks", "Chips", "200+", "organic", 0.92).with_sku_count(2),
            GapCell::new("Snacks", "Nuts", "51–100", "none", 0.75),
        ]
    }

    #[test]
    fn opportunities_carry_cell_fields() {
        let cells = sample_cells();
        let rows = build_opportunities(&cells, &OpportunityClassifier::default());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sub_category, "Chips");
        assert_eq!(rows[0].sku_count, 2);
        assert_eq!(rows[0].bucket, PriceBucket::Premium);
        assert!(rows[0].recommendation.contains("organic"));
        assert_eq!(rows[1].bucket, PriceBucket::Value);
        assert!(!rows[1].claim.is_present());
    }

    #[test]
    fn csv_export_writes_header_and_blank_claims() {
        let cells = sample_cells();
        let rows = build_opportunities(&cells, &OpportunityClassifier::default());
        let mut out = Vec::new();
        export_csv(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("category,sub_category,price_tier,claim,sku_count,gap_score,bucket,recommendation")
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("Snacks,Chips,200+,organic,2,0.92,PREMIUM,"));
        let second = lines.next().unwrap();
        assert!(second.starts_with("Snacks,Nuts,51–100,,0,0.75,VALUE,"));
        assert!(!text.contains("none"));
    }
}
