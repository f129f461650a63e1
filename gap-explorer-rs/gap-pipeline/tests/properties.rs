use std::collections::HashSet;

use proptest::prelude::*;

use gap_pipeline::catalog::GapCatalog;
use gap_pipeline::classifier::{OpportunityClassifier, Phrasing};
use gap_pipeline::types::{Claim, GapCell, PriceBucket};

const TIERS: &[&str] = &["200+", "101–200", "51–100", "₹1–50", "Family pack", ""];
const CLAIMS: &[&str] = &["none", "None", "", "organic", "vegan", "baked"];
const SUBS: &[&str] = &["Chips", "Nuts", "Seeds", "Bars", "Mixes"];

fn arb_cell() -> impl Strategy<Value = GapCell> {
    (
        prop::sample::select(vec!["Snacks", "Dairy"]),
        prop::sample::select(SUBS.to_vec()),
        prop::sample::select(TIERS.to_vec()),
        prop::sample::select(CLAIMS.to_vec()),
        0u32..=100,
    )
        .prop_map(|(category, sub, tier, claim, score)| {
            GapCell::new(category, sub, tier, claim, f64::from(score) / 100.0)
        })
}

fn arb_catalog() -> impl Strategy<Value = GapCatalog> {
    prop::collection::vec(arb_cell(), 0..40)
        .prop_map(|cells| GapCatalog::from_cells(cells).expect("scores are in range"))
}

proptest! {
    #[test]
    fn higher_threshold_is_a_subset(catalog in arb_catalog(), a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let wide: Vec<*const GapCell> = catalog
            .gaps_above_threshold(low)
            .unwrap()
            .into_iter()
            .map(|c| c as *const GapCell)
            .collect();
        for cell in catalog.gaps_above_threshold(high).unwrap() {
            prop_assert!(wide.contains(&(cell as *const GapCell)));
        }
    }

    #[test]
    fn threshold_output_sorted_and_stable(catalog in arb_catalog(), t in 0.0f64..=1.0) {
        let position = |cell: &GapCell| {
            catalog
                .cells()
                .iter()
                .position(|c| std::ptr::eq(c, cell))
                .unwrap()
        };
        let gaps = catalog.gaps_above_threshold(t).unwrap();
        for pair in gaps.windows(2) {
            prop_assert!(pair[0].gap_score >= pair[1].gap_score);
            if pair[0].gap_score == pair[1].gap_score {
                prop_assert!(position(pair[0]) < position(pair[1]));
            }
        }
        prop_assert!(gaps.iter().all(|c| c.gap_score >= t));
    }

    #[test]
    fn top_n_bounded_and_distinct(catalog in arb_catalog(), n in 0usize..8) {
        for category in ["Snacks", "Dairy"] {
            let top = catalog.top_n_distinct_sub_categories(category, n);
            prop_assert!(top.len() <= n);
            let distinct: HashSet<&str> = top.iter().map(|c| c.sub_category.as_str()).collect();
            prop_assert_eq!(distinct.len(), top.len());
            prop_assert!(top.iter().all(|c| c.category == category));
        }
    }

    #[test]
    fn enough_claimed_cells_exclude_unclaimed(catalog in arb_catalog(), n in 1usize..6) {
        for category in ["Snacks", "Dairy"] {
            let cells = catalog.cells_for_category(category);
            let claimed = cells.iter().filter(|c| c.claim.is_present()).count();
            if claimed >= n {
                let top = catalog.top_n_distinct_sub_categories(category, n);
                prop_assert!(top.iter().all(|c| c.claim.is_present()));
            }
        }
    }

    #[test]
    fn classify_is_total(label in ".*", claim in prop::sample::select(CLAIMS.to_vec())) {
        let classifier = OpportunityClassifier::new(Phrasing::Varied);
        let result = classifier.classify(&label, &Claim::new(claim));
        prop_assert!(!result.recommendation.is_empty());
        if result.bucket != PriceBucket::Other {
            prop_assert!(!result.recommendation.contains("none"));
        }
    }

    #[test]
    fn none_claim_never_rendered(tier in prop::sample::select(TIERS.to_vec()), token in "(?i)none") {
        let classifier = OpportunityClassifier::default();
        let result = classifier.classify(tier, &Claim::new(&token));
        prop_assert!(!result.recommendation.to_lowercase().contains("none"));
    }
}
