//! Opportunity classification from price tier labels.
//!
//! A price tier label is mapped to a `PriceBucket` by an ordered list of
//! substring rules, then the bucket's recommendation template is filled in
//! with the cell's effective claim.
//!
//! Rules are evaluated top to bottom and the first match wins. They overlap
//! on purpose (e.g. "101–200" also contains "100"), so the order below is
//! part of the contract:
//! - "200+"                  -> Premium
//! - "101" or "201"          -> Mid
//! - "51" or "100"           -> Value
//! - "1–50", "1-50" or "₹1"  -> Entry
//! - anything else           -> Other

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{Claim, Classification, PriceBucket};

/// Ordered (tokens, bucket) rules. A rule matches when the label contains
/// any of its tokens.
pub const BUCKET_RULES: &[(&[&str], PriceBucket)] = &[
    (&["200+"], PriceBucket::Premium),
    (&["101", "201"], PriceBucket::Mid),
    (&["51", "100"], PriceBucket::Value),
    (&["1\u{2013}50", "1-50", "\u{20b9}1"], PriceBucket::Entry),
];

/// Placeholder replaced with the claim (plus a trailing space) or removed.
const CLAIM_SLOT: &str = "{claim} ";
/// Placeholder replaced with the raw price tier label.
const TIER_SLOT: &str = "{tier}";

const PREMIUM_TEMPLATES: &[&str] = &[
    "Premium gap: consumers may pay more for {claim} options; scope to introduce higher-end SKUs that target affluent buyers.",
    "Premium gap: few high-end {claim} products sit on shelf; a premium launch could target affluent buyers.",
    "Premium gap: affluent buyers lack a {claim} choice at the top of the range; scope for a premium line.",
];

const MID_TEMPLATES: &[&str] = &[
    "Mid-tier gap: balanced {claim} offerings are underrepresented; scope to expand mainstream options.",
    "Mid-tier gap: the middle of the range has little {claim} choice; expand mainstream options to attract everyday shoppers.",
    "Mid-tier gap: mainstream shoppers find few {claim} products here; expand mainstream options.",
];

const VALUE_TEMPLATES: &[&str] = &[
    "Value gap: affordable {claim} products are missing; scope to win price-sensitive buyers.",
    "Value gap: budget {claim} choices are thin; sharper price points could win price-sensitive buyers.",
    "Value gap: few {claim} options exist at everyday low prices; a value range could win price-sensitive buyers.",
];

const ENTRY_TEMPLATES: &[&str] = &[
    "Entry gap: low-priced {claim} packs are scarce; small packs could drive trial and volume.",
    "Entry gap: there is little {claim} choice at the lowest price point; sachets and minis could drive trial and volume.",
    "Entry gap: first-time buyers find few {claim} products at entry prices; drive trial and volume with trial packs.",
];

const OTHER_TEMPLATES: &[&str] = &[
    "Gap in the {tier} tier with {claim} products underrepresented; scope to expand assortment.",
    "Gap in the {tier} tier: {claim} coverage is thin; scope to expand assortment.",
];

/// How recommendation text is chosen among a bucket's templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phrasing {
    /// Always the bucket's first template.
    #[default]
    Fixed,
    /// A random template from the bucket's own pool.
    Varied,
}

/// Maps (price tier, claim) pairs to a bucket and recommendation text.
#[derive(Clone, Debug, Default)]
pub struct OpportunityClassifier {
    phrasing: Phrasing,
}

impl OpportunityClassifier {
    pub fn new(phrasing: Phrasing) -> Self {
        Self { phrasing }
    }

    /// Classify using the thread-local RNG for varied phrasing.
    pub fn classify(&self, price_tier: &str, claim: &Claim) -> Classification {
        self.classify_with_rng(price_tier, claim, &mut rand::thread_rng())
    }

    /// Classify with an explicit RNG. The RNG is only consulted when the
    /// phrasing is `Varied`.
    pub fn classify_with_rng<R: Rng + ?Sized>(
        &self,
        price_tier: &str,
        claim: &Claim,
        rng: &mut R,
    ) -> Classification {
        let bucket = bucket_for(price_tier);
        let pool = templates(bucket);
        let template = match self.phrasing {
            Phrasing::Fixed => pool[0],
            Phrasing::Varied => pool.choose(rng).copied().unwrap_or(pool[0]),
        };

        Classification {
            bucket,
            recommendation: render(template, price_tier, claim),
        }
    }
}

/// Bucket for a price tier label. Total: unknown labels land in `Other`.
pub fn bucket_for(price_tier: &str) -> PriceBucket {
    BUCKET_RULES
        .iter()
        .find(|(tokens, _)| tokens.iter().any(|t| price_tier.contains(t)))
        .map(|&(_, bucket)| bucket)
        .unwrap_or(PriceBucket::Other)
}

/// Template pool for a bucket. Every pool is non-empty.
pub fn templates(bucket: PriceBucket) -> &'static [&'static str] {
    match bucket {
        PriceBucket::Premium => PREMIUM_TEMPLATES,
        PriceBucket::Mid => MID_TEMPLATES,
        PriceBucket::Value => VALUE_TEMPLATES,
        PriceBucket::Entry => ENTRY_TEMPLATES,
        PriceBucket::Other => OTHER_TEMPLATES,
    }
}

fn render(template: &str, price_tier: &str, claim: &Claim) -> String {
    let claim_text = match claim.as_str() {
        Some(c) => format!("{c} "),
        None => String::new(),
    };
    let tier = price_tier.trim();
    let tier = if tier.is_empty() { "unlabelled" } else { tier };

    // Single pass over the template so substituted values are never rescanned.
    let mut out = String::with_capacity(template.len() + claim_text.len() + tier.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let slot = &rest[start..];
        if let Some(after) = slot.strip_prefix(CLAIM_SLOT) {
            out.push_str(&claim_text);
            rest = after;
        } else if let Some(after) = slot.strip_prefix(TIER_SLOT) {
            out.push_str(tier);
            rest = after;
        } else {
            out.push('{');
            rest = &slot[1..];
        }
    }
    out.push_str(rest);
    out
}
