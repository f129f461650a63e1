use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Claim
// ---------------------------------------------------------------------------

/// Literal token the upstream tables use for "no claim".
pub const NONE_TOKEN: &str = "none";

/// A positioning claim (e.g. "organic") attached to a SKU or gap cell.
///
/// Absent, empty and the literal `none` token (any case) all collapse to
/// the same "no claim" value, so callers never see the token itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Claim(Option<String>);

impl Claim {
    /// Normalize a raw table value into a claim.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NONE_TOKEN) {
            Self(None)
        } else {
            Self(Some(trimmed.to_string()))
        }
    }

    /// The "no claim" value.
    pub fn absent() -> Self {
        Self(None)
    }

    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Display label: the claim text, or empty when there is no claim.
    pub fn label(&self) -> &str {
        self.0.as_deref().unwrap_or("")
    }
}

impl From<&str> for Claim {
    fn from(raw: &str) -> Self {
        Claim::new(raw)
    }
}

impl From<Option<String>> for Claim {
    fn from(raw: Option<String>) -> Self {
        raw.map(Claim::new).unwrap_or_default()
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Claim {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Claim::from(raw))
    }
}

impl Serialize for Claim {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.0 {
            Some(claim) => serializer.serialize_some(claim),
            None => serializer.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

/// One product row from the SKU catalog.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SkuRecord {
    pub category: String,
    pub sub_category: String,
    #[serde(rename = "Price_Tier", default)]
    pub price_tier: Option<String>,
    #[serde(rename = "Claims", default)]
    pub claim: Claim,

    // Display-only fields, carried for the presentation layer.
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub p_url: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub sale_price: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub market_price: Option<f64>,
}

impl SkuRecord {
    /// Minimal record with only the join keys and a claim.
    pub fn new(category: &str, sub_category: &str, claim: impl Into<Claim>) -> Self {
        Self {
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            price_tier: None,
            claim: claim.into(),
            product: None,
            p_url: None,
            sale_price: None,
            market_price: None,
        }
    }
}

/// One (category, sub_category, price_tier, claim) cell of the gap table.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct GapCell {
    pub category: String,
    pub sub_category: String,
    #[serde(rename = "Price_Tier")]
    pub price_tier: String,
    #[serde(rename = "Claims", default)]
    pub claim: Claim,
    #[serde(rename = "SKU_Count", default, deserialize_with = "deserialize_count")]
    pub sku_count: u32,
    /// Whitespace metric in [0, 1]; higher means less coverage.
    #[serde(rename = "Gap_Score")]
    pub gap_score: f64,
}

impl GapCell {
    pub fn new(
        category: &str,
        sub_category: &str,
        price_tier: &str,
        claim: impl Into<Claim>,
        gap_score: f64,
    ) -> Self {
        Self {
            category: category.to_string(),
            sub_category: sub_category.to_string(),
            price_tier: price_tier.to_string(),
            claim: claim.into(),
            sku_count: 0,
            gap_score,
        }
    }

    pub fn with_sku_count(mut self, sku_count: u32) -> Self {
        self.sku_count = sku_count;
        self
    }

    /// Identity key used for duplicate detection.
    pub(crate) fn key(&self) -> (&str, &str, &str, &Claim) {
        (
            &self.category,
            &self.sub_category,
            &self.price_tier,
            &self.claim,
        )
    }
}

/// SKU counts: blank means zero, and whole-number floats ("3.0") are
/// accepted since dataframe exports write counts that way once a column
/// has gaps.
fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let s = match raw.as_deref().map(str::trim) {
        None | Some("") => return Ok(0),
        Some(s) => s,
    };
    if let Ok(count) = s.parse::<u32>() {
        return Ok(count);
    }
    match s.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.fract() == 0.0 && v <= f64::from(u32::MAX) => Ok(v as u32),
        _ => Err(serde::de::Error::custom(format!("invalid SKU count: {s}"))),
    }
}

// ---------------------------------------------------------------------------
// Classification output
// ---------------------------------------------------------------------------

/// Price-tier bucket derived from the tier label.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceBucket {
    Premium,
    Mid,
    Value,
    Entry,
    Other,
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceBucket::Premium => write!(f, "Premium"),
            PriceBucket::Mid => write!(f, "Mid-tier"),
            PriceBucket::Value => write!(f, "Value"),
            PriceBucket::Entry => write!(f, "Entry"),
            PriceBucket::Other => write!(f, "Other"),
        }
    }
}

/// Result of classifying one (price tier, claim) pair.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Classification {
    pub bucket: PriceBucket,
    pub recommendation: String,
}

/// A queried cell joined with its classification, ready for rendering.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Opportunity {
    pub category: String,
    pub sub_category: String,
    pub price_tier: String,
    pub claim: Claim,
    pub sku_count: u32,
    pub gap_score: f64,
    pub bucket: PriceBucket,
    pub recommendation: String,
}
