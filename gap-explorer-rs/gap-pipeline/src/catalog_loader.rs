//! CSV loaders for the SKU catalog and the gap score table.
//!
//! Expected SKU columns:
//!   category, sub_category, [Claims], [Price_Tier], [product, p_url,
//!   sale_price, market_price]
//! Expected gap score columns:
//!   category, sub_category, Price_Tier, Gap_Score, [Claims], [SKU_Count]
//!
//! Extra columns are ignored. A missing required column or an unparsable row
//! fails the whole load; no partial table is returned.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{LoadError, Table};
use crate::types::{GapCell, SkuRecord};

const SKU_REQUIRED: &[&str] = &["category", "sub_category"];
const GAP_REQUIRED: &[&str] = &["category", "sub_category", "Price_Tier", "Gap_Score"];
const CLAIMS_COLUMN: &str = "Claims";

/// SKU rows plus whether the source carried a claim column at all.
///
/// The catalog only enriches gap cells from SKU claims when the column
/// exists, so the distinction between "no column" and "all blank" matters.
#[derive(Debug, Clone, Default)]
pub struct SkuTable {
    pub records: Vec<SkuRecord>,
    pub has_claims: bool,
}

impl SkuTable {
    pub fn new(records: Vec<SkuRecord>, has_claims: bool) -> Self {
        Self {
            records,
            has_claims,
        }
    }
}

/// Load the SKU catalog from a CSV reader.
pub fn load_skus<R: Read>(reader: R) -> Result<SkuTable, LoadError> {
    let (records, headers) = read_table::<R, SkuRecord>(reader, Table::Skus, SKU_REQUIRED)?;
    let has_claims = headers.iter().any(|h| h == CLAIMS_COLUMN);
    log::info!(
        "loaded {} SKU records (claims column: {})",
        records.len(),
        has_claims
    );
    Ok(SkuTable::new(records, has_claims))
}

/// Load the SKU catalog from a CSV file path.
pub fn load_skus_file(path: impl AsRef<Path>) -> Result<SkuTable, LoadError> {
    load_skus(open(path.as_ref())?)
}

/// Load gap cells from a CSV reader, rejecting scores outside [0, 1].
pub fn load_gap_cells<R: Read>(reader: R) -> Result<Vec<GapCell>, LoadError> {
    let (cells, _) = read_table::<R, GapCell>(reader, Table::GapCells, GAP_REQUIRED)?;
    for (idx, cell) in cells.iter().enumerate() {
        check_score(cell.gap_score, idx)?;
    }
    log::info!("loaded {} gap cells", cells.len());
    Ok(cells)
}

/// Load gap cells from a CSV file path.
pub fn load_gap_cells_file(path: impl AsRef<Path>) -> Result<Vec<GapCell>, LoadError> {
    load_gap_cells(open(path.as_ref())?)
}

/// Reject a gap score outside [0, 1] (NaN included).
///
/// `row_index` is the zero-based data row; reported lines count the header.
pub(crate) fn check_score(score: f64, row_index: usize) -> Result<(), LoadError> {
    if (0.0..=1.0).contains(&score) {
        Ok(())
    } else {
        Err(LoadError::ScoreOutOfRange {
            line: row_index as u64 + 2,
            score,
        })
    }
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn read_table<R, T>(
    reader: R,
    table: Table,
    required: &[&'static str],
) -> Result<(Vec<T>, csv::StringRecord), LoadError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|source| LoadError::Csv { table, source })?
        .clone();

    if let Some(&column) = required.iter().find(|c| !headers.iter().any(|h| h == **c)) {
        return Err(LoadError::MissingColumn { table, column });
    }

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: T = result.map_err(|e| LoadError::Parse {
            table,
            line: line_num as u64 + 2,
            message: e.to_string(),
        })?;
        rows.push(row);
    }

    Ok((rows, headers))
}
