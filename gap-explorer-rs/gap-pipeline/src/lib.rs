//! Gap explorer core.
//!
//! Loads a SKU catalog and a precomputed gap score table, exposes them as an
//! immutable `GapCatalog`, and turns queried cells into merchandising
//! recommendations through the `OpportunityClassifier`.

pub mod cache;
pub mod catalog;
pub mod catalog_loader;
pub mod classifier;
pub mod components;
pub mod config;
pub mod error;
pub mod filter;
pub mod report;
pub mod selector;
pub mod types;
pub mod util;

pub use cache::CatalogCache;
pub use catalog::GapCatalog;
pub use catalog_loader::{load_gap_cells, load_gap_cells_file, load_skus, load_skus_file, SkuTable};
pub use classifier::{bucket_for, OpportunityClassifier, Phrasing};
pub use config::ExplorerConfig;
pub use error::{GapError, GapResult, LoadError, QueryError};
pub use report::{build_opportunities, export_csv, export_csv_file};
pub use types::{Claim, Classification, GapCell, Opportunity, PriceBucket, SkuRecord};
