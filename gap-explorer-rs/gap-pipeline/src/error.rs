//! Gap explorer error types.
//!
//! Load failures are fatal and surfaced once; query failures are limited to
//! out-of-range thresholds. Everything else falls back instead of failing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which input table an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Skus,
    GapCells,
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Table::Skus => write!(f, "SKU table"),
            Table::GapCells => write!(f, "gap score table"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to open '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unreadable {table}: {source}")]
    Csv {
        table: Table,
        #[source]
        source: csv::Error,
    },

    #[error("{table} is missing required column '{column}'")]
    MissingColumn { table: Table, column: &'static str },

    #[error("{table} parse error at line {line}: {message}")]
    Parse {
        table: Table,
        line: u64,
        message: String,
    },

    #[error("Gap_Score {score} at line {line} is outside [0, 1]")]
    ScoreOutOfRange { line: u64, score: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("threshold {0} is outside [0, 1]")]
    ThresholdOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum GapError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type alias for gap explorer operations.
pub type GapResult<T> = Result<T, GapError>;
