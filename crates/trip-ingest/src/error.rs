//! Error types for trip-record ingestion.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while probing or loading an input file.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file not found.
    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or scan the Parquet file.
    #[error("failed to scan parquet {path}: {source}")]
    ParquetScan {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// Failed to read the Parquet schema metadata.
    #[error("failed to read parquet schema {path}: {source}")]
    SchemaRead {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },

    /// Failed to materialize the requested columns.
    #[error("failed to load columns from {path}: {source}")]
    ColumnLoad {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}
