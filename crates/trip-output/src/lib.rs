//! Compressed Parquet output for the feature table.
//!
//! Zstd-compressed with column statistics; categorical columns dictionary
//! encode in the Parquet layer. Row order is written exactly as received.
//! A write failure is fatal to the run — there is no partial-write recovery.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{DataFrame, ParquetCompression, ParquetWriter, StatisticsOptions};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while persisting the feature table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Output file could not be created.
    #[error("failed to create output file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parquet serialization failed.
    #[error("failed to write parquet {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: polars::prelude::PolarsError,
    },
}

/// Persist `df` to `path` as zstd-compressed Parquet.
///
/// A zero-row frame is written normally with its full schema. Returns the
/// number of bytes written.
pub fn write_feature_table(path: &Path, df: &mut DataFrame) -> Result<u64, OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let bytes = ParquetWriter::new(file)
        .with_compression(ParquetCompression::Zstd(None))
        .with_statistics(StatisticsOptions::full())
        .finish(df)
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        path = %path.display(),
        rows = df.height(),
        bytes,
        "feature table written"
    );
    Ok(bytes)
}
