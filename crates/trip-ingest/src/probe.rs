//! Parquet schema probing.
//!
//! Reads column names from file metadata without materializing row data, so
//! the loader can intersect its fixed request list with what is physically
//! present.

use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::{LazyFrame, PlPath, ScanArgsParquet};

use crate::error::IngestError;

/// Return the ordered set of column names physically present in `path`.
///
/// Only metadata is touched; no row group is read. A failure here is a
/// degraded condition for the caller, not necessarily a fatal one — the
/// loader falls back to requesting its fixed column list.
pub fn probe_columns(path: &Path) -> Result<BTreeSet<String>, IngestError> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut frame = scan(path)?;
    let schema = frame
        .collect_schema()
        .map_err(|source| IngestError::SchemaRead {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Lazily scan `path` without loading any data.
pub(crate) fn scan(path: &Path) -> Result<LazyFrame, IngestError> {
    let location = path.to_string_lossy();
    LazyFrame::scan_parquet(PlPath::new(&location), ScanArgsParquet::default()).map_err(|source| {
        IngestError::ParquetScan {
            path: path.to_path_buf(),
            source,
        }
    })
}
