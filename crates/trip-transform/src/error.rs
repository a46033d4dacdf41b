//! Error types for trip-record transformations.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while deriving features, filtering or narrowing.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A column the capability descriptor promised is gone.
    #[error("column '{column}' not found in frame")]
    ColumnNotFound { column: String },

    /// Underlying DataFrame operation failed.
    #[error("frame operation failed: {0}")]
    Frame(#[from] PolarsError),
}
