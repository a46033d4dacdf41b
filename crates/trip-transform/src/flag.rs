//! Store-and-forward flag encoding.

use polars::prelude::{DataFrame, DataType, IntoSeries, NewChunkedArray, UInt8Chunked};
use tracing::debug;

use trip_model::{SchemaCapabilities, columns};

use crate::error::TransformError;

/// Map the two-valued `store_and_fwd_flag` code to 1/0.
///
/// "Y" becomes 1, "N" becomes 0, anything else (including null) becomes
/// null. Rows with an unknown code are not filtered for that reason alone.
/// A flag column that already arrives numeric is left for the narrower.
pub fn encode_store_fwd_flag(
    df: &mut DataFrame,
    capabilities: &SchemaCapabilities,
) -> Result<(), TransformError> {
    if !capabilities.has_flag {
        return Ok(());
    }
    let column = df.column(columns::STORE_AND_FWD_FLAG)?;
    if !matches!(column.dtype(), DataType::String) {
        debug!(
            dtype = %column.dtype(),
            "store_and_fwd_flag already numeric, leaving as-is"
        );
        return Ok(());
    }

    let encoded = UInt8Chunked::from_iter_options(
        columns::STORE_AND_FWD_FLAG.into(),
        column.str()?.iter().map(|value| match value {
            Some("Y") => Some(1u8),
            Some("N") => Some(0u8),
            _ => None,
        }),
    );
    df.with_column(encoded.into_series())?;
    Ok(())
}
