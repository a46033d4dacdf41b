//! Combined-mask record filtering.
//!
//! Every validity predicate is AND'd into one boolean selector which is
//! applied in a single materializing pass. Peak memory stays at one input
//! table plus one output table no matter how many predicates are active.

use polars::chunked_array::cast::CastOptions;
use polars::prelude::{
    BooleanChunked, ChunkCompareIneq, ChunkFull, DataFrame, DataType, Series,
};
use tracing::debug;

use trip_model::{SchemaCapabilities, columns};

use crate::error::TransformError;

/// Build the combined validity selector for every predicate whose column is
/// available: target non-null and >= 0, duration non-null and > 0, derived
/// hour/day-of-week non-null, trip distance non-null and >= 0.
pub fn build_validity_mask(
    df: &DataFrame,
    capabilities: &SchemaCapabilities,
) -> Result<BooleanChunked, TransformError> {
    let mut mask = BooleanChunked::full("valid".into(), true, df.height());

    if capabilities.has_target {
        mask = &mask & &at_least(df, columns::TARGET, 0.0)?;
    } else {
        debug!("target column absent, skipping target predicate");
    }
    if capabilities.derives_duration() {
        mask = &mask & &above(df, columns::TRIP_DURATION_MIN, 0.0)?;
    }
    if capabilities.derives_time_features() {
        mask = &mask & &not_null(df, columns::PICKUP_HOUR)?;
        mask = &mask & &not_null(df, columns::PICKUP_DAYOFWEEK)?;
    }
    if capabilities.has_trip_distance {
        mask = &mask & &at_least(df, columns::TRIP_DISTANCE, 0.0)?;
    }

    Ok(mask)
}

/// Apply the selector in exactly one materializing copy.
pub fn apply_validity_mask(
    df: DataFrame,
    mask: &BooleanChunked,
) -> Result<DataFrame, TransformError> {
    let before = df.height();
    let filtered = df.filter(mask)?;
    debug!(
        input_rows = before,
        output_rows = filtered.height(),
        "validity mask applied"
    );
    Ok(filtered)
}

fn numeric(df: &DataFrame, name: &str) -> Result<Series, TransformError> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast_with_options(&DataType::Float64, CastOptions::NonStrict)?;
    Ok(series)
}

/// Non-null and `>= threshold`.
fn at_least(df: &DataFrame, name: &str, threshold: f64) -> Result<BooleanChunked, TransformError> {
    let series = numeric(df, name)?;
    let values = series.f64()?;
    Ok(&values.is_not_null() & &values.gt_eq(threshold))
}

/// Non-null and `> threshold`.
fn above(df: &DataFrame, name: &str, threshold: f64) -> Result<BooleanChunked, TransformError> {
    let series = numeric(df, name)?;
    let values = series.f64()?;
    Ok(&values.is_not_null() & &values.gt(threshold))
}

fn not_null(df: &DataFrame, name: &str) -> Result<BooleanChunked, TransformError> {
    Ok(df.column(name)?.as_materialized_series().is_not_null())
}
