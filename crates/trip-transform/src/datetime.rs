//! Datetime feature extraction.
//!
//! Raw timestamp columns are coerced, consumed into derived calendar and
//! duration features, then dropped. Unparsable values become nulls and are
//! left for the filter stage; extraction itself never fails on bad data.

use polars::chunked_array::cast::CastOptions;
use polars::prelude::{
    ChunkApply, Column, DataFrame, DataType, IntoSeries, Series, TemporalMethods,
    TimeUnit,
};
use tracing::debug;

use trip_model::{SchemaCapabilities, columns};

use crate::error::TransformError;

/// Derive calendar/duration features and drop every raw timestamp column.
///
/// Primary pair: `pickup_hour` (0-23), `pickup_dayofweek` (0-6, Monday = 0)
/// and `pickup_month` (1-12) as nullable `u8`, plus `trip_duration_min` as
/// nullable float when both ends of the pair exist. Legacy columns get an
/// independent `{col}_epoch`/`{col}_hour`/`{col}_dow` triple each.
pub fn extract_time_features(
    df: &mut DataFrame,
    capabilities: &SchemaCapabilities,
) -> Result<(), TransformError> {
    if capabilities.derives_time_features() {
        let pickup = coerce_datetime(required(df, columns::PICKUP_TS)?)?;

        let hour = pickup
            .hour()?
            .into_series()
            .cast(&DataType::UInt8)?
            .with_name(columns::PICKUP_HOUR.into());
        let dayofweek = pickup
            .weekday()?
            .apply_values(|day| day - 1)
            .into_series()
            .cast(&DataType::UInt8)?
            .with_name(columns::PICKUP_DAYOFWEEK.into());
        let month = pickup
            .month()?
            .into_series()
            .cast(&DataType::UInt8)?
            .with_name(columns::PICKUP_MONTH.into());
        df.with_column(hour)?;
        df.with_column(dayofweek)?;
        df.with_column(month)?;

        if capabilities.derives_duration() {
            let dropoff = coerce_datetime(required(df, columns::DROPOFF_TS)?)?;
            df.with_column(duration_minutes(&pickup, &dropoff)?)?;
        }
    }

    if capabilities.has_legacy_pickup {
        extract_legacy(df, columns::LEGACY_PICKUP_TS)?;
    }
    if capabilities.has_legacy_dropoff {
        extract_legacy(df, columns::LEGACY_DROPOFF_TS)?;
    }

    *df = df.drop_many(columns::RAW_TIMESTAMP_COLUMNS);
    debug!(columns = df.width(), "time features extracted, raw timestamps dropped");
    Ok(())
}

/// Legacy single-timestamp derivation: epoch seconds, hour, day-of-week.
fn extract_legacy(df: &mut DataFrame, name: &str) -> Result<(), TransformError> {
    let timestamp = coerce_datetime(required(df, name)?)?;

    let micros = timestamp.cast(&DataType::Int64)?;
    let epoch = micros
        .i64()?
        .apply_values(|us| us.div_euclid(1_000_000))
        .into_series()
        .with_name(format!("{name}_epoch").into());
    let hour = timestamp
        .hour()?
        .into_series()
        .cast(&DataType::UInt8)?
        .with_name(format!("{name}_hour").into());
    let dayofweek = timestamp
        .weekday()?
        .apply_values(|day| day - 1)
        .into_series()
        .cast(&DataType::UInt8)?
        .with_name(format!("{name}_dow").into());

    df.with_column(epoch)?;
    df.with_column(hour)?;
    df.with_column(dayofweek)?;
    Ok(())
}

/// Elapsed minutes between two coerced timestamp series, nullable.
fn duration_minutes(pickup: &Series, dropoff: &Series) -> Result<Series, TransformError> {
    let pickup_us = pickup.cast(&DataType::Int64)?;
    let dropoff_us = dropoff.cast(&DataType::Int64)?;
    let elapsed = dropoff_us.i64()? - pickup_us.i64()?;
    let minutes = elapsed
        .into_series()
        .cast(&DataType::Float64)?
        .f64()?
        .apply_values(|us| us / 60_000_000.0)
        .into_series()
        .with_name(columns::TRIP_DURATION_MIN.into());
    Ok(minutes)
}

/// Coerce any timestamp representation to `Datetime(µs)`; unparsable values
/// become null instead of raising.
fn coerce_datetime(column: &Column) -> Result<Series, TransformError> {
    let coerced = column.as_materialized_series().cast_with_options(
        &DataType::Datetime(TimeUnit::Microseconds, None),
        CastOptions::NonStrict,
    )?;
    Ok(coerced)
}

fn required<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, TransformError> {
    df.column(name).map_err(|_| TransformError::ColumnNotFound {
        column: name.to_string(),
    })
}
