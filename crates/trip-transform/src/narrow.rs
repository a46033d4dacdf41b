//! Type narrowing.
//!
//! Purely a storage-footprint optimization: floats shrink to the smallest
//! width covering the domain, integers to the smallest width holding the
//! observed range, and designated string identifiers become dictionary
//! encoded. Values keep their logical meaning and no nulls are introduced.

use polars::prelude::{Categories, Column, DataFrame, DataType};
use tracing::debug;

use trip_model::columns;

use crate::error::TransformError;

/// Narrow every column of the frame in place. Idempotent: a second pass
/// finds nothing left to shrink.
pub fn narrow_types(df: &mut DataFrame) -> Result<(), TransformError> {
    let names = df.get_column_names_owned();
    for name in names {
        let column = df.column(name.as_str())?;
        if let Some(dtype) = narrowed_dtype(name.as_str(), column)? {
            let narrowed = column.as_materialized_series().cast(&dtype)?;
            debug!(column = name.as_str(), to = %dtype, "column narrowed");
            df.with_column(narrowed)?;
        }
    }
    Ok(())
}

/// The dtype `column` should shrink to, or `None` when it is already as
/// narrow as it can get (or carries no observed values to measure).
fn narrowed_dtype(name: &str, column: &Column) -> Result<Option<DataType>, TransformError> {
    let dtype = column.dtype();
    match dtype {
        DataType::Float64 => Ok(Some(DataType::Float32)),
        DataType::String if columns::is_categorical_column(name) => {
            Ok(Some(DataType::from_categories(Categories::global())))
        }
        _ if dtype.is_integer() => {
            let series = column.as_materialized_series();
            let (Some(min), Some(max)) = (series.min::<i64>()?, series.max::<i64>()?) else {
                // All-null or out of i64 range: nothing safe to do.
                return Ok(None);
            };
            let narrowest = narrowest_int_dtype(min, max);
            Ok((narrowest != *dtype).then_some(narrowest))
        }
        _ => Ok(None),
    }
}

/// Smallest integer dtype holding `[min, max]`, preferring unsigned when the
/// range allows it.
fn narrowest_int_dtype(min: i64, max: i64) -> DataType {
    if min >= 0 {
        if max <= i64::from(u8::MAX) {
            DataType::UInt8
        } else if max <= i64::from(u16::MAX) {
            DataType::UInt16
        } else if max <= i64::from(u32::MAX) {
            DataType::UInt32
        } else {
            DataType::UInt64
        }
    } else if min >= i64::from(i8::MIN) && max <= i64::from(i8::MAX) {
        DataType::Int8
    } else if min >= i64::from(i16::MIN) && max <= i64::from(i16::MAX) {
        DataType::Int16
    } else if min >= i64::from(i32::MIN) && max <= i64::from(i32::MAX) {
        DataType::Int32
    } else {
        DataType::Int64
    }
}
