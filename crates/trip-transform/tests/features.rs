//! End-to-end transform tests over in-memory frames: feature derivation,
//! combined filtering and narrowing chained the way the pipeline runs them.

use polars::prelude::{DataFrame, DataType, NamedFrom, Series};

use trip_model::{SchemaCapabilities, columns};
use trip_transform::{
    apply_validity_mask, build_validity_mask, encode_store_fwd_flag, extract_time_features,
    narrow_types,
};

fn capabilities_of(df: &DataFrame) -> SchemaCapabilities {
    SchemaCapabilities::from_columns(df.get_column_names().iter().map(|name| name.as_str()))
}

fn run_transform(mut df: DataFrame) -> DataFrame {
    let capabilities = capabilities_of(&df);
    encode_store_fwd_flag(&mut df, &capabilities).expect("encode flag");
    extract_time_features(&mut df, &capabilities).expect("extract features");
    let mask = build_validity_mask(&df, &capabilities).expect("build mask");
    let mut df = apply_validity_mask(df, &mask).expect("apply mask");
    narrow_types(&mut df).expect("narrow");
    df
}

fn sample_frame() -> DataFrame {
    DataFrame::new(vec![
        Series::new(
            columns::TARGET.into(),
            &[Some(14.5f64), None, Some(8.0), Some(20.0), Some(-3.0)],
        )
        .into(),
        Series::new(
            columns::TRIP_DISTANCE.into(),
            &[Some(2.5f64), Some(1.0), Some(-0.5), Some(7.5), Some(3.0)],
        )
        .into(),
        Series::new(
            columns::STORE_AND_FWD_FLAG.into(),
            &[Some("N"), Some("Y"), Some("N"), Some("X"), Some("N")],
        )
        .into(),
        Series::new(
            columns::PICKUP_TS.into(),
            &[
                "2024-03-04T08:30:00",
                "2024-03-04T09:00:00",
                "2024-03-04T10:00:00",
                "2024-03-04T22:10:00",
                "2024-03-04T11:00:00",
            ],
        )
        .into(),
        Series::new(
            columns::DROPOFF_TS.into(),
            &[
                "2024-03-04T08:48:00",
                "2024-03-04T09:20:00",
                "2024-03-04T10:12:00",
                "2024-03-04T22:40:00",
                "2024-03-04T11:30:00",
            ],
        )
        .into(),
    ])
    .unwrap()
}

#[test]
fn surviving_rows_satisfy_every_output_invariant() {
    let df = run_transform(sample_frame());

    // Row 1 (null target), row 2 (negative distance) and row 4 (negative
    // target) drop; rows 0 and 3 survive in input order.
    assert_eq!(df.height(), 2);

    let target = df.column(columns::TARGET).unwrap().f32().unwrap();
    assert_eq!(target.get(0), Some(14.5));
    assert_eq!(target.get(1), Some(20.0));

    let duration = df.column(columns::TRIP_DURATION_MIN).unwrap().f32().unwrap();
    assert_eq!(duration.get(0), Some(18.0));
    assert_eq!(duration.get(1), Some(30.0));

    let names = df.get_column_names();
    for leakage in columns::LEAKAGE_COLUMNS {
        assert!(!names.iter().any(|name| name.as_str() == leakage));
    }
    for raw in columns::RAW_TIMESTAMP_COLUMNS {
        assert!(!names.iter().any(|name| name.as_str() == raw));
    }
}

#[test]
fn unknown_flag_code_is_nulled_but_not_filtered() {
    let df = run_transform(sample_frame());

    // Row 3 had flag "X" and survives with a null flag.
    let flag = df.column(columns::STORE_AND_FWD_FLAG).unwrap().u8().unwrap();
    assert_eq!(flag.get(0), Some(0));
    assert_eq!(flag.get(1), None);
}

#[test]
fn dropoff_before_pickup_is_excluded() {
    let df = DataFrame::new(vec![
        Series::new(columns::TARGET.into(), &[10.0f64, 12.0]).into(),
        Series::new(
            columns::PICKUP_TS.into(),
            &["2024-03-04T09:00:00", "2024-03-04T09:00:00"],
        )
        .into(),
        Series::new(
            columns::DROPOFF_TS.into(),
            &["2024-03-04T08:45:00", "2024-03-04T09:30:00"],
        )
        .into(),
    ])
    .unwrap();

    let df = run_transform(df);

    assert_eq!(df.height(), 1);
    assert_eq!(
        df.column(columns::TARGET).unwrap().f32().unwrap().get(0),
        Some(12.0)
    );
}

#[test]
fn missing_legacy_columns_produce_no_legacy_features_and_no_error() {
    let df = run_transform(sample_frame());

    let names = df.get_column_names();
    assert!(!names.iter().any(|name| name.as_str() == "pickup_datetime_epoch"));
    assert!(!names.iter().any(|name| name.as_str() == "pickup_datetime_hour"));
    assert!(!names.iter().any(|name| name.as_str() == "pickup_datetime_dow"));
}

#[test]
fn both_timestamp_paths_fire_when_both_are_present() {
    let df = DataFrame::new(vec![
        Series::new(columns::TARGET.into(), &[10.0f64]).into(),
        Series::new(columns::PICKUP_TS.into(), &["2024-03-04T08:30:00"]).into(),
        Series::new(columns::DROPOFF_TS.into(), &["2024-03-04T08:45:00"]).into(),
        Series::new(columns::LEGACY_PICKUP_TS.into(), &["2020-01-01T06:00:00"]).into(),
        Series::new(columns::LEGACY_DROPOFF_TS.into(), &["2020-01-01T06:30:00"]).into(),
    ])
    .unwrap();

    let df = run_transform(df);

    assert_eq!(df.height(), 1);
    assert_eq!(
        df.column(columns::PICKUP_HOUR).unwrap().u8().unwrap().get(0),
        Some(8)
    );
    assert_eq!(
        df.column("pickup_datetime_hour").unwrap().u8().unwrap().get(0),
        Some(6)
    );
    assert_eq!(
        df.column("dropoff_datetime_hour").unwrap().u8().unwrap().get(0),
        Some(6)
    );
    let epoch = df.column("pickup_datetime_epoch").unwrap();
    // Epoch seconds survive narrowing as an unsigned width, value unchanged.
    assert_eq!(
        epoch
            .as_materialized_series()
            .cast(&DataType::Int64)
            .unwrap()
            .i64()
            .unwrap()
            .get(0),
        Some(1_577_858_400)
    );
}

#[test]
fn empty_frame_filters_to_empty_without_error() {
    let df = DataFrame::new(vec![
        Series::new(columns::TARGET.into(), &Vec::<f64>::new()).into(),
        Series::new(columns::TRIP_DISTANCE.into(), &Vec::<f64>::new()).into(),
    ])
    .unwrap();

    let df = run_transform(df);
    assert_eq!(df.height(), 0);
    assert_eq!(df.width(), 2);
}
