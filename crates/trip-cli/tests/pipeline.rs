//! End-to-end pipeline tests: real Parquet in, real Parquet out.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{
    Column, DataFrame, DataType, NamedFrom, ParquetReader, ParquetWriter, SerReader, Series,
};
use tempfile::TempDir;

use trip_cli::pipeline::{PreprocessOptions, run_preprocess};
use trip_model::columns;

fn write_parquet(path: &Path, columns: Vec<Column>) {
    let mut df = DataFrame::new(columns).expect("build frame");
    let file = File::create(path).expect("create parquet");
    ParquetWriter::new(file).finish(&mut df).expect("write parquet");
}

fn read_parquet(path: &Path) -> DataFrame {
    ParquetReader::new(File::open(path).expect("open parquet"))
        .finish()
        .expect("read parquet")
}

/// Input with leakage columns, a bad timestamp, a null target, a negative
/// distance and a reversed trip, plus an unknown flag code.
fn write_sample_input(path: &Path) {
    write_parquet(
        path,
        vec![
            Series::new(
                columns::TARGET.into(),
                &[
                    Some(14.5f64),
                    Some(9.0),
                    None,
                    Some(22.0),
                    Some(7.5),
                    Some(11.0),
                ],
            )
            .into(),
            Series::new("fare_amount".into(), &[12.0f64, 7.0, 3.0, 18.0, 6.0, 9.0]).into(),
            Series::new("tip_amount".into(), &[2.5f64, 2.0, 0.0, 4.0, 1.5, 2.0]).into(),
            Series::new(
                columns::TRIP_DISTANCE.into(),
                &[2.5f64, 1.2, 0.8, 8.1, -0.5, 3.3],
            )
            .into(),
            Series::new("passenger_count".into(), &[1i64, 2, 1, 3, 1, 2]).into(),
            Series::new(
                columns::STORE_AND_FWD_FLAG.into(),
                &["N", "Y", "N", "X", "N", "N"],
            )
            .into(),
            Series::new("payment_type".into(), &["card", "cash", "card", "card", "cash", "card"])
                .into(),
            Series::new(
                columns::PICKUP_TS.into(),
                &[
                    "2024-03-04T08:30:00",
                    "not a timestamp",
                    "2024-03-04T10:00:00",
                    "2024-03-04T22:10:00",
                    "2024-03-04T11:00:00",
                    "2024-03-04T12:00:00",
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
                    "2024-03-04T11:45:00",
                ],
            )
            .into(),
        ],
    );
}

fn run(input: &Path, output: &Path, dry_run: bool) -> trip_cli::types::RunReport {
    run_preprocess(&PreprocessOptions {
        input,
        output,
        dry_run,
    })
    .expect("run pipeline")
}

fn paths(dir: &TempDir) -> (PathBuf, PathBuf) {
    (
        dir.path().join("input.parquet"),
        dir.path().join("output.parquet"),
    )
}

#[test]
fn output_satisfies_every_invariant() {
    let dir = TempDir::new().expect("temp dir");
    let (input, output) = paths(&dir);
    write_sample_input(&input);

    let report = run(&input, &output, false);

    // Bad timestamp, null target, negative distance and reversed trip drop.
    assert_eq!(report.input_rows, 6);
    assert_eq!(report.output_rows, 2);
    assert_eq!(report.rows_removed, 4);
    assert!(report.pruned);
    assert!(report.bytes_written.is_some());

    let df = read_parquet(&output);
    assert_eq!(df.height(), 2);

    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    for leakage in columns::LEAKAGE_COLUMNS {
        assert!(!names.contains(&leakage.to_string()), "{leakage} leaked");
    }
    for raw in columns::RAW_TIMESTAMP_COLUMNS {
        assert!(!names.contains(&raw.to_string()), "{raw} survived");
    }

    // Survivors keep input order: rows 0 and 3.
    let target = df.column(columns::TARGET).unwrap().f32().unwrap();
    assert_eq!(target.get(0), Some(14.5));
    assert_eq!(target.get(1), Some(22.0));

    let duration = df.column(columns::TRIP_DURATION_MIN).unwrap().f32().unwrap();
    assert_eq!(duration.get(0), Some(18.0));
    assert_eq!(duration.get(1), Some(30.0));

    // Narrowed widths.
    assert_eq!(df.column(columns::TARGET).unwrap().dtype(), &DataType::Float32);
    assert_eq!(df.column(columns::PICKUP_HOUR).unwrap().dtype(), &DataType::UInt8);
    assert_eq!(
        df.column("passenger_count").unwrap().dtype(),
        &DataType::UInt8
    );

    // Flag: "N" -> 0 on row 0, unknown "X" -> null on row 3 (kept).
    let flag = df.column(columns::STORE_AND_FWD_FLAG).unwrap().u8().unwrap();
    assert_eq!(flag.get(0), Some(0));
    assert_eq!(flag.get(1), None);

    // Identifier column survives with its values intact.
    let payment = df
        .column("payment_type")
        .unwrap()
        .as_materialized_series()
        .cast(&DataType::String)
        .unwrap();
    let payment = payment.str().unwrap();
    assert_eq!(payment.get(0), Some("card"));
    assert_eq!(payment.get(1), Some("card"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let (input, output) = paths(&dir);
    write_sample_input(&input);

    let report = run(&input, &output, true);

    assert!(report.output_path.is_none());
    assert!(report.bytes_written.is_none());
    assert!(!output.exists());
    assert_eq!(report.output_rows, 2);
}

#[test]
fn missing_target_column_degrades_instead_of_failing() {
    let dir = TempDir::new().expect("temp dir");
    let (input, output) = paths(&dir);
    write_parquet(
        &input,
        vec![
            Series::new(columns::TRIP_DISTANCE.into(), &[1.0f64, 2.0]).into(),
            Series::new(
                columns::PICKUP_TS.into(),
                &["2024-03-04T08:30:00", "2024-03-04T09:00:00"],
            )
            .into(),
            Series::new(
                columns::DROPOFF_TS.into(),
                &["2024-03-04T08:45:00", "2024-03-04T09:20:00"],
            )
            .into(),
        ],
    );

    let report = run(&input, &output, false);

    assert!(!report.capabilities.has_target);
    assert_eq!(report.output_rows, 2);
    let df = read_parquet(&output);
    assert!(df.column(columns::TRIP_DURATION_MIN).is_ok());
}

#[test]
fn empty_filter_result_still_writes_schema() {
    let dir = TempDir::new().expect("temp dir");
    let (input, output) = paths(&dir);
    write_parquet(
        &input,
        vec![
            Series::new(columns::TARGET.into(), &[-1.0f64, -2.0]).into(),
            Series::new(columns::TRIP_DISTANCE.into(), &[1.0f64, 2.0]).into(),
        ],
    );

    let report = run(&input, &output, false);

    assert_eq!(report.output_rows, 0);
    let df = read_parquet(&output);
    assert_eq!(df.height(), 0);
    assert!(df.column(columns::TARGET).is_ok());
    assert!(df.column(columns::TRIP_DISTANCE).is_ok());
}

#[test]
fn missing_input_file_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let (input, output) = paths(&dir);

    let error = run_preprocess(&PreprocessOptions {
        input: &input,
        output: &output,
        dry_run: false,
    })
    .expect_err("missing input must fail");
    assert!(error.to_string().contains("load"));
}

#[test]
fn legacy_timestamp_input_gets_epoch_features() {
    let dir = TempDir::new().expect("temp dir");
    let (input, output) = paths(&dir);
    write_parquet(
        &input,
        vec![
            Series::new(columns::TARGET.into(), &[10.0f64]).into(),
            Series::new(columns::LEGACY_PICKUP_TS.into(), &["2020-01-01T06:00:00"]).into(),
            Series::new(columns::LEGACY_DROPOFF_TS.into(), &["2020-01-01T06:30:00"]).into(),
        ],
    );

    let report = run(&input, &output, false);
    assert!(report.capabilities.has_legacy_pickup);

    let df = read_parquet(&output);
    assert!(df.column("pickup_datetime_epoch").is_ok());
    assert!(df.column("dropoff_datetime_epoch").is_ok());
    assert!(df.column(columns::LEGACY_PICKUP_TS).is_err());
    assert!(df.column(columns::LEGACY_DROPOFF_TS).is_err());
    // No primary pair, so no duration column either.
    assert!(df.column(columns::TRIP_DURATION_MIN).is_err());
}
