//! Compiled-in column sets for the trip-record dataset.
//!
//! The pipeline has no configuration file; the column universe is fixed at
//! build time. Presence of any individual column in an input file is still
//! optional (see [`crate::SchemaCapabilities`]).

/// Prediction target: total trip amount in dollars.
pub const TARGET: &str = "total_amount";

/// Monetary sub-components of the target. These would make a model trivially
/// accurate, so they are never requested from storage and never appear in any
/// intermediate or output schema.
pub const LEAKAGE_COLUMNS: [&str; 8] = [
    "fare_amount",
    "extra",
    "mta_tax",
    "tip_amount",
    "tolls_amount",
    "improvement_surcharge",
    "congestion_surcharge",
    "airport_fee",
];

/// Primary pickup timestamp column.
pub const PICKUP_TS: &str = "tpep_pickup_datetime";

/// Primary dropoff timestamp column.
pub const DROPOFF_TS: &str = "tpep_dropoff_datetime";

/// Legacy pickup timestamp column found in older exports.
pub const LEGACY_PICKUP_TS: &str = "pickup_datetime";

/// Legacy dropoff timestamp column found in older exports.
pub const LEGACY_DROPOFF_TS: &str = "dropoff_datetime";

/// Every raw timestamp column; all of them are consumed by feature
/// extraction and none may survive into the output schema.
pub const RAW_TIMESTAMP_COLUMNS: [&str; 4] =
    [PICKUP_TS, DROPOFF_TS, LEGACY_PICKUP_TS, LEGACY_DROPOFF_TS];

/// Trip distance in miles; kept as a passthrough numeric feature.
pub const TRIP_DISTANCE: &str = "trip_distance";

/// Two-valued store-and-forward code ("Y"/"N"), re-encoded to 1/0.
pub const STORE_AND_FWD_FLAG: &str = "store_and_fwd_flag";

/// Passthrough feature columns requested from storage when present.
pub const FEATURE_COLUMNS: [&str; 6] = [
    TRIP_DISTANCE,
    "passenger_count",
    STORE_AND_FWD_FLAG,
    "payment_type",
    "vendor_id",
    "rate_code",
];

/// Low-cardinality identifier columns stored dictionary-encoded when they
/// arrive as strings.
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["payment_type", "vendor_id", "rate_code"];

/// Derived: pickup hour of day, 0-23.
pub const PICKUP_HOUR: &str = "pickup_hour";

/// Derived: pickup day of week, 0-6 with Monday = 0.
pub const PICKUP_DAYOFWEEK: &str = "pickup_dayofweek";

/// Derived: pickup month, 1-12.
pub const PICKUP_MONTH: &str = "pickup_month";

/// Derived: trip duration in minutes, dropoff minus pickup.
pub const TRIP_DURATION_MIN: &str = "trip_duration_min";

/// Default input path when none is given on the command line.
pub const DEFAULT_INPUT_PATH: &str = "yellow_all.parquet";

/// Default output path when none is given on the command line.
pub const DEFAULT_OUTPUT_PATH: &str = "yellow_all_preprocessed.parquet";

/// The full fixed set of columns the loader may request: target, passthrough
/// features, and both timestamp pairs. Leakage columns are excluded by
/// construction.
pub fn requested_columns() -> Vec<&'static str> {
    let mut columns = vec![TARGET];
    columns.extend(FEATURE_COLUMNS);
    columns.extend(RAW_TIMESTAMP_COLUMNS);
    columns
}

/// Returns true if `name` is one of the leakage columns.
pub fn is_leakage_column(name: &str) -> bool {
    LEAKAGE_COLUMNS.contains(&name)
}

/// Returns true if `name` is one of the designated identifier columns.
pub fn is_categorical_column(name: &str) -> bool {
    CATEGORICAL_COLUMNS.contains(&name)
}
