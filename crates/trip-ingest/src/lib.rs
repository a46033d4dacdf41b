//! Trip-record ingestion: schema probing and pruned Parquet loading.

pub mod error;
pub mod loader;
pub mod probe;

pub use error::IngestError;
pub use loader::{TripTable, load_trip_table};
pub use probe::probe_columns;
