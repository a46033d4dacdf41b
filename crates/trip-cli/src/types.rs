use std::path::PathBuf;

use serde::Serialize;

use trip_model::SchemaCapabilities;

/// Result of one preprocessing run, for the console summary and the
/// optional JSON report.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub input_path: PathBuf,
    /// Absent on a dry run.
    pub output_path: Option<PathBuf>,
    /// False when the schema probe failed and the fixed list was requested.
    pub pruned: bool,
    pub capabilities: SchemaCapabilities,
    pub input_rows: usize,
    pub input_columns: Vec<String>,
    pub rows_removed: usize,
    pub output_rows: usize,
    pub output_columns: Vec<ColumnSummary>,
    /// Absent on a dry run.
    pub bytes_written: Option<u64>,
}

/// One output column as written.
#[derive(Debug, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
}
