//! Pruned loading of the trip-record table.
//!
//! The scan projection is the load plan's column list, so I/O and memory
//! scale with the columns the pipeline actually uses. Leakage columns are
//! excluded from the request itself; they never exist in memory, even
//! transiently.

use std::path::Path;

use polars::prelude::{DataFrame, col};
use tracing::{debug, warn};

use trip_model::{LoadPlan, SchemaCapabilities};

use crate::error::IngestError;
use crate::probe::{probe_columns, scan};

/// The loaded table plus the capability descriptor every downstream stage
/// consumes.
#[derive(Debug)]
pub struct TripTable {
    /// Row data, restricted to the planned columns.
    pub data: DataFrame,
    /// Column presence, computed once from the realized frame.
    pub capabilities: SchemaCapabilities,
    /// False when the schema probe failed and the fixed list was requested.
    pub pruned: bool,
}

impl TripTable {
    /// Row count of the loaded table.
    pub fn height(&self) -> usize {
        self.data.height()
    }

    /// Column names of the loaded table.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }
}

/// Load exactly the planned columns from `path`.
///
/// Probe failure degrades to the fixed request list; a column missing at
/// load time then surfaces as [`IngestError::ColumnLoad`].
pub fn load_trip_table(path: &Path) -> Result<TripTable, IngestError> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let present = match probe_columns(path) {
        Ok(present) => Some(present),
        Err(error) => {
            warn!(
                path = %path.display(),
                %error,
                "schema probe failed, requesting fixed column list"
            );
            None
        }
    };
    let plan = LoadPlan::new(present.as_ref());
    debug!(
        path = %path.display(),
        requested = plan.columns.len(),
        pruned = plan.pruned,
        "column load plan ready"
    );

    let projection: Vec<_> = plan.columns.iter().map(|name| col(name.as_str())).collect();
    let data = scan(path)?
        .select(projection)
        .collect()
        .map_err(|source| IngestError::ColumnLoad {
            path: path.to_path_buf(),
            source,
        })?;

    let capabilities =
        SchemaCapabilities::from_columns(data.get_column_names().iter().map(|name| name.as_str()));
    if !capabilities.has_target {
        warn!(
            path = %path.display(),
            "target column absent, target filtering will be skipped"
        );
    }
    for column in capabilities.missing() {
        debug!(column, "optional column absent, reduced schema");
    }
    debug!(
        rows = data.height(),
        columns = data.width(),
        "trip table loaded"
    );

    Ok(TripTable {
        data,
        capabilities,
        pruned: plan.pruned,
    })
}
