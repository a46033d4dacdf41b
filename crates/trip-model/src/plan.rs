//! Load planning: which columns to request from storage.

use std::collections::BTreeSet;

use crate::columns;

/// The column projection handed to the Parquet scan.
///
/// `pruned` records whether the plan was intersected with a probed schema or
/// is the best-effort fixed list (degraded path when metadata could not be
/// read).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadPlan {
    /// Columns to request, in the fixed request order.
    pub columns: Vec<String>,
    /// True when the plan was intersected with the file's probed schema.
    pub pruned: bool,
}

impl LoadPlan {
    /// Compute `(target ∪ features ∪ timestamps) ∩ present \ leakage`.
    ///
    /// With `present == None` (probe failure) the full fixed list is
    /// requested and a missing column becomes a load-time error instead.
    pub fn new(present: Option<&BTreeSet<String>>) -> Self {
        let requested = columns::requested_columns();
        let columns = requested
            .into_iter()
            .filter(|name| !columns::is_leakage_column(name))
            .filter(|name| present.is_none_or(|schema| schema.contains(*name)))
            .map(str::to_string)
            .collect();
        Self {
            columns,
            pruned: present.is_some(),
        }
    }
}
