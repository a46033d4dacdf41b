//! The preprocessing pipeline with explicit stages.
//!
//! Stages run in order, each taking the previous stage's table:
//! 1. **Load**: probe the schema, load the pruned column set
//! 2. **Features**: encode the flag, derive datetime features
//! 3. **Filter**: build the combined validity mask, apply it once
//! 4. **Narrow**: downcast numerics, dictionary-encode identifiers
//! 5. **Write**: persist as compressed Parquet (skipped on dry run)
//!
//! The table is one owned value moving left to right; the only
//! materializing copy after the load is the single filter application.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use trip_ingest::{TripTable, load_trip_table};
use trip_output::write_feature_table;
use trip_transform::{
    apply_validity_mask, build_validity_mask, encode_store_fwd_flag, extract_time_features,
    narrow_types,
};

use crate::types::{ColumnSummary, RunReport};

/// Inputs for one preprocessing run.
#[derive(Debug, Clone)]
pub struct PreprocessOptions<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    /// Run every stage except the writer.
    pub dry_run: bool,
}

/// Run the full pipeline and return the run report.
pub fn run_preprocess(options: &PreprocessOptions<'_>) -> Result<RunReport> {
    let run_span = info_span!(
        "preprocess",
        input = %options.input.display(),
        output = %options.output.display()
    );
    let _run_guard = run_span.enter();
    let run_start = Instant::now();

    // ========================================================================
    // Stage 1: Load
    // ========================================================================
    let table = info_span!("load").in_scope(|| -> Result<TripTable> {
        let start = Instant::now();
        let table = load_trip_table(options.input)
            .with_context(|| format!("load {}", options.input.display()))?;
        info!(
            rows = table.height(),
            columns = table.data.width(),
            pruned = table.pruned,
            duration_ms = start.elapsed().as_millis(),
            "input loaded"
        );
        Ok(table)
    })?;

    let input_rows = table.height();
    let input_columns = table.column_names();
    let capabilities = table.capabilities;
    let pruned = table.pruned;
    let mut df = table.data;

    // ========================================================================
    // Stage 2: Features
    // ========================================================================
    info_span!("features").in_scope(|| -> Result<()> {
        let start = Instant::now();
        encode_store_fwd_flag(&mut df, &capabilities).context("encode store_and_fwd_flag")?;
        extract_time_features(&mut df, &capabilities).context("extract time features")?;
        debug!(
            columns = df.width(),
            duration_ms = start.elapsed().as_millis(),
            "features derived"
        );
        Ok(())
    })?;

    // ========================================================================
    // Stage 3: Filter
    // ========================================================================
    let mut df = info_span!("filter").in_scope(|| -> Result<DataFrame> {
        let start = Instant::now();
        let mask = build_validity_mask(&df, &capabilities).context("build validity mask")?;
        let filtered = apply_validity_mask(df, &mask).context("apply validity mask")?;
        info!(
            input_rows,
            output_rows = filtered.height(),
            duration_ms = start.elapsed().as_millis(),
            "records filtered"
        );
        Ok(filtered)
    })?;

    // ========================================================================
    // Stage 4: Narrow
    // ========================================================================
    info_span!("narrow").in_scope(|| -> Result<()> {
        let start = Instant::now();
        narrow_types(&mut df).context("narrow column types")?;
        debug!(
            duration_ms = start.elapsed().as_millis(),
            "column types narrowed"
        );
        Ok(())
    })?;

    // ========================================================================
    // Stage 5: Write
    // ========================================================================
    let bytes_written = if options.dry_run {
        info!("dry run, output not written");
        None
    } else {
        let bytes = info_span!("write").in_scope(|| {
            write_feature_table(options.output, &mut df)
                .with_context(|| format!("write {}", options.output.display()))
        })?;
        Some(bytes)
    };

    let output_columns = column_summaries(&df);
    let output_rows = df.height();
    info!(
        input_rows,
        output_rows,
        rows_removed = input_rows - output_rows,
        duration_ms = run_start.elapsed().as_millis(),
        "preprocess complete"
    );

    Ok(RunReport {
        input_path: options.input.to_path_buf(),
        output_path: (!options.dry_run).then(|| options.output.to_path_buf()),
        pruned,
        capabilities,
        input_rows,
        input_columns,
        rows_removed: input_rows - output_rows,
        output_rows,
        output_columns,
        bytes_written,
    })
}

fn column_summaries(df: &DataFrame) -> Vec<ColumnSummary> {
    df.get_columns()
        .iter()
        .map(|column| ColumnSummary {
            name: column.name().to_string(),
            dtype: column.dtype().to_string(),
            null_count: column.null_count(),
        })
        .collect()
}
