use std::fs::File;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::info;

use trip_cli::pipeline::{PreprocessOptions, run_preprocess};
use trip_cli::types::RunReport;
use trip_ingest::probe_columns;

use crate::cli::{PreprocessArgs, SchemaArgs};
use crate::summary::apply_table_style;

pub fn run_preprocess_command(args: &PreprocessArgs) -> Result<RunReport> {
    let report = run_preprocess(&PreprocessOptions {
        input: &args.input,
        output: &args.output,
        dry_run: args.dry_run,
    })?;

    if let Some(path) = &args.report_json {
        let file = File::create(path)
            .with_context(|| format!("create report file {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)
            .with_context(|| format!("write report {}", path.display()))?;
        info!(path = %path.display(), "run report written");
    }

    Ok(report)
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let present = probe_columns(&args.input)
        .with_context(|| format!("probe schema of {}", args.input.display()))?;

    let mut table = Table::new();
    table.set_header(vec!["Column"]);
    apply_table_style(&mut table);
    for column in &present {
        table.add_row(vec![column.as_str()]);
    }
    println!("{table}");
    println!("{} columns", present.len());
    Ok(())
}
