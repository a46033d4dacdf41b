use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use trip_cli::types::RunReport;

pub fn print_summary(report: &RunReport) {
    println!("Input: {} ({} rows)", report.input_path.display(), report.input_rows);
    match &report.output_path {
        Some(path) => println!("Output: {} ({} rows)", path.display(), report.output_rows),
        None => println!("Output: (dry run, {} rows)", report.output_rows),
    }
    println!(
        "Removed {} invalid rows; {} columns loaded ({})",
        report.rows_removed,
        report.input_columns.len(),
        if report.pruned { "probed schema" } else { "fixed list" },
    );
    println!("Loaded columns: {}", report.input_columns.join(", "));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Nulls"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for column in &report.output_columns {
        table.add_row(vec![
            Cell::new(&column.name),
            Cell::new(&column.dtype),
            null_count_cell(column.null_count),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn null_count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
