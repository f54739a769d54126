use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dtx_cli::types::{DigitizeRow, InputResult};

/// Values shown per tensor before the preview is cut off.
const PREVIEW_LEN: usize = 8;

pub fn print_input_summary(result: &InputResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("DType"),
        header_cell("Shape"),
        header_cell("Elements"),
        header_cell("Bytes"),
        header_cell("NaN"),
        header_cell("Values"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for tensor in &result.tensors {
        let nan = tensor.nan_count();
        table.add_row(vec![
            Cell::new(tensor.index),
            Cell::new(tensor.dtype),
            Cell::new(format!("{:?}", tensor.shape)),
            Cell::new(tensor.values.len()),
            Cell::new(tensor.bytes),
            count_cell(nan, Color::Yellow),
            Cell::new(preview(&tensor.values)),
        ]);
    }
    println!("{table}");
}

pub fn print_digitize_summary(rows: &[DigitizeRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Value"),
        header_cell("Weekday"),
        header_cell("Year"),
        header_cell("Hour"),
        header_cell("Minute"),
        header_cell("Second"),
        header_cell("Month"),
        header_cell("Week"),
    ]);
    apply_table_style(&mut table);
    for column in 1..8 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for row in rows {
        let mut cells = vec![Cell::new(&row.value)];
        match &row.outcome {
            Ok(digits) => cells.extend(digits.to_array().into_iter().map(Cell::new)),
            Err(reason) => cells.push(
                Cell::new(reason)
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
            ),
        }
        table.add_row(cells);
    }
    println!("{table}");
}

fn preview(values: &[f64]) -> String {
    let mut parts: Vec<String> = values
        .iter()
        .take(PREVIEW_LEN)
        .map(|v| if v.is_nan() { "NaN".to_string() } else { v.to_string() })
        .collect();
    if values.len() > PREVIEW_LEN {
        parts.push(format!("… +{}", values.len() - PREVIEW_LEN));
    }
    parts.join(", ")
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
