use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell, ColumnConstraint, ContentArrangement, Table, Width};

use super::ReportRow;

const HEADER: [&str; 4] = ["PR Number", "Title", "PR Type", "Result"];
const TITLE_COLUMN: usize = 1;

/// Build the fixed-width table for one report bucket.
///
/// The title column is capped at `title_width` and wraps beyond it.
pub fn bucket_table(rows: &[ReportRow], title_width: u16) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .force_no_tty()
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(HEADER.to_vec());

    for row in rows {
        table.add_row(vec![
            Cell::new(row.number),
            Cell::new(&row.title),
            Cell::new(&row.kind),
            Cell::new(&row.result),
        ]);
    }

    if let Some(column) = table.column_mut(TITLE_COLUMN) {
        column.set_constraint(ColumnConstraint::UpperBoundary(Width::Fixed(title_width)));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_header_and_rows() {
        let rows = vec![ReportRow::new(42, "Fix the thing", "PR", "Label 'type:bug' added")];
        let text = bucket_table(&rows, 60).to_string();
        for cell in ["PR Number", "Title", "PR Type", "Result", "42", "Fix the thing"] {
            assert!(text.contains(cell), "missing {cell} in:\n{text}");
        }
    }

    #[test]
    fn test_long_title_wraps() {
        let title = "aaaa bbbb cccc dddd eeee ffff";
        let rows = vec![ReportRow::new(1, title, "PR", "ok")];
        let text = bucket_table(&rows, 10).to_string();
        assert!(!text.contains(title));
        assert!(text.contains("aaaa"));
    }
}
