//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Printed instead of a header-only table
pub const EMPTY_TABLE: &str = "No results found.";

/// Render rows with rounded borders and centred column headers
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return EMPTY_TABLE.to_string();
    }

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

#[derive(Debug, Tabled)]
struct FieldRow<'a> {
    #[tabled(rename = "FIELD")]
    field: &'a str,
    #[tabled(rename = "VALUE")]
    value: &'a str,
}

/// Two-column FIELD/VALUE table for a single object
pub fn format_fields(fields: &[(String, String)]) -> String {
    let rows: Vec<FieldRow<'_>> = fields
        .iter()
        .map(|(field, value)| FieldRow { field, value })
        .collect();
    format_table(&rows)
}
