//! Output formatting for CLI results

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::error::Result;

pub mod formatters;
pub mod json;
pub mod table;

/// A titled set of label/value pairs describing one object
#[derive(Debug, Clone, Default)]
pub struct Fields {
    title: String,
    rows: Vec<(String, String)>,
}

impl Fields {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn field(mut self, label: impl Into<String>, value: impl ToString) -> Self {
        self.rows.push((label.into(), value.to_string()));
        self
    }

    /// Heading plus aligned `label: value` lines
    pub fn render_pretty(&self) -> String {
        let width = self.rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0) + 1;
        let mut out = format!("{}\n{}\n", self.title.bold(), "─".repeat(40));
        for (label, value) in &self.rows {
            out.push_str(&format!("{:<width$} {}\n", format!("{}:", label), value));
        }
        out.trim_end().to_string()
    }
}

/// Print a single object: `fields` for humans, `data` for JSON
pub fn print_fields<T: Serialize + ?Sized>(
    fields: &Fields,
    data: &T,
    format: OutputFormat,
) -> Result<()> {
    let output = match format {
        OutputFormat::Pretty => fields.render_pretty(),
        OutputFormat::Table => table::format_fields(&fields.rows),
        OutputFormat::Json => json::format_json(data)?,
    };
    println!("{}", output);
    Ok(())
}

/// Print a list: `rows` as a table for humans, `data` for JSON
pub fn print_rows<R: Tabled, T: Serialize + ?Sized>(
    rows: &[R],
    data: &T,
    format: OutputFormat,
) -> Result<()> {
    let output = match format {
        OutputFormat::Pretty | OutputFormat::Table => table::format_table(rows),
        OutputFormat::Json => json::format_json(data)?,
    };
    println!("{}", output);
    Ok(())
}
