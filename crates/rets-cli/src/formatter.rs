//! Output formatters for search requests and rows.

use clap::ValueEnum;
use comfy_table::Table;
use rets_proto::{FieldRef, Row, SearchRequest};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Trait for formatting output.
pub trait Formatter {
    /// Format a translated search request.
    fn format_request(&self, request: &SearchRequest) -> String;

    /// Format result rows, with the selected fields as the leading columns.
    fn format_rows(&self, rows: &[Row], fields: &[FieldRef]) -> String;
}

/// Create a formatter for the given output format.
pub fn create_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Table => Box::new(TableFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

/// Table formatter using comfy-table.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_request(&self, request: &SearchRequest) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Argument", "Value"]);
        for (name, value) in request_pairs(request) {
            table.add_row(vec![name, value]);
        }
        table.to_string()
    }

    fn format_rows(&self, rows: &[Row], fields: &[FieldRef]) -> String {
        if rows.is_empty() {
            return "No results".to_string();
        }

        let columns = columns(rows, fields);
        let mut table = Table::new();
        table.set_header(columns.clone());
        for row in rows {
            table.add_row(columns.iter().map(|c| row.get(c).unwrap_or("")));
        }

        format!("{}\n{} row(s)", table, rows.len())
    }
}

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_request(&self, request: &SearchRequest) -> String {
        serde_json::to_string_pretty(request).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_rows(&self, rows: &[Row], _fields: &[FieldRef]) -> String {
        serde_json::to_string_pretty(rows).unwrap_or_else(|_| "[]".to_string())
    }
}

/// CSV formatter.
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_request(&self, request: &SearchRequest) -> String {
        let mut output = String::from("argument,value\n");
        for (name, value) in request_pairs(request) {
            output.push_str(&format!("{},{}\n", name, csv_field(value)));
        }
        output
    }

    fn format_rows(&self, rows: &[Row], fields: &[FieldRef]) -> String {
        let columns = columns(rows, fields);
        let mut output = columns
            .iter()
            .map(|c| csv_field(c))
            .collect::<Vec<_>>()
            .join(",");
        output.push('\n');

        for row in rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|c| csv_field(row.get(c).unwrap_or("")))
                .collect();
            output.push_str(&cells.join(","));
            output.push('\n');
        }

        output
    }
}

/// The search arguments in the order a RETS client sends them.
fn request_pairs(request: &SearchRequest) -> Vec<(&str, &str)> {
    let mut pairs = vec![
        ("SearchType", request.resource.as_str()),
        ("Class", request.class.as_str()),
        ("Query", request.dmql.as_str()),
    ];
    pairs.extend(request.options.to_pairs());
    pairs
}

/// Column names: selected fields in select order, then the other fields rows
/// carry, in order of first appearance.
///
/// Selected fields no row carries are left out.
fn columns(rows: &[Row], fields: &[FieldRef]) -> Vec<String> {
    let selected = fields
        .iter()
        .map(FieldRef::as_str)
        .filter(|field| rows.iter().any(|row| row.get(field).is_some()));
    let carried = rows.iter().flat_map(|row| row.iter().map(|(field, _)| field));

    let mut columns: Vec<String> = Vec::new();
    for field in selected.chain(carried) {
        if !columns.iter().any(|c| c == field) {
            columns.push(field.to_string());
        }
    }
    columns
}

/// Quote a CSV field when it needs it.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", escape_csv(s))
    } else {
        s.to_string()
    }
}

/// Escape a string for CSV.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}
