// src/render.rs

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::query::{QueryOutcome, RosterRecord};
use crate::schema::Schema;

pub const NO_MATCHES: &str = "No matching characters found in the database.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Grid,
    Tsv,
    Json,
}

/// `hp_max_total` → `Hp Max Total`. Letters that follow a non-letter are
/// upper-cased, every other letter is lower-cased.
pub fn display_name(column: &str) -> String {
    let mut out = String::with_capacity(column.len());
    let mut prev_letter = false;
    for ch in column.replace('_', " ").chars() {
        if ch.is_alphabetic() {
            if prev_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(ch);
            prev_letter = false;
        }
    }
    out
}

fn grid(header: Vec<String>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        header
            .into_iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

#[derive(Serialize)]
struct JsonOutcome<'a> {
    columns: &'a [String],
    rows: &'a [RosterRecord],
}

/// Render query results. An empty result renders as the no-match message.
pub fn render_outcome(outcome: &QueryOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Grid => {
            if outcome.is_empty() {
                return NO_MATCHES.to_string();
            }
            let mut table = grid(outcome.columns.iter().map(|c| display_name(c)).collect());
            for row in &outcome.rows {
                table.add_row(row.values.iter().map(|v| v.to_string()).collect::<Vec<_>>());
            }
            format!("Results:\n\n{}", table)
        }
        OutputFormat::Tsv => {
            let mut lines = vec![outcome.columns.join("\t")];
            lines.extend(outcome.rows.iter().map(|row| {
                row.values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join("\t")
            }));
            lines.join("\n")
        }
        OutputFormat::Json => serde_json::to_string_pretty(&JsonOutcome {
            columns: &outcome.columns,
            rows: &outcome.rows,
        })
        .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
    }
}

/// Single-column grid of names, used when a requested column is unknown.
pub fn render_valid_columns(valid_columns: &[String]) -> String {
    let mut table = grid(vec!["Valid Columns".to_string()]);
    for name in valid_columns {
        table.add_row(vec![name.clone()]);
    }
    table.to_string()
}

/// Sorted listing of the live schema with declared types.
pub fn render_schema(schema: &Schema) -> String {
    let mut cols = schema.columns.clone();
    cols.sort_by(|a, b| a.name.cmp(&b.name));
    let mut table = grid(vec!["Column".to_string(), "Type".to_string()]);
    for c in cols {
        table.add_row(vec![c.name, c.ty.to_string()]);
    }
    table.to_string()
}
