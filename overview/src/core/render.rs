//! Terminal output for the overview table and messages

use std::path::Path;

use costcenter::{ColumnSpec, Row, project};

use super::constants::APP_NAME;
use crate::domain::Message;
use crate::utils::string::fit_width;
use crate::utils::terminal::file_link;

const MAX_COLUMN_WIDTH: usize = 40;
const COLUMN_GAP: &str = "  ";

/// Print the visible rows as an aligned table
pub fn print_table(columns: &[ColumnSpec], rows: &[&Row]) {
    println!();
    println!(
        "  \x1b[1m\x1b[36m{}\x1b[0m \x1b[90m({} requests)\x1b[0m",
        APP_NAME,
        rows.len()
    );
    println!();
    for line in format_table(columns, rows) {
        println!("  {}", line.trim_end());
    }
    println!();
}

/// Header line followed by one line per row
fn format_table(columns: &[ColumnSpec], rows: &[&Row]) -> Vec<String> {
    let records = project(rows.iter().copied(), columns);

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            records
                .iter()
                .filter_map(|record| record.values().nth(i))
                .map(|value| value.chars().count())
                .chain([column.label.chars().count()])
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect();

    let header = columns
        .iter()
        .zip(&widths)
        .map(|(column, &width)| fit_width(&column.label, width))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP);

    let mut lines = vec![format!("\x1b[1m{}\x1b[0m", header)];
    lines.extend(records.iter().map(|record| {
        record
            .values()
            .zip(&widths)
            .map(|(value, &width)| fit_width(value, width))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
    }));
    lines
}

/// Print one request as `Label  value` lines
pub fn print_row(columns: &[ColumnSpec], row: &Row) {
    for line in format_row(columns, row) {
        println!("  {}", line.trim_end());
    }
}

fn format_row(columns: &[ColumnSpec], row: &Row) -> Vec<String> {
    let width = columns
        .iter()
        .map(|column| column.label.chars().count())
        .max()
        .unwrap_or(0);
    project([row], columns)
        .first()
        .map(|record| {
            record
                .cells()
                .map(|(label, value)| {
                    format!(
                        "\x1b[1m{}\x1b[0m{}{}",
                        fit_width(label, width),
                        COLUMN_GAP,
                        value
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn print_message(message: &Message) {
    println!("{}{}\x1b[0m", message.color(), message);
}

pub fn print_exported(rows: usize, path: &Path) {
    println!(
        "  \x1b[32m➜\x1b[0m  Exported {} rows to {}",
        rows,
        file_link(path)
    );
}
