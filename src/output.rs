// ABOUTME: Rendering of parsed host records for terminal output
// ABOUTME: Supports an aligned plain-text table and TOML [[host]] tables

use crate::config::OutputFormat;
use crate::ssh::HostRecord;
use anyhow::{Context, Result};
use serde::Serialize;

const HEADERS: [&str; 7] = [
    "HOST",
    "HOSTNAME",
    "USER",
    "PORT",
    "IDENTITYFILE",
    "HOSTKEYALGORITHMS",
    "PROXYCOMMAND",
];

#[derive(Serialize)]
struct Document<'a> {
    host: &'a [HostRecord],
}

pub fn render(records: &[HostRecord], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(records)),
        OutputFormat::Toml => render_toml(records),
    }
}

pub fn render_toml(records: &[HostRecord]) -> Result<String> {
    toml::to_string(&Document { host: records }).context("Failed to serialize host records")
}

pub fn render_table(records: &[HostRecord]) -> String {
    let rows: Vec<[String; 7]> = records.iter().map(row).collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn row(record: &HostRecord) -> [String; 7] {
    [
        record.patterns.join(" "),
        or_dash(&record.host_name),
        or_dash(&record.user),
        record.port.to_string(),
        or_dash(&record.identity_file),
        or_dash(&record.host_key_algorithms),
        or_dash(&record.proxy_command),
    ]
}

fn or_dash(value: &str) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
    let last = cells.len() - 1;
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            out.push_str(cell);
        } else {
            out.push_str(&format!("{cell:<width$}  "));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssh::parse;

    #[test]
    fn test_render_table() {
        let records = parse("Host web db\nHostName 10.0.0.5\nUser admin\nHost bastion\n").unwrap();

        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("HOST    "));
        assert!(lines[1].starts_with("web db "));
        assert!(lines[1].contains("10.0.0.5  admin"));
        assert!(lines[2].starts_with("bastion "));
        assert!(lines[2].contains(" 22 "));
        assert!(lines[2].ends_with('-'));
    }

    #[test]
    fn test_render_table_empty() {
        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 1);
    }

    #[test]
    fn test_render_toml() {
        let records = parse("Host a\nPort 2200\nHost b\n").unwrap();

        let rendered = render(&records, OutputFormat::Toml).unwrap();

        assert_eq!(rendered.matches("[[host]]").count(), 2);
        assert!(rendered.contains("port = 2200"));
    }
}
