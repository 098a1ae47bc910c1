//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;
use serde::Deserialize;
use tabled::{settings::Style, Table, Tabled};
use waste_lib::ReportRow;

/// Output format for the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain table (default)
    #[default]
    Table,
    /// JSON document with snapshot metadata
    Json,
}

/// Table row for the waste report
#[derive(Tabled)]
pub struct WasteRow {
    #[tabled(rename = "POD")]
    pod: String,
    #[tabled(rename = "CONTAINER")]
    container: String,
    #[tabled(rename = "CPU_REQ")]
    cpu_request: String,
    #[tabled(rename = "CPU_USED")]
    cpu_used: String,
    #[tabled(rename = "CPU_PCT")]
    cpu_pct: String,
    #[tabled(rename = "MEM_REQ")]
    mem_request: String,
    #[tabled(rename = "MEM_USED")]
    mem_used: String,
    #[tabled(rename = "MEM_PCT")]
    mem_pct: String,
}

impl From<ReportRow> for WasteRow {
    fn from(row: ReportRow) -> Self {
        Self {
            pod: row.pod,
            container: row.container,
            cpu_request: row.cpu.request,
            cpu_used: row.cpu.usage,
            cpu_pct: row.cpu.percentage,
            mem_request: row.memory.request,
            mem_used: row.memory.usage,
            mem_pct: row.memory.percentage,
        }
    }
}

/// Render report rows as a borderless table
pub fn render_table(rows: impl IntoIterator<Item = ReportRow>) -> String {
    Table::new(rows.into_iter().map(WasteRow::from))
        .with(Style::blank())
        .to_string()
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use waste_lib::DimensionCells;

    fn cells(request: &str, usage: &str, percentage: &str) -> DimensionCells {
        DimensionCells {
            request: request.to_string(),
            usage: usage.to_string(),
            percentage: percentage.to_string(),
        }
    }

    fn row(pod: &str, container: &str, cpu: DimensionCells, memory: DimensionCells) -> ReportRow {
        ReportRow {
            pod: pod.to_string(),
            container: container.to_string(),
            cpu,
            memory,
        }
    }

    #[test]
    fn test_render_table_headers_and_cells() {
        let rows = vec![
            row(
                "web-1",
                "app",
                cells("500m", "100m", "20.0%"),
                cells("256Mi", "128Mi", "50.0%"),
            ),
            row(
                "cron-1",
                "job",
                cells("-", "0", "fail:'cpu'"),
                cells("128Mi", "0Mi", "0.0%"),
            ),
        ];

        let table = render_table(rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);

        let header: Vec<&str> = lines[0].split_whitespace().collect();
        assert_eq!(header, waste_lib::REPORT_HEADERS.to_vec());

        let first: Vec<&str> = lines[1].split_whitespace().collect();
        assert_eq!(
            first,
            vec!["web-1", "app", "500m", "100m", "20.0%", "256Mi", "128Mi", "50.0%"]
        );

        let second: Vec<&str> = lines[2].split_whitespace().collect();
        assert_eq!(
            second,
            vec!["cron-1", "job", "-", "0", "fail:'cpu'", "128Mi", "0Mi", "0.0%"]
        );
    }

    #[test]
    fn test_render_empty_table_keeps_headers() {
        let table = render_table(Vec::new());
        assert!(table.contains("POD"));
        assert!(table.contains("MEM_PCT"));
    }

    #[test]
    fn test_table_has_no_borders() {
        let table = render_table(vec![row(
            "a",
            "b",
            cells("1m", "1m", "100.0%"),
            cells("1Mi", "1Mi", "100.0%"),
        )]);
        assert!(!table.contains('|'));
        assert!(!table.contains('─'));
        assert!(!table.contains('+'));
    }
}
