//! The waste report command

use anyhow::Result;
use tracing::info;
use waste_lib::{ClusterSource, Snapshot};

use crate::output::{print_warning, render_table, OutputFormat};

/// Capture a snapshot and print the report
pub async fn show_report(
    source: &dyn ClusterSource,
    namespace: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let snapshot = Snapshot::capture(source, namespace).await?;

    if !snapshot.pods.iter().any(|pod| pod.is_running()) {
        match namespace {
            Some(ns) => print_warning(&format!("No running pods found in namespace {}", ns)),
            None => print_warning("No running pods found"),
        }
    }

    match format {
        OutputFormat::Json => {
            let report = snapshot.report();
            let degraded = report
                .rows
                .iter()
                .filter(|row| row.cpu.is_failure() || row.memory.is_failure())
                .count();
            info!(rows = report.rows.len(), degraded, "Report generated");
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", render_table(snapshot.rows()));
        }
    }

    Ok(())
}
