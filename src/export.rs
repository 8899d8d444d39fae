//! Table export for external viewers.
//!
//! CSV mirrors the on-screen table (one column per metric, blank cells for
//! absent values). JSON carries the rows plus a ready-to-plot series per metric.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::parsers::Metric;
use crate::table::{Table, TableRow};

/// Timestamp layout used in CSV output
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct TableExport<'a> {
    rows: &'a [TableRow],
    series: BTreeMap<&'static str, Vec<(NaiveDateTime, Option<f64>)>>,
}

pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Timestamp"];
    header.extend(Metric::all().map(|m| m.display_name()));
    writer.write_record(&header)?;

    for row in table.rows() {
        let mut record = vec![row.timestamp.format(CSV_TIMESTAMP_FORMAT).to_string()];
        record.extend(Metric::all().map(|m| {
            row.readings
                .get(m)
                .map(|v| v.to_string())
                .unwrap_or_default()
        }));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(table: &Table, writer: W) -> Result<(), ExportError> {
    let export = TableExport {
        rows: table.rows(),
        series: Metric::all().map(|m| (m.key(), table.series(m))).collect(),
    };
    serde_json::to_writer_pretty(writer, &export)?;
    Ok(())
}

pub fn export_csv(table: &Table, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(table, BufWriter::new(file))?;
    tracing::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}

pub fn export_json(table: &Table, path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json(table, &mut writer)?;
    writer.flush()?;
    tracing::info!("Exported {} rows to {}", table.len(), path.display());
    Ok(())
}
