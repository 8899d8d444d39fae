//! Chronological telemetry table.
//!
//! [`TableBuilder`] normalizes each extracted record's timestamp, drops the
//! records whose timestamp is not a valid point in time, and stable-sorts the
//! rest so samples sharing a timestamp keep their sheet order.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::parsers::types::{ExtractedRecord, Metric, Readings};
use crate::timestamp::TimestampParser;

/// One sample with a normalized timestamp
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub timestamp: NaiveDateTime,
    #[serde(flatten)]
    pub readings: Readings,
}

/// Samples ordered by timestamp (non-decreasing)
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Table {
    rows: Vec<TableRow>,
}

impl Table {
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn timestamps(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.rows.iter().map(|row| row.timestamp)
    }

    /// Every sample for one metric, absent values included, ready for charting
    pub fn series(&self, metric: Metric) -> Vec<(NaiveDateTime, Option<f64>)> {
        self.rows
            .iter()
            .map(|row| (row.timestamp, row.readings.get(metric)))
            .collect()
    }

    /// Only the samples that carry the metric
    pub fn present_values(&self, metric: Metric) -> Vec<(NaiveDateTime, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.readings.get(metric).map(|v| (row.timestamp, v)))
            .collect()
    }

    pub fn present_count(&self, metric: Metric) -> usize {
        self.rows
            .iter()
            .filter(|row| row.readings.get(metric).is_some())
            .count()
    }

    /// False means the UI should show "no data" for this metric
    pub fn has_data(&self, metric: Metric) -> bool {
        self.rows.iter().any(|row| row.readings.get(metric).is_some())
    }

    pub fn metrics_with_data(&self) -> Vec<Metric> {
        Metric::all().filter(|m| self.has_data(*m)).collect()
    }
}

/// Turns extracted records into a [`Table`]
#[derive(Clone, Debug, Default)]
pub struct TableBuilder {
    parser: TimestampParser,
}

impl TableBuilder {
    pub fn new(parser: TimestampParser) -> Self {
        Self { parser }
    }

    pub fn build(&self, records: Vec<ExtractedRecord>) -> Table {
        let total = records.len();

        let mut rows: Vec<TableRow> = records
            .into_iter()
            .filter_map(|record| {
                let timestamp = self.parser.normalize(record.timestamp_raw.as_ref()?)?;
                Some(TableRow {
                    timestamp,
                    readings: record.readings,
                })
            })
            .collect();

        if rows.len() < total {
            tracing::debug!(
                "Dropped {} of {} records with an invalid timestamp",
                total - rows.len(),
                total
            );
        }

        // Stable: equal timestamps keep input order
        rows.sort_by_key(|row| row.timestamp);

        Table { rows }
    }
}

/// Build with the built-in timestamp layouts
pub fn build(records: Vec<ExtractedRecord>) -> Table {
    TableBuilder::default().build(records)
}
