//! Per-metric summaries for display.
//!
//! A metric with zero present values has no summary; callers show "no data"
//! for it instead of an empty chart.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::parsers::Metric;
use crate::table::Table;

/// Descriptive statistics over the present values of one metric
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: Metric,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
}

/// Summarize one metric; `None` when it has no present values
pub fn summarize(table: &Table, metric: Metric) -> Option<MetricSummary> {
    let values = table.present_values(metric);
    let (first, _) = *values.first()?;
    let (last, _) = *values.last()?;

    let n = values.len();
    let mean = values.iter().map(|(_, v)| v).sum::<f64>() / n as f64;
    let min = values.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max = values
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);

    Some(MetricSummary {
        metric,
        count: n,
        min,
        max,
        mean,
        first,
        last,
    })
}

/// One console line per metric
pub fn format_summary_line(metric: Metric, summary: Option<&MetricSummary>) -> String {
    match summary {
        Some(s) => format!(
            "{:<18} {:>6} samples  min {:>8.2}  max {:>8.2}  mean {:>8.2}  ({} .. {})",
            metric.display_name(),
            s.count,
            s.min,
            s.max,
            s.mean,
            s.first,
            s.last
        ),
        None => format!("{:<18} no data", metric.display_name()),
    }
}
