use chrono::NaiveDateTime;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Telemetry metrics reported by the CAN decoder summaries
///
/// Variant order is the display order used by every consumer of a table.
#[derive(
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    PartialEq,
    Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Soc,
    Soh,
    Current,
    Temperature,
    AvgVoltage,
    MinVoltage,
    MaxVoltage,
}

impl Metric {
    /// Snake-case identifier (`soc`, `avg_voltage`, ...)
    pub fn key(&self) -> &'static str {
        (*self).into()
    }

    /// Label text that precedes the value inside a decoded summary
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Soc => "SOC",
            Metric::Soh => "SOH",
            Metric::Current => "Current",
            Metric::Temperature => "Temperature",
            Metric::AvgVoltage => "Average Voltage",
            Metric::MinVoltage => "Min Voltage",
            Metric::MaxVoltage => "Max Voltage",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Soc | Metric::Soh => "%",
            Metric::Current => "A",
            Metric::Temperature => "°C",
            Metric::AvgVoltage | Metric::MinVoltage | Metric::MaxVoltage => "V",
        }
    }

    /// Column/axis title, e.g. `SOC (%)`
    pub fn display_name(&self) -> &'static str {
        match self {
            Metric::Soc => "SOC (%)",
            Metric::Soh => "SOH (%)",
            Metric::Current => "Current (A)",
            Metric::Temperature => "Temperature (°C)",
            Metric::AvgVoltage => "Avg Voltage (V)",
            Metric::MinVoltage => "Min Voltage (V)",
            Metric::MaxVoltage => "Max Voltage (V)",
        }
    }

    /// Only the current draw may be negative (discharge vs. regen)
    pub fn allows_negative(&self) -> bool {
        matches!(self, Metric::Current)
    }

    pub fn all() -> impl Iterator<Item = Metric> {
        Metric::iter()
    }
}

/// Timestamp cell exactly as it came out of the sheet
#[derive(Clone, Debug, PartialEq)]
pub enum RawTimestamp {
    /// Free text such as `2024-01-01 10:00:00`
    Text(String),
    /// Native spreadsheet date-time cell
    DateTime(NaiveDateTime),
    /// Spreadsheet serial day number (days since 1899-12-30)
    Serial(f64),
}

impl From<&str> for RawTimestamp {
    fn from(value: &str) -> Self {
        RawTimestamp::Text(value.to_string())
    }
}

impl From<String> for RawTimestamp {
    fn from(value: String) -> Self {
        RawTimestamp::Text(value)
    }
}

impl From<NaiveDateTime> for RawTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        RawTimestamp::DateTime(value)
    }
}

/// One sheet row: the timestamp cell and the decoded summary cell
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRow {
    pub timestamp_raw: Option<RawTimestamp>,
    pub summary_text: Option<String>,
}

impl RawRow {
    pub fn new(timestamp: impl Into<RawTimestamp>, summary: impl Into<String>) -> Self {
        Self {
            timestamp_raw: Some(timestamp.into()),
            summary_text: Some(summary.into()),
        }
    }

    /// Both cells carry a value; blank text counts as missing
    pub fn is_complete(&self) -> bool {
        let has_timestamp = match &self.timestamp_raw {
            Some(RawTimestamp::Text(text)) => !text.trim().is_empty(),
            Some(_) => true,
            None => false,
        };
        let has_summary = self
            .summary_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty());

        has_timestamp && has_summary
    }
}

/// Drop rows lacking either the timestamp or the summary
pub fn drop_incomplete(rows: Vec<RawRow>) -> Vec<RawRow> {
    let total = rows.len();
    let kept: Vec<RawRow> = rows.into_iter().filter(RawRow::is_complete).collect();

    if kept.len() < total {
        tracing::debug!(
            "Dropped {} of {} rows missing a timestamp or summary",
            total - kept.len(),
            total
        );
    }

    kept
}

/// Values for the seven metrics of one sample; `None` means the summary did not carry it
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Readings {
    pub soc: Option<f64>,
    pub soh: Option<f64>,
    pub current: Option<f64>,
    pub temperature: Option<f64>,
    pub avg_voltage: Option<f64>,
    pub min_voltage: Option<f64>,
    pub max_voltage: Option<f64>,
}

impl Readings {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Soc => self.soc,
            Metric::Soh => self.soh,
            Metric::Current => self.current,
            Metric::Temperature => self.temperature,
            Metric::AvgVoltage => self.avg_voltage,
            Metric::MinVoltage => self.min_voltage,
            Metric::MaxVoltage => self.max_voltage,
        }
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::Soc => &mut self.soc,
            Metric::Soh => &mut self.soh,
            Metric::Current => &mut self.current,
            Metric::Temperature => &mut self.temperature,
            Metric::AvgVoltage => &mut self.avg_voltage,
            Metric::MinVoltage => &mut self.min_voltage,
            Metric::MaxVoltage => &mut self.max_voltage,
        };
        *slot = value;
    }

    /// Number of metrics present in this sample
    pub fn present_count(&self) -> usize {
        Metric::all().filter(|m| self.get(*m).is_some()).count()
    }
}

/// Extraction result for one row, timestamp still unnormalized
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtractedRecord {
    pub timestamp_raw: Option<RawTimestamp>,
    pub readings: Readings,
}
