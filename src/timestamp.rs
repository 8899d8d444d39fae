//! Timestamp normalization.
//!
//! Sheet timestamps arrive as native date-time cells, spreadsheet serial
//! numbers or free text. Everything is normalized to a naive date-time; text
//! carrying a UTC offset is converted to UTC first.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};

use crate::parsers::types::RawTimestamp;

/// Date-time layouts tried in order for text timestamps
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

/// Date-only layouts; these normalize to midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Converts raw timestamp cells to absolute date-times
#[derive(Clone, Debug, Default)]
pub struct TimestampParser {
    /// Additional `strftime` layouts tried after the built-in ones
    extra_formats: Vec<String>,
}

impl TimestampParser {
    pub fn with_formats(extra_formats: Vec<String>) -> Self {
        Self { extra_formats }
    }

    /// `None` when the value is not a valid point in time
    pub fn normalize(&self, raw: &RawTimestamp) -> Option<NaiveDateTime> {
        match raw {
            RawTimestamp::DateTime(dt) => Some(*dt),
            RawTimestamp::Serial(serial) => from_serial(*serial),
            RawTimestamp::Text(text) => self.parse_text(text),
        }
    }

    pub fn parse_text(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.naive_utc());
        }
        if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%:z") {
            return Some(dt.naive_utc());
        }

        let datetime_formats = DATETIME_FORMATS
            .iter()
            .copied()
            .chain(self.extra_formats.iter().map(String::as_str));
        for format in datetime_formats {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Some(dt);
            }
        }

        let date_formats = DATE_FORMATS
            .iter()
            .copied()
            .chain(self.extra_formats.iter().map(String::as_str));
        for format in date_formats {
            if let Ok(date) = NaiveDate::parse_from_str(text, format) {
                return date.and_hms_opt(0, 0, 0);
            }
        }

        None
    }
}

/// Spreadsheet serial day number (1900 date system) to date-time, millisecond precision
pub fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }

    let millis = (serial * MILLIS_PER_DAY).round();
    if millis >= i64::MAX as f64 {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    epoch.checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
}

/// Normalize with the built-in layouts only
pub fn normalize(raw: &RawTimestamp) -> Option<NaiveDateTime> {
    TimestampParser::default().normalize(raw)
}
