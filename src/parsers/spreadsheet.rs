//! Spreadsheet worksheets (xlsx, xls, xlsb, ods) via calamine
//!
//! The first row of the worksheet is the header row. Timestamp cells may be
//! native date-times, serial numbers or text; summary cells of any type are
//! rendered to text.

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use std::path::Path;

use super::types::{RawRow, RawTimestamp};
use super::{column_index, non_blank, ProcessingError, SheetOptions};

pub fn read_file(path: &Path, options: &SheetOptions) -> Result<Vec<RawRow>, ProcessingError> {
    let mut workbook = open_workbook_auto(path)?;

    let range = workbook
        .worksheet_range_at(options.sheet_index)
        .ok_or(ProcessingError::SheetNotFound(options.sheet_index))??;

    rows_from_range(&range, options)
}

/// Convert a worksheet range (header row first) into raw rows
pub fn rows_from_range(
    range: &Range<Data>,
    options: &SheetOptions,
) -> Result<Vec<RawRow>, ProcessingError> {
    let mut rows = range.rows();

    let headers: Vec<String> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_text).collect(),
        None => return Err(ProcessingError::EmptySheet),
    };

    let timestamp_index = column_index(&headers, &options.timestamp_column)?;
    let summary_index = column_index(&headers, &options.summary_column)?;

    Ok(rows
        .map(|row| RawRow {
            timestamp_raw: row.get(timestamp_index).and_then(timestamp_cell),
            summary_text: row.get(summary_index).and_then(summary_cell),
        })
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn timestamp_cell(cell: &Data) -> Option<RawTimestamp> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) => non_blank(s).map(RawTimestamp::Text),
        Data::Float(f) => Some(RawTimestamp::Serial(*f)),
        Data::Int(i) => Some(RawTimestamp::Serial(*i as f64)),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) => Some(RawTimestamp::DateTime(dt)),
            None => {
                tracing::warn!("Unreadable date-time cell: {}", cell);
                None
            }
        },
        other => non_blank(&other.to_string()).map(RawTimestamp::Text),
    }
}

fn summary_cell(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => non_blank(s),
        other => non_blank(&other.to_string()),
    }
}
