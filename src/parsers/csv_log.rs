//! CSV exports of the decoder log
//!
//! Same layout as the spreadsheet: a header row naming the columns, one frame
//! per record. Records may have differing lengths; short records simply lack
//! the trailing cells.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::types::{RawRow, RawTimestamp};
use super::{column_index, non_blank, ProcessingError, SheetOptions};

pub fn read_file(path: &Path, options: &SheetOptions) -> Result<Vec<RawRow>, ProcessingError> {
    let file = File::open(path)?;
    read_rows(file, options)
}

pub fn read_rows<R: Read>(reader: R, options: &SheetOptions) -> Result<Vec<RawRow>, ProcessingError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ProcessingError::EmptySheet);
    }

    let timestamp_index = column_index(&headers, &options.timestamp_column)?;
    let summary_index = column_index(&headers, &options.summary_column)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(RawRow {
            timestamp_raw: record
                .get(timestamp_index)
                .and_then(non_blank)
                .map(RawTimestamp::Text),
            summary_text: record.get(summary_index).and_then(non_blank),
        });
    }

    Ok(rows)
}
