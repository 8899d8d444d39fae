pub mod csv_log;
pub mod spreadsheet;
pub mod summary;
pub mod types;

use std::path::Path;
use thiserror::Error;

pub use summary::{extract, Extractor, FieldSpec, LabelMatching};
pub use types::{drop_incomplete, ExtractedRecord, Metric, RawRow, RawTimestamp, Readings};

/// Failures that prevent a file from being read at all
///
/// Missing cells, bad timestamps and unmatched fields are never errors; they
/// only shrink the resulting table.
#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Worksheet {0} not found")]
    SheetNotFound(usize),

    #[error("Worksheet has no rows")]
    EmptySheet,

    #[error("Required column '{0}' not found")]
    MissingColumn(String),
}

/// Where the two required columns live
#[derive(Clone, Debug, PartialEq)]
pub struct SheetOptions {
    pub timestamp_column: String,
    pub summary_column: String,
    pub sheet_index: usize,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            timestamp_column: "Timestamp".to_string(),
            summary_column: "Decoded Summary".to_string(),
            sheet_index: 0,
        }
    }
}

/// Supported input containers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFormat {
    /// Anything calamine opens: xlsx, xlsm, xlsb, xls, ods
    Spreadsheet,
    Csv,
}

impl InputFormat {
    /// Detect the format from the file extension (case-insensitive)
    pub fn detect(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(InputFormat::Spreadsheet),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Spreadsheet => "Spreadsheet",
            InputFormat::Csv => "CSV",
        }
    }
}

/// Read every row of the input file, incomplete rows included
pub fn read_rows(path: &Path, options: &SheetOptions) -> Result<Vec<RawRow>, ProcessingError> {
    let format = InputFormat::detect(path)
        .ok_or_else(|| ProcessingError::UnsupportedFormat(path.display().to_string()))?;

    tracing::info!("Reading {} as {}", path.display(), format.name());

    let rows = match format {
        InputFormat::Spreadsheet => spreadsheet::read_file(path, options)?,
        InputFormat::Csv => csv_log::read_file(path, options)?,
    };

    tracing::debug!("Read {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Position of a required column in the header row (exact match after trimming)
pub(crate) fn column_index(headers: &[String], name: &str) -> Result<usize, ProcessingError> {
    headers
        .iter()
        .position(|header| header.trim() == name)
        .ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))
}

/// Trimmed cell text, `None` when blank
pub(crate) fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
