//! End-to-end processing of one input file.
//!
//! `rows -> drop incomplete -> extract -> build` with no state kept between
//! calls; the same input always yields the same [`Table`].

use std::path::Path;

use crate::parsers::{self, drop_incomplete, Extractor, LabelMatching, ProcessingError, RawRow};
use crate::settings::Settings;
use crate::table::{Table, TableBuilder};

pub struct Pipeline {
    extractor: &'static Extractor,
    builder: TableBuilder,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            extractor: Extractor::shared(LabelMatching::Exact),
            builder: TableBuilder::default(),
        }
    }
}

impl Pipeline {
    pub fn new(settings: &Settings) -> Self {
        Self {
            extractor: Extractor::shared(settings.label_matching()),
            builder: TableBuilder::new(settings.timestamp_parser()),
        }
    }

    pub fn process(&self, rows: Vec<RawRow>) -> Table {
        let rows = drop_incomplete(rows);
        let records = self.extractor.extract(&rows);
        let table = self.builder.build(records);

        tracing::info!(
            "Built table with {} of {} complete rows",
            table.len(),
            rows.len()
        );
        table
    }
}

/// Process rows with default settings
pub fn process(rows: Vec<RawRow>) -> Table {
    Pipeline::default().process(rows)
}

/// Read, extract and build a table from a spreadsheet or CSV file
pub fn load_table(path: &Path, settings: &Settings) -> Result<Table, ProcessingError> {
    let rows = parsers::read_rows(path, &settings.sheet_options())?;
    Ok(Pipeline::new(settings).process(rows))
}
