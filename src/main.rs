//! evcanlog - EV CAN bus decoder log extraction
//!
//! Reads a decoder log export, prints a per-metric overview and optionally
//! exports the extracted table as CSV or JSON.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use evcanlog::export;
use evcanlog::parsers::Metric;
use evcanlog::pipeline::load_table;
use evcanlog::settings::Settings;
use evcanlog::statistics::{format_summary_line, summarize};
use evcanlog::table::Table;

#[derive(Debug, Parser)]
#[command(name = "evcanlog", version, about = "EV CAN decoder log telemetry extractor")]
struct Cli {
    /// Decoder log (.xlsx, .xlsm, .xlsb, .xls, .ods or .csv)
    input: PathBuf,

    /// Zero-based worksheet index
    #[arg(long)]
    sheet: Option<usize>,

    /// Header of the timestamp column
    #[arg(long)]
    timestamp_column: Option<String>,

    /// Header of the decoded summary column
    #[arg(long)]
    summary_column: Option<String>,

    /// Match field labels regardless of case
    #[arg(long, conflicts_with = "exact_label_case")]
    ignore_label_case: bool,

    /// Match field labels with exact case (default)
    #[arg(long)]
    exact_label_case: bool,

    /// Extra strftime layout for text timestamps; replaces the saved list
    #[arg(long = "timestamp-format", value_name = "FORMAT")]
    timestamp_formats: Vec<String>,

    /// Only report these metrics (soc, soh, current, temperature, avg_voltage, min_voltage, max_voltage)
    #[arg(long = "metric", value_name = "KEY")]
    metrics: Vec<Metric>,

    /// Write the extracted table as CSV
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Write the extracted table and per-metric series as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Persist the effective column/sheet/matching options as defaults
    #[arg(long)]
    save_settings: bool,
}

impl Cli {
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(sheet) = self.sheet {
            settings.sheet_index = sheet;
        }
        if let Some(column) = &self.timestamp_column {
            settings.timestamp_column = column.clone();
        }
        if let Some(column) = &self.summary_column {
            settings.summary_column = column.clone();
        }
        if self.ignore_label_case {
            settings.case_insensitive_labels = true;
        }
        if self.exact_label_case {
            settings.case_insensitive_labels = false;
        }
        if !self.timestamp_formats.is_empty() {
            settings.timestamp_formats = self.timestamp_formats.clone();
        }
    }

    fn selected_metrics(&self) -> Vec<Metric> {
        if self.metrics.is_empty() {
            Metric::all().collect()
        } else {
            self.metrics.clone()
        }
    }
}

fn report(table: &Table, metrics: &[Metric]) {
    if table.is_empty() {
        println!("No data: no rows with a valid timestamp and summary");
        return;
    }

    if let (Some(first), Some(last)) = (table.timestamps().next(), table.timestamps().last()) {
        println!("{} samples from {} to {}", table.len(), first, last);
    }
    for metric in metrics {
        let summary = summarize(table, *metric);
        println!("{}", format_summary_line(*metric, summary.as_ref()));
    }
}

fn run(cli: &Cli, table: &Table) -> anyhow::Result<()> {
    report(table, &cli.selected_metrics());

    if let Some(path) = &cli.csv {
        export::export_csv(table, path)
            .with_context(|| format!("Failed to export CSV to {}", path.display()))?;
    }
    if let Some(path) = &cli.json {
        export::export_json(table, path)
            .with_context(|| format!("Failed to export JSON to {}", path.display()))?;
    }

    Ok(())
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let mut settings = Settings::load();
    cli.apply_to(&mut settings);

    if cli.save_settings {
        match settings.save() {
            Ok(()) => tracing::info!("Saved settings"),
            Err(e) => tracing::warn!("Failed to save settings: {}", e),
        }
    }

    let table = match load_table(&cli.input, &settings) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Failed to process file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = run(&cli, &table) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
