//! Decoded-summary field extraction
//!
//! The CAN decoder writes one free-text summary per frame, e.g.
//! `SOC: 80 SOH: 95 Current: -1.2 Temperature 25.0 Average Voltage: 3.7`.
//! Each metric is located independently by its label, an optional `:` or `=`
//! separator and optional whitespace, followed by the numeral. A metric that is
//! not found (or whose numeral cannot be read) is simply absent for that sample.

use regex::Regex;
use std::sync::LazyLock;

use super::types::{ExtractedRecord, Metric, RawRow, Readings};

/// How field labels are compared against the summary text
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LabelMatching {
    /// Labels must appear with the exact case used by the decoder (`SOC`, `Current`)
    #[default]
    Exact,
    /// `soc`, `Soc` and `SOC` all match; may pick up unrelated words on noisy input
    IgnoreCase,
}

impl LabelMatching {
    pub fn from_ignore_case(ignore_case: bool) -> Self {
        if ignore_case {
            LabelMatching::IgnoreCase
        } else {
            LabelMatching::Exact
        }
    }
}

/// Static description of one extractable field
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    pub metric: Metric,
    pub label: &'static str,
    pub allow_negative: bool,
}

impl FieldSpec {
    pub fn for_metric(metric: Metric) -> Self {
        Self {
            metric,
            label: metric.label(),
            allow_negative: metric.allows_negative(),
        }
    }

    /// Regex source for this field; the numeral is captured as `value`
    ///
    /// The numeral is ASCII digits with at most one decimal point, so `85abc`
    /// yields `85` and `1.2.3` yields `1.2`.
    pub fn pattern(&self, matching: LabelMatching) -> String {
        let label = regex::escape(self.label);
        let label = match matching {
            LabelMatching::Exact => label,
            LabelMatching::IgnoreCase => format!("(?i:{label})"),
        };
        let sign = if self.allow_negative { "-?" } else { "" };

        format!(r"{label}[:=]?\s*(?<value>{sign}(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+))")
    }
}

/// All seven field specs in metric order
pub fn field_specs() -> impl Iterator<Item = FieldSpec> {
    Metric::all().map(FieldSpec::for_metric)
}

static EXACT: LazyLock<Extractor> = LazyLock::new(|| Extractor::compile(LabelMatching::Exact));
static IGNORE_CASE: LazyLock<Extractor> =
    LazyLock::new(|| Extractor::compile(LabelMatching::IgnoreCase));

/// Compiled field patterns
pub struct Extractor {
    fields: Vec<(FieldSpec, Regex)>,
}

impl Extractor {
    /// Process-wide compiled extractor for the given label matching mode
    pub fn shared(matching: LabelMatching) -> &'static Extractor {
        match matching {
            LabelMatching::Exact => &EXACT,
            LabelMatching::IgnoreCase => &IGNORE_CASE,
        }
    }

    fn compile(matching: LabelMatching) -> Self {
        let fields = field_specs()
            .map(|spec| {
                let regex =
                    Regex::new(&spec.pattern(matching)).expect("Failed to compile field regex");
                (spec, regex)
            })
            .collect();

        Self { fields }
    }

    /// Pull every metric out of one summary
    pub fn extract_summary(&self, text: &str) -> Readings {
        let mut readings = Readings::default();

        for (spec, regex) in &self.fields {
            let Some(captures) = regex.captures(text) else {
                continue;
            };
            let numeral = &captures["value"];
            match numeral.parse::<f64>() {
                Ok(value) => readings.set(spec.metric, Some(value)),
                Err(e) => {
                    tracing::debug!("Ignoring {} value '{}': {}", spec.metric, numeral, e);
                }
            }
        }

        readings
    }

    /// Extract one row; a missing summary is treated as empty text
    pub fn extract_row(&self, row: &RawRow) -> ExtractedRecord {
        ExtractedRecord {
            timestamp_raw: row.timestamp_raw.clone(),
            readings: self.extract_summary(row.summary_text.as_deref().unwrap_or_default()),
        }
    }

    pub fn extract(&self, rows: &[RawRow]) -> Vec<ExtractedRecord> {
        rows.iter().map(|row| self.extract_row(row)).collect()
    }
}

/// Extract rows with exact-case label matching
pub fn extract(rows: &[RawRow]) -> Vec<ExtractedRecord> {
    Extractor::shared(LabelMatching::Exact).extract(rows)
}
