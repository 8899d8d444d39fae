//! Common test utilities shared across all test modules
//!
//! This module provides helper functions for reading sample logs,
//! building synthetic rows, and asserting table invariants.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

/// Helper function to read a text file, panicking with a clear message if not found.
/// This ensures CI catches missing sample files instead of silently skipping tests.
pub fn read_sample_file(file_path: &str) -> String {
    std::fs::read_to_string(file_path)
        .unwrap_or_else(|e| panic!("Failed to read sample file '{}': {}", file_path, e))
}

/// Unique scratch path under the system temp dir
pub fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("evcanlog-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir)
        .unwrap_or_else(|e| panic!("Failed to create temp dir '{}': {}", dir.display(), e));
    dir.join(name)
}

/// Write `content` to a fresh temp file and return its path
pub fn write_temp_file(name: &str, content: &str) -> PathBuf {
    let path = temp_path(name);
    std::fs::write(&path, content)
        .unwrap_or_else(|e| panic!("Failed to write '{}': {}", path.display(), e));
    path
}

pub fn sample_path(file_path: &str) -> &Path {
    Path::new(file_path)
}

/// Sample log paths
pub mod sample_files {
    /// Ten frames: unsorted, duplicated timestamps, one missing timestamp,
    /// one missing summary, one unparseable timestamp
    pub const EV_CAN_SAMPLE: &str = "sampleLogs/ev_can_sample.csv";

    /// Single "Frames" worksheet with a date-formatted timestamp cell, a text
    /// timestamp, a plain serial number and a row without timestamp
    pub const EV_CAN_SAMPLE_XLSX: &str = "sampleLogs/ev_can_sample.xlsx";
}

/// Synthetic row builders
pub mod synthetic {
    use evcanlog::parsers::RawRow;

    /// Summary line carrying all seven metrics
    pub fn full_summary(soc: f64, current: f64) -> String {
        format!(
            "SOC: {} SOH: 95 Current: {} Temperature 25.0 Average Voltage: 3.7 \
             Min Voltage=3.6 Max Voltage=3.8",
            soc, current
        )
    }

    /// One row per second starting at 2024-01-01 00:00:00
    pub fn rows_per_second(count: usize) -> Vec<RawRow> {
        (0..count)
            .map(|i| {
                RawRow::new(
                    format!("2024-01-01 00:{:02}:{:02}", i / 60, i % 60),
                    full_summary(100.0 - i as f64 * 0.1, -(i as f64)),
                )
            })
            .collect()
    }

    /// CSV text with the two required columns
    pub fn csv(rows: &[(&str, &str)]) -> String {
        let mut out = String::from("Timestamp,Decoded Summary\n");
        for (timestamp, summary) in rows {
            out.push_str(&format!("{},\"{}\"\n", timestamp, summary.replace('"', "\"\"")));
        }
        out
    }
}

/// Assertion helpers for common test patterns
pub mod assertions {
    use evcanlog::table::Table;

    /// Assert that timestamps never decrease
    pub fn assert_chronological(table: &Table) {
        let times: Vec<_> = table.timestamps().collect();
        for (i, window) in times.windows(2).enumerate() {
            assert!(
                window[1] >= window[0],
                "Timestamps at index {} should be non-decreasing: {} >= {}",
                i,
                window[1],
                window[0]
            );
        }
    }

    /// Assert that every present value is finite
    pub fn assert_finite_values(table: &Table) {
        for metric in evcanlog::parsers::Metric::all() {
            for (timestamp, value) in table.present_values(metric) {
                assert!(
                    value.is_finite(),
                    "{} at {} should be finite, got {}",
                    metric,
                    timestamp,
                    value
                );
            }
        }
    }
}

/// Float comparison helpers for testing
pub mod float_cmp {
    /// Check if two floats are approximately equal within a tolerance
    pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    /// Assert that two floats are approximately equal
    pub fn assert_approx_eq(a: f64, b: f64, tolerance: f64) {
        assert!(
            approx_eq(a, b, tolerance),
            "Values not approximately equal: {} vs {} (tolerance: {})",
            a,
            b,
            tolerance
        );
    }

    /// Default tolerance for float comparisons (0.0001)
    pub const DEFAULT_TOLERANCE: f64 = 0.0001;
}
