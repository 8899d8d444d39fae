//! Tests for user settings persistence
//!
//! Tests cover:
//! - Default settings values
//! - Serialization/deserialization
//! - Missing and malformed fields
//! - Saving to and loading from a settings file
//! - Conversion into reader/extractor/timestamp options

use crate::common::{temp_path, write_temp_file};
use evcanlog::parsers::{LabelMatching, SheetOptions};
use evcanlog::settings::Settings;

// ============================================
// Default Settings Tests
// ============================================

#[test]
fn test_settings_default_version() {
    let settings = Settings::default();
    assert_eq!(settings.version, 1);
}

#[test]
fn test_settings_default_columns() {
    let settings = Settings::default();
    assert_eq!(settings.timestamp_column, "Timestamp");
    assert_eq!(settings.summary_column, "Decoded Summary");
    assert_eq!(settings.sheet_index, 0);
}

#[test]
fn test_settings_default_matching_is_exact() {
    let settings = Settings::default();
    assert!(!settings.case_insensitive_labels);
    assert_eq!(settings.label_matching(), LabelMatching::Exact);
}

// ============================================
// Serialization Tests
// ============================================

#[test]
fn test_settings_serialize_default() {
    let settings = Settings::default();
    let json = serde_json::to_string(&settings).unwrap();

    assert!(json.contains("version"));
    assert!(json.contains("timestamp_column"));
    assert!(json.contains("case_insensitive_labels"));
}

#[test]
fn test_settings_roundtrip() {
    let settings = Settings {
        summary_column: "Summary".to_string(),
        sheet_index: 2,
        case_insensitive_labels: true,
        timestamp_formats: vec!["%d.%m.%Y %H:%M:%S".to_string()],
        ..Default::default()
    };

    let json = serde_json::to_string_pretty(&settings).unwrap();
    assert_eq!(Settings::from_json(&json), settings);
}

#[test]
fn test_settings_missing_fields_use_defaults() {
    let settings = Settings::from_json(r#"{"sheet_index": 1}"#);
    assert_eq!(settings.sheet_index, 1);
    assert_eq!(settings.version, 1);
    assert_eq!(settings.timestamp_column, "Timestamp");
    assert!(settings.timestamp_formats.is_empty());
}

#[test]
fn test_settings_malformed_json_uses_defaults() {
    assert_eq!(Settings::from_json("{not json"), Settings::default());
    assert_eq!(
        Settings::from_json(r#"{"sheet_index": "first"}"#),
        Settings::default()
    );
}

// ============================================
// Persistence Tests
// ============================================

#[test]
fn test_settings_save_then_load() {
    let path = temp_path("persist/nested/settings.json");
    let settings = Settings {
        timestamp_column: "Time".to_string(),
        case_insensitive_labels: true,
        ..Default::default()
    };

    settings.save_to(&path).expect("Should save settings");
    assert!(path.exists());
    assert_eq!(Settings::load_from(&path), settings);
}

#[test]
fn test_settings_saved_as_pretty_json() {
    let path = temp_path("pretty_settings.json");
    Settings::default().save_to(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\n  \"version\": 1"));
}

#[test]
fn test_settings_load_missing_file_uses_defaults() {
    let path = temp_path("never_written_settings.json");
    assert_eq!(Settings::load_from(&path), Settings::default());
}

#[test]
fn test_settings_load_malformed_file_uses_defaults() {
    let path = write_temp_file("malformed_settings.json", "{\"sheet_index\": [");
    assert_eq!(Settings::load_from(&path), Settings::default());
}

// ============================================
// Conversion Tests
// ============================================

#[test]
fn test_sheet_options_from_settings() {
    let settings = Settings {
        timestamp_column: "Time".to_string(),
        sheet_index: 3,
        ..Default::default()
    };

    assert_eq!(
        settings.sheet_options(),
        SheetOptions {
            timestamp_column: "Time".to_string(),
            summary_column: "Decoded Summary".to_string(),
            sheet_index: 3,
        }
    );
}

#[test]
fn test_timestamp_parser_from_settings() {
    let settings = Settings {
        timestamp_formats: vec!["%d.%m.%Y %H:%M:%S".to_string()],
        ..Default::default()
    };
    let parser = settings.timestamp_parser();
    assert!(parser.parse_text("15.03.2024 08:00:00").is_some());
}

#[test]
fn test_settings_path_ends_with_file_name() {
    if let Some(path) = Settings::get_settings_path() {
        assert!(path.ends_with("evcanlog/settings.json"));
    }
}
