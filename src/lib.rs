//! evcanlog - EV CAN bus decoder log extraction
//!
//! This library reads spreadsheet or CSV exports of a CAN bus decoder, pulls the
//! battery telemetry embedded in each row's decoded summary, and builds a
//! chronological table ready for charting.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Sheet readers (calamine, CSV) and decoded-summary field extraction
//! - [`timestamp`] - Timestamp normalization (text, serial numbers, native date-times)
//! - [`table`] - Chronological table building and per-metric series access
//! - [`pipeline`] - End-to-end processing of one input file
//! - [`statistics`] - Per-metric summaries and "no data" reporting
//! - [`export`] - CSV and JSON export of the table
//! - [`settings`] - User settings persistence

pub mod export;
pub mod parsers;
pub mod pipeline;
pub mod settings;
pub mod statistics;
pub mod table;
pub mod timestamp;
