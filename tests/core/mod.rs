//! Core module tests
//!
//! - Settings defaults and serialization
//! - Table building and per-metric access

pub mod settings_tests;
