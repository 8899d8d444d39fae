//! End-to-end tests
//!
//! - Pipeline scenarios on synthetic rows
//! - Loading and exporting the sample log
