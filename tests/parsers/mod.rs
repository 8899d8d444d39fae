//! Parser integration tests organized by input stage
//!
//! - Decoded-summary field extraction
//! - CSV sheet reading
//! - Format detection and structural errors
