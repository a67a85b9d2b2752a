//! Deterministic JSON serialization for committed documents.
//!
//! Committed snapshots are written so that re-parsing and re-committing
//! them yields the same text:
//! - Fields in declaration order, unknown fields in document order
//! - 2-space indentation
//! - Trailing newline
//! - UTF-8 encoding without BOM

mod json;

pub use json::*;
