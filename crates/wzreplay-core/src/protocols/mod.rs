//! Protocol decoding modules.
//!
//! Each protocol follows a layered structure:
//! - `layout`: type codes, subtypes and name tables (source of truth)
//! - `reader`: bounded byte access and wire conventions
//! - `parser`: domain-level decoding (no direct byte indexing)
//! - `error`: explicit, actionable errors
//!
//! Parsers are pure and contain no I/O; sources and analysis layers handle
//! file access and aggregation.

pub mod common;
pub mod netplay;
