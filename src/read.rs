//! Read operations for retrieving records from Airtable tables.
//!
//! This module provides operations for reading data from a table:
//! - Finding the first record matching an id, a field value or a formula
//! - Getting one page of records
//! - Getting every page of records

/// Common options and the query parameter builder for read operations.
pub mod common;

/// Single-record lookups.
pub mod find;

/// Single-page reads.
pub mod get;

/// Fully paginated reads.
pub mod get_all;
