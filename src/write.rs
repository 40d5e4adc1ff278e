//! Write operations for modifying records in Airtable tables.
//!
//! This module provides operations for writing data to a table:
//! - Creating one record or many records in chunks
//! - Updating or replacing one record, or updating many in chunks
//! - Deleting one record or many records one by one

/// Bulk create operation.
pub mod bulk_insert;

/// Bulk delete operation.
pub mod bulk_delete;

/// Bulk update operation.
pub mod bulk_update;

/// Common payloads and helpers for write operations.
pub mod common;

/// Single-record delete operation.
pub mod delete;

/// Single-record create operation.
pub mod insert;

/// Single-record update and replace operations.
pub mod update;
