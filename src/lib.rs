#![deny(missing_docs)]
#![deny(warnings)]

//! # Airtable CRUD
//!
//! A typed, synchronous interface for reading and writing the records of
//! Airtable tables over the REST API.
//!
//! ## Overview
//!
//! This library provides:
//! - A [`ClientFactory`](client::ClientFactory) bound to one base and one
//!   credential, producing a [`TableClient`](client::TableClient) per table
//! - Typed read options that are turned into the query string for you
//! - Pagination, chunked batch writes and rate-limit pacing handled
//!   automatically
//! - One [`Response`](common::response::Response) envelope for every
//!   operation, collecting the errors reported by the backend
//!
//! The HTTP layer is pluggable through the [`Transport`](transport::Transport)
//! trait. Enable the `reqwest` feature for a ready-made blocking transport.
//!
//! ## Quick Example
//!
//! ```no_run
//! use airtable_crud::{client, common, read};
//! # use airtable_crud::transport::{HttpRequest, HttpResponse, Transport};
//! # use airtable_crud::error::TransportError;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # struct Http;
//! # impl Transport for Http {
//! #     fn fetch(&self, _: HttpRequest) -> Result<HttpResponse, TransportError> {
//! #         Ok(HttpResponse::new(200, "{}"))
//! #     }
//! # }
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = client::ClientFactory::new("appXXXXXXXXXXXXXX", "pat.secret", false, Arc::new(Http));
//! let tasks = factory.create("Tasks")?;
//!
//! tasks.insert(json!({"Name": "Write docs", "Done": false}))?;
//!
//! let open = tasks.get_all(read::common::RequestOptions {
//!     formula: Some(common::formula::Formula::raw("NOT({Done})")),
//!     sort: Some(common::sort::SortMap::Clauses(vec!["Name".into()])),
//!     ..Default::default()
//! })?;
//! for record in open.records() {
//!     println!("{}: {:?}", record.id, record.fields.get("Name"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@client`] - Configuration, rate limiting and the table client
//! - [`mod@common`] - Formulas, sorting, records and the response envelope
//! - [`mod@read`] - Read operations (Find, Get, GetAll)
//! - [`mod@write`] - Write operations (Insert, Update, Replace, Delete and their bulk forms)

/// Client configuration, rate limiting, and the per-table client.
pub mod client;

/// Common utilities for query parameters, formulas, sorting, and responses.
pub mod common;

/// Errors returned by the client.
pub mod error;

/// Read operations for retrieving records from Airtable tables.
///
/// This module provides operations for:
/// - Finding a single record by id, field value or formula
/// - Getting one page of records
/// - Getting every page of records
pub mod read;

/// HTTP transport and sleep capabilities.
pub mod transport;

/// Write operations for modifying records in Airtable tables.
///
/// This module provides operations for:
/// - Creating records
/// - Updating or replacing records
/// - Deleting records
pub mod write;
