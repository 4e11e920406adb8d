//! # docref - Document Reference Field Type
//!
//! docref provides a reference ("DBRef") field type for an object-document
//! mapping layer: a pluggable component that lets documents hold references
//! to documents in a different, possibly cross-database, collection.
//!
//! ## Key Features
//!
//! - **Canonical casting**: Arbitrary input (identifiers, strings, reference
//!   values, document-shaped model instances) casts into one canonical
//!   stored shape
//! - **Population-aware accessors**: Getters unwrap stored references to
//!   bare identifiers, while references resolved by an upstream population
//!   step pass through unchanged
//! - **Query-operator support**: A closed set of comparison operators with
//!   single-value and sequence cast strategies
//! - **Explicit shapes**: The stored value is a tagged union, so every case
//!   is matched exhaustively instead of inferred from structure
//! - **Structured errors**: Cast, identifier, and operator failures carry
//!   structured context instead of formatted strings
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docref::schema::{DbRefField, FieldOptions, FieldType};
//! use docref::document::DocId;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Define a reference field targeting the "users" collection
//! let field = DbRefField::new("owner", FieldOptions::new().with_ref("users"));
//!
//! // Cast an identifier into a stored reference
//! let id = DocId::new();
//! let stored = field.cast(id.into())?;
//!
//! // Reading the field yields the bare identifier
//! let scope = docref::document::Document::new();
//! let value = field.apply_getters(&stored, &scope)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Value unions, constants, and utilities
//! - [`document`] - Documents, identifiers, and reference values
//! - [`errors`] - Error types and result definitions
//! - [`schema`] - Field types and query-operator casting
//!
//! The surrounding mapper (schema compilation, document lifecycle, the
//! querying engine, middleware) is an external collaborator; this crate
//! exposes the field-type seam it plugs into.

use crate::document::snowflake::SnowflakeIdGenerator;
use std::sync::LazyLock;

pub mod common;
pub mod document;
pub mod errors;
pub mod schema;

pub use common::{FieldValue, Value};

pub(crate) static ID_GENERATOR: LazyLock<SnowflakeIdGenerator> =
    LazyLock::new(SnowflakeIdGenerator::new);
