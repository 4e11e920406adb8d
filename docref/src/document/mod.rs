//! Documents, identifiers, and reference values.
//!
//! This module provides the value types a reference field operates on.
//!
//! # Documents
//!
//! A `Document` is a key-value map where keys are strings and values are
//! `Value` objects. It stands in for a model instance or a reference that an
//! upstream population step resolved into the referenced document's data.
//!
//! ```rust,ignore
//! use docref::doc;
//! use docref::document::DocId;
//!
//! let user = doc! {
//!     _id: DocId::new(),
//!     _collection: "users",
//!     name: "Alice",
//! };
//! ```
//!
//! # Identifiers and references
//!
//! A `DocId` is the canonical unique document identifier. A `DbRef` couples
//! a target collection name, a `DocId`, and an optional database qualifier
//! into the canonical stored pointer to a document in another collection.
//!
//! ```rust,ignore
//! use docref::document::{DbRef, DocId};
//!
//! let id = DocId::new();
//! let reference = DbRef::new("users", id, None);
//! assert_eq!(reference.oid(), id);
//! ```

mod db_ref;
mod doc_id;
#[allow(clippy::module_inception)]
mod document;
pub(crate) mod snowflake;

pub use db_ref::DbRef;
pub use doc_id::DocId;
pub use document::Document;
