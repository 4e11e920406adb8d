//! Schema field types and query-operator casting.
//!
//! A field type defines how one schema field casts, validates, and
//! transforms values. The [FieldType] trait is the seam the mapping layer
//! plugs into; [FieldCore] carries the shared behavior every variant
//! delegates to; [DbRefField] is the reference ("DBRef") field type.
//!
//! # Examples
//!
//! ```rust,ignore
//! use docref::schema::{DbRefField, FieldOptions, FieldType};
//! use docref::document::DocId;
//!
//! let field = DbRefField::new("owner", FieldOptions::new().with_ref("users"));
//!
//! // cast an identifier into a stored reference
//! let stored = field.cast(DocId::new().into())?;
//!
//! // build a query condition operand
//! let target = field.cast_for_operator("$ne", DocId::new().into())?;
//! ```

mod db_ref_field;
mod field_type;
mod operators;

pub use db_ref_field::DbRefField;
pub use field_type::{FieldCore, FieldOptions, FieldType, ValueTransform};
pub use operators::{CastStrategy, ComparisonOperator, QueryTarget};
