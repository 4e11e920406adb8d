use crate::document::{DbRef, DocId, Document};
use std::fmt::{Debug, Display, Formatter};

/// Represents a value handed to a field type by the mapping layer. It can be
/// a simple value like [Value::I64] or [Value::String], an identifier or
/// reference value like [Value::Id] or [Value::Ref], or a complex value like
/// [Value::Document] or [Value::Array].
///
/// # Purpose
/// Provides a unified representation for everything that can flow into a
/// field type's cast, getter, and setter pipelines: native Rust primitives,
/// strings, document-shaped values (model instances and populated
/// references), and the docref-specific types ([DocId], [DbRef]).
///
/// # Characteristics
/// - **Flexible**: Supports any input shape a mapper can produce for a field
/// - **Type-safe**: Each variant explicitly represents its type
/// - **Serializable**: Can be serialized/deserialized with serde
/// - **Default**: Defaults to Null
///
/// # Usage
/// Create values using the From trait:
/// ```text
/// let v1: Value = 42i64.into();
/// let v2 = Value::from("1234567890123456789");
/// let v3 = Value::from(DocId::new());
/// ```
#[derive(Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Value {
    /// Represents a null value.
    #[default]
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a signed 32-bit integer value.
    I32(i32),
    /// Represents a signed 64-bit integer value.
    I64(i64),
    /// Represents a 64-bit floating point value.
    F64(f64),
    /// Represents a string value.
    String(String),
    /// Represents a document identifier value.
    Id(DocId),
    /// Represents a reference value.
    Ref(DbRef),
    /// Represents a document value.
    Document(Document),
    /// Represents an array value.
    Array(Vec<Value>),
}

impl Value {
    /// Checks if the value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the contained identifier if this is an [Value::Id] value.
    pub fn as_id(&self) -> Option<DocId> {
        match self {
            Value::Id(id) => Some(*id),
            _ => None,
        }
    }

    /// Returns the contained reference if this is a [Value::Ref] value.
    pub fn as_ref_value(&self) -> Option<&DbRef> {
        match self {
            Value::Ref(db_ref) => Some(db_ref),
            _ => None,
        }
    }

    /// Returns the contained string if this is a [Value::String] value.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained document if this is a [Value::Document] value.
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "\"{}\"", v),
            Value::Id(v) => write!(f, "{}", v),
            Value::Ref(v) => write!(f, "{}", v),
            Value::Document(v) => write!(f, "{}", v),
            Value::Array(values) => {
                write!(f, "[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<DocId> for Value {
    fn from(value: DocId) -> Self {
        Value::Id(value)
    }
}

impl From<DbRef> for Value {
    fn from(value: DbRef) -> Self {
        Value::Ref(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}

/// The canonical stored shape of a reference field after casting.
///
/// A reference field persists exactly one of three shapes. The discriminant
/// is explicit: a populated value is tagged as such at the setter boundary by
/// the population step, never re-derived from the structure of the stored
/// data.
///
/// # Variants
/// - Empty: no reference stored (cast from null or the wildcard sentinel)
/// - Reference(DbRef): a stored pointer to a document in another collection
/// - Populated(Document): a reference resolved into the referenced document's
///   data by an upstream population step
#[derive(Clone, Default, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum FieldValue {
    /// No reference stored.
    #[default]
    Empty,
    /// A stored pointer to a document in another collection.
    Reference(DbRef),
    /// A reference resolved into the referenced document's data.
    Populated(Document),
}

impl FieldValue {
    /// Checks if no reference is stored.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// Returns the stored reference, if any.
    pub fn as_reference(&self) -> Option<&DbRef> {
        match self {
            FieldValue::Reference(db_ref) => Some(db_ref),
            _ => None,
        }
    }

    /// Returns the populated document, if any.
    pub fn as_populated(&self) -> Option<&Document> {
        match self {
            FieldValue::Populated(doc) => Some(doc),
            _ => None,
        }
    }

    /// Converts the stored shape back into a raw [Value] for the generic
    /// getter/setter pipelines.
    pub fn to_value(&self) -> Value {
        match self {
            FieldValue::Empty => Value::Null,
            FieldValue::Reference(db_ref) => Value::Ref(db_ref.clone()),
            FieldValue::Populated(doc) => Value::Document(doc.clone()),
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_value())
    }
}
