use crate::common::{Value, DOC_COLLECTION, DOC_ID};
use crate::document::DocId;
use crate::errors::{DocRefResult, DocRefError, ErrorKind};
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};

/// A document-shaped value: the stand-in for a model instance or a populated
/// reference.
///
/// Documents are composed of key-value pairs. The key is always a [String]
/// and the value is a [Value].
///
/// Below fields are reserved and validated on insertion:
///
/// * `_id` - The unique identifier of the document; must hold a [DocId].
/// * `_collection` - The name of the collection the document belongs to;
///   must hold a string. A model instance hydrated by the mapper carries it,
///   and casting such a document to a reference uses it as the target
///   collection name.
#[derive(Clone, PartialEq, Default, serde::Deserialize, serde::Serialize)]
pub struct Document {
    data: BTreeMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: BTreeMap::new(),
        }
    }

    /// Checks if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of fields in the document.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Associates the specified [Value] with the specified key in this
    /// document. If the key already exists, its value is updated.
    ///
    /// # Arguments
    ///
    /// * `key` - The key as a string slice. Cannot be empty.
    /// * `value` - The value to associate with the key. Can be any type that
    ///   implements `Into<Value>`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The key is empty
    /// * The key is the reserved field `_id` with a non-[DocId] value
    /// * The key is the reserved field `_collection` with a non-string value
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> DocRefResult<()> {
        // key cannot be empty
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(DocRefError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        let value = value.into();

        // validate the _id field
        if key == DOC_ID && !matches!(value, Value::Id(_)) {
            log::error!("Document id field must hold a document id");
            return Err(DocRefError::new(
                "Document id field must hold a document id",
                ErrorKind::InvalidOperation,
            ));
        }

        // validate the _collection field
        if key == DOC_COLLECTION && !matches!(value, Value::String(_)) {
            log::error!("Document collection field must hold a string");
            return Err(DocRefError::new(
                "Document collection field must hold a string",
                ErrorKind::InvalidOperation,
            ));
        }

        self.data.insert(key.to_string(), value);
        Ok(())
    }

    /// Gets the value associated with the key, or [Value::Null] if the key is
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty.
    pub fn get(&self, key: &str) -> DocRefResult<Value> {
        if key.is_empty() {
            log::error!("Document does not support empty key");
            return Err(DocRefError::new(
                "Document does not support empty key",
                ErrorKind::InvalidOperation,
            ));
        }

        Ok(self.data.get(key).cloned().unwrap_or(Value::Null))
    }

    /// Checks whether the document contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Gets the identifier of this document, if the reserved `_id` field is
    /// set.
    pub fn id(&self) -> Option<DocId> {
        match self.data.get(DOC_ID) {
            Some(Value::Id(id)) => Some(*id),
            _ => None,
        }
    }

    /// Gets the name of the collection this document belongs to, if the
    /// reserved `_collection` field is set.
    pub fn collection_name(&self) -> Option<&str> {
        match self.data.get(DOC_COLLECTION) {
            Some(Value::String(name)) => Some(name),
            _ => None,
        }
    }

    /// Returns an iterator over the document's fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (idx, (key, value)) in self.data.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "\"{}\": {}", key, value)?;
        }
        write!(f, "}}")
    }
}

/// Creates a [Document] from key-value pairs.
///
/// Keys are written as bare identifiers (reserved fields like `_id` included)
/// and values as expressions convertible into [Value].
///
/// # Examples
///
/// ```rust,ignore
/// use docref::doc;
/// use docref::document::DocId;
///
/// let empty = doc! {};
/// let user = doc! {
///     _id: DocId::new(),
///     name: "Alice",
/// };
/// ```
#[macro_export]
macro_rules! doc {
    // match an empty document
    () => {
        $crate::document::Document::new()
    };

    // match a document with key value pairs
    ($($key:ident : $value:expr),* $(,)?) => {
        {
            let mut doc = $crate::document::Document::new();
            $(
                doc.put(stringify!($key), $value)
                    .unwrap_or_else(|err| panic!("Failed to put {}: {}", stringify!($key), err));
            )*
            doc
        }
    };
}
