use crate::document::DocId;
use std::fmt::{Debug, Display};

/// A stored pointer to a document in another collection.
///
/// A `DbRef` is the canonical persisted representation of a reference field:
/// the target collection name, the identifier of the referenced document, and
/// an optional database qualifier for cross-database references. It is
/// immutable once constructed; the persistence layer consumes it when writing
/// and querying.
///
/// # Examples
///
/// ```rust,ignore
/// use docref::document::{DbRef, DocId};
///
/// let id = DocId::new();
/// let same_db = DbRef::new("users", id, None);
/// let cross_db = DbRef::new("users", id, Some("archive".to_string()));
/// assert_eq!(same_db.collection(), "users");
/// assert_eq!(same_db.oid(), id);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub struct DbRef {
    collection: String,
    oid: DocId,
    db: Option<String>,
}

impl DbRef {
    /// Creates a new reference to the document with the given identifier in
    /// the given collection.
    ///
    /// # Arguments
    ///
    /// * `collection` - The target collection name
    /// * `oid` - The identifier of the referenced document
    /// * `db` - Optional target database name for cross-database references
    pub fn new(collection: impl Into<String>, oid: DocId, db: Option<String>) -> Self {
        DbRef {
            collection: collection.into(),
            oid,
            db,
        }
    }

    /// Gets the target collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Gets the identifier of the referenced document.
    pub fn oid(&self) -> DocId {
        self.oid
    }

    /// Gets the target database name, if the reference crosses databases.
    pub fn db(&self) -> Option<&str> {
        self.db.as_deref()
    }
}

impl Debug for DbRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for DbRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.db {
            Some(db) => write!(f, "DbRef({}, {}, {})", self.collection, self.oid, db),
            None => write!(f, "DbRef({}, {})", self.collection, self.oid),
        }
    }
}
