use crate::errors::{DocRefResult, DocRefError, ErrorKind};
use crate::ID_GENERATOR;
use once_cell::sync::Lazy;
use std::fmt::{Debug, Display};

static ID_TOO_LARGE_ERROR: Lazy<DocRefError> = Lazy::new(|| {
    DocRefError::new(
        &format!("DocId validation error: id value must be less than 10^19 ({})", 10u64.pow(19)),
        ErrorKind::InvalidId
    )
});

static ID_TOO_SMALL_ERROR: Lazy<DocRefError> = Lazy::new(|| {
    DocRefError::new(
        &format!("DocId validation error: id value must be greater than or equal to 10^18 ({})", 10u64.pow(18)),
        ErrorKind::InvalidId
    )
});

static MAX_VALUE: Lazy<u64> = Lazy::new(|| 10u64.pow(19));
static MIN_VALUE: Lazy<u64> = Lazy::new(|| 10u64.pow(18));

/// The canonical unique identifier for documents.
///
/// Every document a reference can point at is uniquely identified by a
/// `DocId`. The ID is automatically generated using a Snowflake-like
/// distributed ID generator if not explicitly provided.
///
/// # ID Generation
///
/// The generator produces 64-bit unsigned integers in the range
/// [10^18, 10^19). This ensures:
/// - Uniqueness across documents without central coordination
/// - Approximate timestamp ordering
/// - A fixed-width decimal rendering, so the string form round-trips
///
/// # Examples
///
/// ```rust,ignore
/// use docref::document::DocId;
///
/// // Auto-generate an ID
/// let id = DocId::new();
///
/// // Create a specific ID (if valid)
/// let id = DocId::create_id(1234567890123456789)?;
///
/// // Parse the string rendering back
/// let parsed = DocId::from_string(&id.to_string())?;
/// assert_eq!(id, parsed);
/// ```
///
/// # Storage
///
/// The ID is stored in the `_id` field of documents and in the identifier
/// component of reference values.
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, Copy, serde::Deserialize, serde::Serialize)]
pub struct DocId {
    id_value: u64,
}

impl DocId {
    /// Generates a new unique `DocId`.
    ///
    /// Uses the internal Snowflake ID generator to create a unique ID
    /// based on timestamp and machine information.
    pub fn new() -> Self {
        let id_value = ID_GENERATOR.get_id();
        DocId {
            id_value,
        }
    }

    /// Creates a `DocId` from a specific value.
    ///
    /// The value must be within the valid range [10^18, 10^19).
    ///
    /// # Arguments
    ///
    /// * `id_value` - A 64-bit unsigned integer ID
    ///
    /// # Returns
    ///
    /// `Ok(DocId)` if the value is valid, or `Err(DocRefError)` with kind
    /// [ErrorKind::InvalidId] if it's outside the valid range
    pub fn create_id(id_value: u64) -> DocRefResult<DocId> {
        DocId::valid_id(id_value)?;
        Ok(DocId { id_value })
    }

    /// Parses a `DocId` from its decimal string rendering.
    ///
    /// This is the inverse of [Display]: `DocId::from_string(&id.to_string())`
    /// yields the original ID.
    ///
    /// # Arguments
    ///
    /// * `value` - The decimal string to parse
    ///
    /// # Returns
    ///
    /// `Ok(DocId)` on success, or `Err(DocRefError)` with kind
    /// [ErrorKind::InvalidId] if the string is malformed or the parsed value
    /// is out of range
    pub fn from_string(value: &str) -> DocRefResult<DocId> {
        let id_value = value.trim().parse::<u64>().map_err(|err| {
            log::error!("Failed to parse '{}' as a document id: {}", value, err);
            DocRefError::new_with_cause(
                &format!("Cannot parse '{}' as a document id", value),
                ErrorKind::InvalidId,
                err.into(),
            )
        })?;
        DocId::create_id(id_value)
    }

    /// Gets the numeric value of this ID.
    pub fn id_value(&self) -> u64 {
        self.id_value
    }

    pub(crate) fn valid_id(id_value: u64) -> DocRefResult<bool> {
        if id_value >= *MAX_VALUE {
            log::error!("Id value is too large");
            return Err(ID_TOO_LARGE_ERROR.clone());
        } else if id_value < *MIN_VALUE {
            log::error!("Id value is too small");
            return Err(ID_TOO_SMALL_ERROR.clone());
        }

        Ok(true)
    }
}

impl Default for DocId {
    fn default() -> Self {
        DocId::new()
    }
}

impl Debug for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DocId({})", self.id_value)
    }
}

impl Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id_value)
    }
}
