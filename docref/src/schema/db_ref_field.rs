use crate::common::{FieldValue, Value, DB_REF_CAST_TARGET, DB_REF_KIND, WILDCARD_REF};
use crate::document::{DbRef, DocId, Document};
use crate::errors::{DocRefResult, DocRefError, ErrorKind};
use crate::schema::{FieldCore, FieldOptions, FieldType, ValueTransform};

/// The reference ("DBRef") field type.
///
/// A `DbRefField` lets documents hold references to documents in a different
/// (possibly cross-database) collection. It casts arbitrary input into the
/// canonical [FieldValue] storage shape, applies population-aware getter and
/// setter overrides, and supports the closed set of comparison operators in
/// query conditions.
///
/// # Configuration
///
/// * [FieldOptions::with_ref] names the target collection. It enables the
///   population pass-through and supplies the default collection name when
///   casting bare identifiers.
/// * [FieldOptions::with_db] names the target database, stamped onto every
///   constructed reference.
///
/// # Examples
///
/// ```rust,ignore
/// use docref::schema::{DbRefField, FieldOptions, FieldType};
/// use docref::document::DocId;
///
/// let field = DbRefField::new("owner", FieldOptions::new().with_ref("users"));
/// let stored = field.cast(DocId::new().into())?;
/// let reference = stored.as_reference().unwrap();
/// assert_eq!(reference.collection(), "users");
/// ```
pub struct DbRefField {
    core: FieldCore,
}

impl DbRefField {
    /// Creates a reference field descriptor for the given field name,
    /// tagging it with the "DBRef" kind.
    ///
    /// # Arguments
    ///
    /// * `key` - The field name
    /// * `options` - The field configuration
    pub fn new(key: impl Into<String>, options: FieldOptions) -> Self {
        DbRefField {
            core: FieldCore::new(key, options, DB_REF_KIND),
        }
    }

    /// Registers a user getter on the underlying pipeline. Used by the
    /// schema layer during compilation.
    pub fn add_getter(&mut self, getter: ValueTransform) {
        self.core.add_getter(getter);
    }

    /// Registers a user setter on the underlying pipeline.
    pub fn add_setter(&mut self, setter: ValueTransform) {
        self.core.add_setter(setter);
    }

    // Constructs a reference from an identifier, resolving the collection
    // name from the explicit source collection when given, else from the
    // field configuration. An unconfigured field with no explicit collection
    // yields an empty collection name.
    fn make_ref(&self, oid: DocId, explicit_collection: Option<&str>) -> DbRef {
        let options = self.core.options();
        let collection = explicit_collection
            .map(str::to_string)
            .or_else(|| options.target_collection().map(str::to_string))
            .unwrap_or_default();
        DbRef::new(collection, oid, options.target_db().map(str::to_string))
    }

    // The populated stand-in check: a document carrying an identifier, on a
    // field configured with a target collection.
    fn is_populated_stand_in(&self, doc: &Document) -> bool {
        self.core.options().target_collection().is_some() && doc.id().is_some()
    }

    fn cast_error(&self, value: &Value) -> DocRefError {
        log::error!("Cannot cast {} to {}", value, DB_REF_CAST_TARGET);
        DocRefError::new(
            &format!("Cannot cast {} to {}", value, DB_REF_CAST_TARGET),
            ErrorKind::Cast {
                target_kind: DB_REF_CAST_TARGET.to_string(),
            },
        )
        .with_offending_value(value.to_string())
    }
}

impl FieldType for DbRefField {
    fn core(&self) -> &FieldCore {
        &self.core
    }

    /// A required reference field must hold an actual reference value; an
    /// empty value or a populated document does not satisfy the validator.
    fn check_required(&self, value: &FieldValue) -> bool {
        matches!(value, FieldValue::Reference(_))
    }

    /// Applies getters with the population special-case.
    ///
    /// A stored reference unwraps to its bare identifier, since application
    /// code reading the field normally wants the ID rather than the
    /// reference envelope. A populated value on a field configured with a
    /// target collection passes through unchanged, so getters do not strip
    /// the resolved document back down to an ID. Everything else runs the
    /// generic getter pipeline.
    fn apply_getters(&self, value: &FieldValue, scope: &Document) -> DocRefResult<Value> {
        match value {
            FieldValue::Reference(db_ref) => Ok(Value::Id(db_ref.oid())),
            FieldValue::Populated(doc)
                if self.core.options().target_collection().is_some() =>
            {
                Ok(Value::Document(doc.clone()))
            }
            other => self.core.run_getters(other.to_value(), scope),
        }
    }

    /// Applies setters with the population special-case.
    ///
    /// When the field is configured with a target collection and the
    /// incoming value is a populated stand-in, the resolved document is
    /// stored as-is under the explicit [FieldValue::Populated] discriminant,
    /// bypassing the cast to a reference. Everything else runs the generic
    /// setter pipeline and casts the result.
    fn apply_setters(&self, value: Value, scope: &Document) -> DocRefResult<FieldValue> {
        let value = match value {
            Value::Document(doc) if self.is_populated_stand_in(&doc) => {
                return Ok(FieldValue::Populated(doc));
            }
            other => self.core.run_setters(other, scope)?,
        };
        self.cast(value)
    }

    /// Casts arbitrary input to the canonical storage shape. Rules are
    /// evaluated in order, first match wins:
    ///
    /// 1. null, or the `"*"` wildcard sentinel meaning "any reference",
    ///    casts to empty;
    /// 2. a reference value is returned unchanged;
    /// 3. an identifier becomes a reference to the configured target
    ///    collection and database;
    /// 4. a string is parsed as an identifier (an identifier parse error
    ///    propagates), then cast as in rule 3;
    /// 5. a document carrying an identifier becomes a reference by
    ///    identifier, using the document's own collection name when it has
    ///    one, else the configured target collection;
    /// 6. anything else fails with a cast error naming the "db ref" kind
    ///    and the offending value.
    fn cast(&self, value: Value) -> DocRefResult<FieldValue> {
        match value {
            Value::Null => Ok(FieldValue::Empty),
            Value::String(s) if s == WILDCARD_REF => Ok(FieldValue::Empty),
            Value::Ref(db_ref) => Ok(FieldValue::Reference(db_ref)),
            Value::Id(id) => Ok(FieldValue::Reference(self.make_ref(id, None))),
            Value::String(s) => {
                let id = DocId::from_string(&s)?;
                Ok(FieldValue::Reference(self.make_ref(id, None)))
            }
            Value::Document(doc) => match doc.id() {
                Some(id) => {
                    Ok(FieldValue::Reference(self.make_ref(id, doc.collection_name())))
                }
                None => Err(self.cast_error(&Value::Document(doc))),
            },
            other => Err(self.cast_error(&other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc;
    use crate::schema::{ComparisonOperator, QueryTarget};
    use std::sync::Arc;

    fn test_id() -> DocId {
        DocId::create_id(1234567890123456789).unwrap()
    }

    fn other_id() -> DocId {
        DocId::create_id(1234567890123456780).unwrap()
    }

    fn ref_field() -> DbRefField {
        DbRefField::new("owner", FieldOptions::new().with_ref("users"))
    }

    #[test]
    fn test_construction_tags_db_ref_kind() {
        let field = ref_field();
        assert_eq!(field.key(), "owner");
        assert_eq!(field.kind(), "DBRef");
        assert_eq!(field.options().target_collection(), Some("users"));
    }

    #[test]
    fn test_cast_null_yields_empty() {
        let field = ref_field();
        assert_eq!(field.cast(Value::Null).unwrap(), FieldValue::Empty);
    }

    #[test]
    fn test_cast_wildcard_yields_empty() {
        let field = ref_field();
        assert_eq!(field.cast(Value::from("*")).unwrap(), FieldValue::Empty);
    }

    #[test]
    fn test_cast_id_uses_configured_collection_and_db() {
        let field = DbRefField::new(
            "owner",
            FieldOptions::new().with_ref("users").with_db("archive"),
        );
        let stored = field.cast(Value::Id(test_id())).unwrap();
        assert_eq!(
            stored,
            FieldValue::Reference(DbRef::new("users", test_id(), Some("archive".to_string())))
        );
    }

    #[test]
    fn test_cast_reference_is_idempotent() {
        let field = ref_field();
        let db_ref = DbRef::new("orders", test_id(), None);

        let stored = field.cast(Value::Ref(db_ref.clone())).unwrap();
        assert_eq!(stored, FieldValue::Reference(db_ref));

        // casting the stored shape again changes nothing
        let again = field.cast(stored.to_value()).unwrap();
        assert_eq!(again, stored);
    }

    #[test]
    fn test_cast_string_agrees_with_cast_id() {
        let field = ref_field();
        let from_string = field.cast(Value::from(test_id().to_string())).unwrap();
        let from_id = field.cast(Value::Id(test_id())).unwrap();
        assert_eq!(from_string, from_id);
    }

    #[test]
    fn test_cast_malformed_string_propagates_id_error() {
        let field = ref_field();
        let result = field.cast(Value::from("not-an-id"));
        assert!(result.is_err());
        assert_eq!(result.err().unwrap().kind(), &ErrorKind::InvalidId);
    }

    #[test]
    fn test_cast_document_prefers_its_own_collection() {
        let field = ref_field();
        let doc = doc! {
            _id: test_id(),
            _collection: "foo",
        };
        let stored = field.cast(Value::Document(doc)).unwrap();
        assert_eq!(
            stored,
            FieldValue::Reference(DbRef::new("foo", test_id(), None))
        );
    }

    #[test]
    fn test_cast_document_falls_back_to_configured_collection() {
        let field = ref_field();
        let doc = doc! { _id: test_id() };
        let stored = field.cast(Value::Document(doc)).unwrap();
        assert_eq!(
            stored,
            FieldValue::Reference(DbRef::new("users", test_id(), None))
        );
    }

    #[test]
    fn test_cast_document_without_id_fails() {
        let field = ref_field();
        let doc = doc! { name: "Alice" };
        let result = field.cast(Value::Document(doc));
        assert!(result.is_err());
        assert_eq!(
            result.err().unwrap().kind(),
            &ErrorKind::Cast {
                target_kind: "db ref".to_string()
            }
        );
    }

    #[test]
    fn test_cast_unsupported_shape_fails_with_offending_value() {
        let field = ref_field();
        let result = field.cast(Value::I32(42));
        assert!(result.is_err());
        let error = result.err().unwrap();
        assert_eq!(
            error.kind(),
            &ErrorKind::Cast {
                target_kind: "db ref".to_string()
            }
        );
        assert_eq!(error.offending_value(), Some("42"));
    }

    #[test]
    fn test_cast_without_configured_ref_yields_empty_collection_name() {
        let field = DbRefField::new("owner", FieldOptions::new());
        let stored = field.cast(Value::Id(test_id())).unwrap();
        assert_eq!(
            stored,
            FieldValue::Reference(DbRef::new("", test_id(), None))
        );
    }

    #[test]
    fn test_check_required() {
        let field = ref_field();
        let reference = FieldValue::Reference(DbRef::new("users", test_id(), None));
        assert!(field.check_required(&reference));
        assert!(!field.check_required(&FieldValue::Empty));
        assert!(!field.check_required(&FieldValue::Populated(doc! { _id: test_id() })));
    }

    #[test]
    fn test_getters_unwrap_reference_to_id() {
        let field = ref_field();
        let scope = Document::new();
        let stored = FieldValue::Reference(DbRef::new("users", test_id(), None));
        let result = field.apply_getters(&stored, &scope).unwrap();
        assert_eq!(result, Value::Id(test_id()));
    }

    #[test]
    fn test_getters_pass_populated_document_through() {
        let field = ref_field();
        let scope = Document::new();
        let populated = doc! { _id: test_id(), name: "Alice" };
        let stored = FieldValue::Populated(populated.clone());
        let result = field.apply_getters(&stored, &scope).unwrap();
        assert_eq!(result, Value::Document(populated));
    }

    #[test]
    fn test_getters_delegate_empty_to_pipeline() {
        let mut field = ref_field();
        field.add_getter(Arc::new(|value, _scope| match value {
            Value::Null => Ok(Value::from("fallback")),
            other => Ok(other),
        }));

        let scope = Document::new();
        let result = field.apply_getters(&FieldValue::Empty, &scope).unwrap();
        assert_eq!(result, Value::String("fallback".to_string()));
    }

    #[test]
    fn test_getters_skip_pipeline_for_references() {
        let mut field = ref_field();
        field.add_getter(Arc::new(|_value, _scope| Ok(Value::from("hijacked"))));

        let scope = Document::new();
        let stored = FieldValue::Reference(DbRef::new("users", test_id(), None));
        let result = field.apply_getters(&stored, &scope).unwrap();
        assert_eq!(result, Value::Id(test_id()));
    }

    #[test]
    fn test_setters_store_populated_stand_in_unchanged() {
        let field = ref_field();
        let scope = Document::new();
        let populated = doc! { _id: test_id(), name: "Alice" };
        let stored = field
            .apply_setters(Value::Document(populated.clone()), &scope)
            .unwrap();
        assert_eq!(stored, FieldValue::Populated(populated));
    }

    #[test]
    fn test_setters_cast_stand_in_when_ref_not_configured() {
        // without a target collection there is no population pass-through;
        // the document-shaped value goes through the cast instead
        let field = DbRefField::new("owner", FieldOptions::new());
        let scope = Document::new();
        let doc = doc! { _id: test_id(), _collection: "users" };
        let stored = field.apply_setters(Value::Document(doc), &scope).unwrap();
        assert_eq!(
            stored,
            FieldValue::Reference(DbRef::new("users", test_id(), None))
        );
    }

    #[test]
    fn test_setters_run_pipeline_then_cast() {
        let mut field = ref_field();
        field.add_setter(Arc::new(|value, _scope| match value {
            // a setter normalizing string input by trimming whitespace
            Value::String(s) => Ok(Value::String(s.trim().to_string())),
            other => Ok(other),
        }));

        let scope = Document::new();
        let raw = format!("  {}  ", test_id());
        let stored = field.apply_setters(Value::from(raw), &scope).unwrap();
        assert_eq!(
            stored,
            FieldValue::Reference(DbRef::new("users", test_id(), None))
        );
    }

    #[test]
    fn test_cast_for_query_bare_value() {
        let field = ref_field();
        let stored = field.cast_for_query(Value::Id(test_id())).unwrap();
        assert_eq!(
            stored,
            FieldValue::Reference(DbRef::new("users", test_id(), None))
        );
    }

    #[test]
    fn test_cast_for_operator_single() {
        let field = ref_field();
        for token in ["$ne", "$gt", "$lt", "$gte", "$lte"] {
            let target = field
                .cast_for_operator(token, Value::Id(test_id()))
                .unwrap();
            assert_eq!(
                target,
                QueryTarget::Single(FieldValue::Reference(DbRef::new(
                    "users",
                    test_id(),
                    None
                )))
            );
        }
    }

    #[test]
    fn test_cast_for_operator_sequence_preserves_order() {
        let field = ref_field();
        let operand = Value::Array(vec![Value::Id(test_id()), Value::Id(other_id())]);
        let target = field.cast_for_operator("$in", operand).unwrap();
        assert_eq!(
            target,
            QueryTarget::Many(vec![
                FieldValue::Reference(DbRef::new("users", test_id(), None)),
                FieldValue::Reference(DbRef::new("users", other_id(), None)),
            ])
        );
    }

    #[test]
    fn test_cast_for_operator_nin() {
        let field = ref_field();
        let operand = Value::Array(vec![Value::Id(test_id())]);
        let target = field.cast_for_operator("$nin", operand).unwrap();
        assert_eq!(target.as_many().unwrap().len(), 1);
    }

    #[test]
    fn test_cast_for_operator_rejects_unsupported() {
        let field = ref_field();
        let result = field.cast_for_operator("$xor", Value::Id(test_id()));
        assert!(result.is_err());
        let error = result.err().unwrap();
        assert_eq!(
            error.kind(),
            &ErrorKind::UnsupportedOperator {
                operator: "$xor".to_string()
            }
        );
        assert!(error.message().contains("DBRef"));
    }

    #[test]
    fn test_cast_for_operator_sequence_element_error_propagates() {
        let field = ref_field();
        let operand = Value::Array(vec![Value::Id(test_id()), Value::I32(42)]);
        let result = field.cast_for_operator("$in", operand);
        assert!(result.is_err());
        assert_eq!(
            result.err().unwrap().kind(),
            &ErrorKind::Cast {
                target_kind: "db ref".to_string()
            }
        );
    }

    #[test]
    fn test_cast_for_comparison_typed_entry_point() {
        let field = ref_field();
        let target = field
            .cast_for_comparison(ComparisonOperator::Ne, Value::Id(test_id()))
            .unwrap();
        assert!(target.as_single().is_some());
    }
}
