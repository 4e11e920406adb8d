use crate::common::{FieldValue, Value};
use crate::document::Document;
use crate::errors::{DocRefResult, DocRefError, ErrorKind};
use crate::schema::{CastStrategy, ComparisonOperator, QueryTarget};
use std::sync::Arc;

/// A user-registered getter or setter transform.
///
/// Transforms run in registration order over the raw value, with the owning
/// document instance available as scope for context-dependent logic.
pub type ValueTransform = Arc<dyn Fn(Value, &Document) -> DocRefResult<Value> + Send + Sync>;

/// Configuration of a schema field.
///
/// Recognized options for reference fields:
///
/// * `target_collection` - the target collection name; enables population
///   pass-through and supplies the default collection name on cast
/// * `target_db` - the target database name, stamped onto every constructed
///   reference
/// * `required` - whether the field must hold a value; checked by the base
///   required validator
/// * `default_value` - the value applied at document hydration when the
///   field is absent (application is the host mapper's concern)
///
/// Options are built once per schema field definition and are immutable
/// after schema compilation.
///
/// # Examples
///
/// ```rust,ignore
/// use docref::schema::FieldOptions;
///
/// let options = FieldOptions::new()
///     .with_ref("users")
///     .with_db("archive")
///     .required(true);
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FieldOptions {
    target_collection: Option<String>,
    target_db: Option<String>,
    required: bool,
    default_value: Option<Value>,
}

impl FieldOptions {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        FieldOptions::default()
    }

    /// Sets the target collection name.
    pub fn with_ref(mut self, collection: impl Into<String>) -> Self {
        self.target_collection = Some(collection.into());
        self
    }

    /// Sets the target database name.
    pub fn with_db(mut self, db: impl Into<String>) -> Self {
        self.target_db = Some(db.into());
        self
    }

    /// Marks the field as required.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the default value applied at document hydration.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Gets the target collection name, if configured.
    pub fn target_collection(&self) -> Option<&str> {
        self.target_collection.as_deref()
    }

    /// Gets the target database name, if configured.
    pub fn target_db(&self) -> Option<&str> {
        self.target_db.as_deref()
    }

    /// Checks whether the field is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Gets the default value, if configured.
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }
}

/// Shared base implementation for field types.
///
/// `FieldCore` carries the common state of every field type: the field key,
/// the kind tag, the configuration, and the user getter/setter pipelines.
/// Field-type variants delegate to it explicitly wherever they do not
/// override behavior.
///
/// # Responsibilities
///
/// * **Construction**: Common initialization with `(key, options, kind)`
/// * **Pipeline Registration**: Collects user getters and setters during
///   schema compilation
/// * **Pipeline Execution**: Folds registered transforms over a value in
///   registration order
pub struct FieldCore {
    key: String,
    kind: &'static str,
    options: FieldOptions,
    getters: Vec<ValueTransform>,
    setters: Vec<ValueTransform>,
}

impl FieldCore {
    /// Creates the shared core of a field type.
    ///
    /// # Arguments
    ///
    /// * `key` - The field name
    /// * `options` - The field configuration
    /// * `kind` - The kind tag of the concrete field type (e.g. "DBRef")
    pub fn new(key: impl Into<String>, options: FieldOptions, kind: &'static str) -> Self {
        FieldCore {
            key: key.into(),
            kind,
            options,
            getters: Vec::new(),
            setters: Vec::new(),
        }
    }

    /// Gets the field name.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Gets the kind tag.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Gets the field configuration.
    pub fn options(&self) -> &FieldOptions {
        &self.options
    }

    /// Registers a user getter. Registration happens during schema
    /// compilation, before the field descriptor is shared.
    pub fn add_getter(&mut self, getter: ValueTransform) {
        self.getters.push(getter);
    }

    /// Registers a user setter.
    pub fn add_setter(&mut self, setter: ValueTransform) {
        self.setters.push(setter);
    }

    /// Runs the registered getter transforms over the value in registration
    /// order.
    pub fn run_getters(&self, value: Value, scope: &Document) -> DocRefResult<Value> {
        self.getters
            .iter()
            .try_fold(value, |value, getter| getter(value, scope))
    }

    /// Runs the registered setter transforms over the value in registration
    /// order.
    pub fn run_setters(&self, value: Value, scope: &Document) -> DocRefResult<Value> {
        self.setters
            .iter()
            .try_fold(value, |value, setter| setter(value, scope))
    }
}

/// A pluggable schema field type.
///
/// A field type defines how one schema field casts, validates, and
/// transforms values. The mapping layer invokes the contracted operations
/// during schema compilation, document hydration, document serialization,
/// and query-condition building.
///
/// Implementations hold a [FieldCore] and override only the operations where
/// their behavior diverges from the shared defaults; everything else
/// delegates through the provided method bodies.
pub trait FieldType {
    /// Gets the shared core of this field type.
    fn core(&self) -> &FieldCore;

    /// Gets the field name.
    fn key(&self) -> &str {
        self.core().key()
    }

    /// Gets the kind tag of this field type.
    fn kind(&self) -> &'static str {
        self.core().kind()
    }

    /// Gets the field configuration.
    fn options(&self) -> &FieldOptions {
        self.core().options()
    }

    /// Converts arbitrary input into the canonical storage shape.
    fn cast(&self, value: Value) -> DocRefResult<FieldValue>;

    /// Checks whether a stored value satisfies the required validator.
    ///
    /// The default accepts any non-empty stored value.
    fn check_required(&self, value: &FieldValue) -> bool {
        !value.is_empty()
    }

    /// Applies the getter pipeline to a stored value, producing the value
    /// application code reads.
    fn apply_getters(&self, value: &FieldValue, scope: &Document) -> DocRefResult<Value> {
        self.core().run_getters(value.to_value(), scope)
    }

    /// Applies the setter pipeline to an incoming value and casts the result
    /// into the canonical storage shape.
    fn apply_setters(&self, value: Value, scope: &Document) -> DocRefResult<FieldValue> {
        let value = self.core().run_setters(value, scope)?;
        self.cast(value)
    }

    /// Casts a bare value as a plain equality target of a query condition.
    fn cast_for_query(&self, value: Value) -> DocRefResult<FieldValue> {
        self.cast(value)
    }

    /// Casts the operand of a comparison operator given by token.
    ///
    /// The token is parsed against the closed [ComparisonOperator] set; an
    /// unknown token fails with [ErrorKind::UnsupportedOperator]. Callers
    /// holding a typed operator should use [FieldType::cast_for_comparison]
    /// instead.
    fn cast_for_operator(&self, operator: &str, value: Value) -> DocRefResult<QueryTarget> {
        match ComparisonOperator::parse(operator) {
            Some(op) => self.cast_for_comparison(op, value),
            None => {
                log::error!("Can't use {} with {}", operator, self.kind());
                Err(DocRefError::new(
                    &format!("Can't use {} with {}", operator, self.kind()),
                    ErrorKind::UnsupportedOperator {
                        operator: operator.to_string(),
                    },
                ))
            }
        }
    }

    /// Casts the operand of a typed comparison operator.
    ///
    /// Single-value operators cast the operand as one value; membership
    /// operators expect an array operand and cast every element
    /// independently, preserving order.
    fn cast_for_comparison(
        &self,
        operator: ComparisonOperator,
        value: Value,
    ) -> DocRefResult<QueryTarget> {
        match operator.strategy() {
            CastStrategy::Single => Ok(QueryTarget::Single(self.cast_for_query(value)?)),
            CastStrategy::Sequence => match value {
                Value::Array(values) => {
                    let cast_values = values
                        .into_iter()
                        .map(|element| self.cast_for_query(element))
                        .collect::<DocRefResult<Vec<FieldValue>>>()?;
                    Ok(QueryTarget::Many(cast_values))
                }
                other => {
                    log::error!("{} expects an array operand for field '{}'", operator, self.key());
                    Err(DocRefError::new(
                        &format!("{} expects an array operand, got {}", operator, other),
                        ErrorKind::InvalidOperation,
                    ))
                }
            },
        }
    }
}
